//! Decoding course rows out of the course-history page.
//!
//! The portal renders every data cell with the same display-only class, so a
//! course row is recovered purely by position: each run of [`CellLayout::arity`]
//! consecutive cells is one course, and fields sit at fixed offsets inside it.

use scraper::ElementRef;
use tracing::debug;

use crate::analyzers::types::RecordEntry;
use crate::errors::{GpaError, Result};
use crate::parser::Document;

pub const DEFAULT_CELL_CLASS: &str = "PSEDITBOX_DISPONLY";

/// Where the course fields sit within each group of cells.
///
/// With the default layout a group is `[course, term, grade, units]`; the
/// term cell is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellLayout {
    pub cell_class: String,
    pub arity: usize,
    pub code_offset: usize,
    pub grade_offset: usize,
    pub units_offset: usize,
}

impl Default for CellLayout {
    fn default() -> Self {
        Self {
            cell_class: DEFAULT_CELL_CLASS.to_string(),
            arity: 4,
            code_offset: 0,
            grade_offset: 2,
            units_offset: 3,
        }
    }
}

impl CellLayout {
    fn selector(&self) -> String {
        format!("span.{}", self.cell_class)
    }

    fn validate(&self) -> Result<()> {
        let max_offset = self
            .code_offset
            .max(self.grade_offset)
            .max(self.units_offset);
        if self.arity == 0 || max_offset >= self.arity {
            return Err(GpaError::Config(format!(
                "cell offsets must be below the group arity {}",
                self.arity
            )));
        }
        Ok(())
    }
}

/// Returns one [`RecordEntry`] per cell group, in document order.
///
/// Nothing is filtered here: withdrawn and transfer rows come through as-is.
///
/// # Errors
///
/// Returns [`GpaError::MalformedDocument`] if the number of cells is not a
/// multiple of the group arity, since a partial group means the columns have
/// shifted and every later row would be misread.
pub fn extract_records(doc: &Document, layout: &CellLayout) -> Result<Vec<RecordEntry>> {
    layout.validate()?;

    let cells: Vec<String> = doc
        .select_all(&layout.selector())?
        .into_iter()
        .map(cell_text)
        .collect();

    if cells.len() % layout.arity != 0 {
        return Err(GpaError::MalformedDocument(format!(
            "found {} data cells, which is not a multiple of {}",
            cells.len(),
            layout.arity
        )));
    }

    let records: Vec<RecordEntry> = cells
        .chunks_exact(layout.arity)
        .map(|group| {
            RecordEntry::new(
                group[layout.code_offset].as_str(),
                group[layout.units_offset].as_str(),
                group[layout.grade_offset].as_str(),
            )
        })
        .collect();

    debug!(
        cells = cells.len(),
        records = records.len(),
        "Course records extracted"
    );

    Ok(records)
}

/// Cell text with surrounding whitespace removed. `str::trim` also strips the
/// `&nbsp;` the portal puts in empty cells.
fn cell_text(cell: ElementRef<'_>) -> String {
    let text: String = cell.text().collect();
    text.trim().to_string()
}
