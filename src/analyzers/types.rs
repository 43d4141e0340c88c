//! Data types used by the aggregation pipeline.

use serde::Serialize;
use std::fmt;

use crate::errors::{GpaError, Result};

/// One course row decoded from the course-history page.
///
/// `units` is kept as the cell text and parsed by [`RecordEntry::units`],
/// only for entries that are actually graded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    pub(crate) course_code: String,
    pub(crate) units: String,
    pub(crate) grade: String,
}

impl RecordEntry {
    pub fn new(
        course_code: impl Into<String>,
        units: impl Into<String>,
        grade: impl Into<String>,
    ) -> Self {
        Self {
            course_code: course_code.into(),
            units: units.into(),
            grade: grade.into(),
        }
    }

    pub fn course_code(&self) -> &str {
        &self.course_code
    }

    pub fn grade(&self) -> &str {
        &self.grade
    }

    pub fn units_text(&self) -> &str {
        &self.units
    }

    /// Parses the credit units, which may be fractional (e.g. `0.50`).
    ///
    /// # Errors
    ///
    /// Returns [`GpaError::MalformedDocument`] if the cell is not a finite,
    /// non-negative number.
    pub fn units(&self) -> Result<f64> {
        let text = self.units.trim();
        match text.parse::<f64>() {
            Ok(units) if units.is_finite() && units >= 0.0 => Ok(units),
            _ => Err(GpaError::MalformedDocument(format!(
                "units for course {:?} are not numeric: {:?}",
                self.course_code, text
            ))),
        }
    }
}

/// Credit-weighted averages on both scales, each rounded to three decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AverageResult {
    pub twelve_point: f64,
    pub four_point: f64,
}

impl fmt::Display for AverageResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "12-point: {:.3}, 4-point: {:.3}",
            self.twelve_point, self.four_point
        )
    }
}
