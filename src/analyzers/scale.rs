//! Letter-grade to grade-point conversion.

use std::collections::HashMap;

use crate::errors::{GpaError, Result};

/// Points awarded for one letter grade on each scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradePoints {
    pub twelve_point: u8,
    pub four_point: f64,
}

/// The standard McMaster conversion table.
///
/// | Grade | 12-pt | 4-pt |
/// |-------|-------|------|
/// | A+    | 12    | 4.0  |
/// | A     | 11    | 3.9  |
/// | A-    | 10    | 3.7  |
/// | B+    | 9     | 3.3  |
/// | B     | 8     | 3.0  |
/// | B-    | 7     | 2.7  |
/// | C+    | 6     | 2.3  |
/// | C     | 5     | 2.0  |
/// | C-    | 4     | 1.7  |
/// | D+    | 3     | 1.3  |
/// | D     | 2     | 1.0  |
/// | D-    | 1     | 0.7  |
/// | F     | 0     | 0.0  |
static MCMASTER: &[(&str, u8, f64)] = &[
    ("A+", 12, 4.0),
    ("A", 11, 3.9),
    ("A-", 10, 3.7),
    ("B+", 9, 3.3),
    ("B", 8, 3.0),
    ("B-", 7, 2.7),
    ("C+", 6, 2.3),
    ("C", 5, 2.0),
    ("C-", 4, 1.7),
    ("D+", 3, 1.3),
    ("D", 2, 1.0),
    ("D-", 1, 0.7),
    ("F", 0, 0.0),
];

pub const MAX_TWELVE_POINT: u8 = 12;
pub const MAX_FOUR_POINT: f64 = 4.0;

/// An immutable grade-token lookup table.
///
/// Tokens missing from the table (withdrawals, transfer credits, blanks)
/// are treated as non-gradable by the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeScale {
    entries: HashMap<String, GradePoints>,
}

impl GradeScale {
    pub fn mcmaster() -> Self {
        let entries = MCMASTER
            .iter()
            .map(|&(token, twelve_point, four_point)| {
                (
                    token.to_string(),
                    GradePoints {
                        twelve_point,
                        four_point,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Builds a scale from `(token, twelve_point, four_point)` rows,
    /// checking every value is inside its scale's range.
    pub fn from_rows<I, S>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u8, f64)>,
        S: Into<String>,
    {
        let mut entries = HashMap::new();
        for (token, twelve_point, four_point) in rows {
            let token = token.into();
            if twelve_point > MAX_TWELVE_POINT || !(0.0..=MAX_FOUR_POINT).contains(&four_point) {
                return Err(GpaError::Config(format!(
                    "grade {token:?} is out of range: {twelve_point} / {four_point}"
                )));
            }
            entries.insert(
                token,
                GradePoints {
                    twelve_point,
                    four_point,
                },
            );
        }

        if entries.is_empty() {
            return Err(GpaError::Config("grade scale has no entries".into()));
        }

        Ok(Self { entries })
    }

    /// Loads a scale from a JSON object file:
    /// ```json
    /// { "A+": [12, 4.0], "A": [11, 3.9], "F": [0, 0] }
    /// ```
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GpaError::Config(format!("cannot read scale file {path}: {e}")))?;
        let rows: HashMap<String, (u8, f64)> = serde_json::from_str(&content)
            .map_err(|e| GpaError::Config(format!("cannot parse scale file {path}: {e}")))?;

        Self::from_rows(rows.into_iter().map(|(token, (t, f))| (token, t, f)))
    }

    pub fn lookup(&self, token: &str) -> Option<GradePoints> {
        self.entries.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all grades, highest first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, GradePoints)> {
        let mut rows: Vec<_> = self
            .entries
            .iter()
            .map(|(token, points)| (token.as_str(), *points))
            .collect();
        rows.sort_by(|a, b| {
            b.1.twelve_point
                .cmp(&a.1.twelve_point)
                .then(b.1.four_point.total_cmp(&a.1.four_point))
                .then(a.0.cmp(b.0))
        });
        rows.into_iter()
    }
}

impl Default for GradeScale {
    fn default() -> Self {
        Self::mcmaster()
    }
}
