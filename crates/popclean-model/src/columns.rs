//! Fixed column roles and cleaning constants.
//!
//! The pipeline operates on a fixed schema: the four named columns
//! below must be present in the source; any additional columns are
//! carried through untouched except for deduplication and imputation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Text column that may carry the corruption marker suffix.
pub const INCOME_GROUPS: &str = "income_groups";

/// Numeric code column mapped to enumerated labels.
pub const GENDER: &str = "gender";

/// Numeric year column checked against [`MAX_VALID_YEAR`].
pub const YEAR: &str = "year";

/// Numeric column subject to IQR-based outlier exclusion.
pub const POPULATION: &str = "population";

/// Derived per-row classification of the `year` column.
pub const YEAR_FLAG: &str = "year_flag";

/// Marker substring identifying corrupted `income_groups` values.
pub const TYPO_MARKER: &str = "_typo";

/// Years strictly above this ceiling are impossible future dates.
pub const MAX_VALID_YEAR: i64 = 2024;

/// Enumerated labels for mapped gender codes, in code order.
pub const GENDER_LABELS: [&str; 3] = ["one", "two", "three"];

/// Map a gender code to its enumerated label.
///
/// Codes outside {1, 2, 3} (including non-integral numerics) have no
/// label and become missing after mapping.
pub fn gender_label(code: f64) -> Option<&'static str> {
    if code == 1.0 {
        Some(GENDER_LABELS[0])
    } else if code == 2.0 {
        Some(GENDER_LABELS[1])
    } else if code == 3.0 {
        Some(GENDER_LABELS[2])
    } else {
        None
    }
}

/// Per-row classification of the `year` column.
///
/// The checks are applied in a total order: missing first, then the
/// future-date ceiling, then valid. The three flags are exhaustive and
/// mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YearFlag {
    Valid,
    Future,
    Missing,
}

impl YearFlag {
    /// Classify a year value. `None` means the cell is missing.
    pub fn classify(year: Option<f64>) -> Self {
        match year {
            None => YearFlag::Missing,
            Some(value) if value > MAX_VALID_YEAR as f64 => YearFlag::Future,
            Some(_) => YearFlag::Valid,
        }
    }

    /// Returns the label written into the `year_flag` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            YearFlag::Valid => "valid_year",
            YearFlag::Future => "future_year",
            YearFlag::Missing => "missing",
        }
    }
}

impl fmt::Display for YearFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
