#![deny(unsafe_code)]

pub mod columns;
pub mod error;
pub mod report;

pub use columns::{
    GENDER, GENDER_LABELS, INCOME_GROUPS, MAX_VALID_YEAR, POPULATION, TYPO_MARKER, YEAR,
    YEAR_FLAG, YearFlag, gender_label,
};
pub use error::{CleanError, Result};
pub use report::{OutlierBounds, Stage, StageReport};
