use std::path::PathBuf;

use thiserror::Error;

use crate::Stage;

/// Error taxonomy for a cleaning run.
///
/// Every stage validates its required columns before transforming; the
/// first failure aborts the whole run. There is no retry and no
/// skip-and-continue.
#[derive(Debug, Error)]
pub enum CleanError {
    /// The source file does not exist.
    #[error("source not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The source exists but is not readable tabular content.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A stage's required column is absent from the table. Indicates a
    /// schema mismatch at load or a stage ordering violation.
    #[error("{stage}: required column '{column}' is missing")]
    ColumnMissing { stage: Stage, column: String },

    /// A checkpoint destination could not be written.
    #[error("failed to write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },

    /// A dataframe engine operation failed.
    #[error("frame error: {0}")]
    Frame(String),
}

impl CleanError {
    /// Wrap a dataframe engine error. The model crate stays
    /// polars-free, so the error is carried as its display form.
    pub fn frame(error: impl std::fmt::Display) -> Self {
        CleanError::Frame(error.to_string())
    }

    pub fn write(path: impl Into<PathBuf>, error: impl std::fmt::Display) -> Self {
        CleanError::Write {
            path: path.into(),
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CleanError>;
