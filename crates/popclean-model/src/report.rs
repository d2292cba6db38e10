//! Per-stage outcome reports.
//!
//! Each stage produces a [`StageReport`] describing the rows it
//! changed or removed. Affected rows are always captured against the
//! stage's *input* table (snapshot predicate evaluation before any
//! mutation), so the indices are meaningful even after filtering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a pipeline stage in reports, logs, and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Load,
    TextNormalizer,
    CategoryMapper,
    TemporalValidator,
    Deduplicator,
    OutlierFilter,
    ImputeNumeric,
    ImputeCategorical,
    Persist,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::TextNormalizer => "text_normalizer",
            Stage::CategoryMapper => "category_mapper",
            Stage::TemporalValidator => "temporal_validator",
            Stage::Deduplicator => "deduplicator",
            Stage::OutlierFilter => "outlier_filter",
            Stage::ImputeNumeric => "impute_numeric",
            Stage::ImputeCategorical => "impute_categorical",
            Stage::Persist => "persist",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single stage over one table version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: Stage,
    /// Row count of the input table.
    pub rows_before: usize,
    /// Row count of the output table.
    pub rows_after: usize,
    /// 0-based indices of affected rows in the input table.
    pub affected_rows: Vec<usize>,
}

impl StageReport {
    pub fn new(stage: Stage, rows_before: usize, rows_after: usize) -> Self {
        Self {
            stage,
            rows_before,
            rows_after,
            affected_rows: Vec::new(),
        }
    }

    pub fn with_affected_rows(mut self, rows: Vec<usize>) -> Self {
        self.affected_rows = rows;
        self
    }

    /// Number of rows the stage changed or removed.
    pub fn affected(&self) -> usize {
        self.affected_rows.len()
    }

    /// Number of rows dropped between input and output.
    pub fn removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }
}

/// Outlier bounds derived from the pre-filter `population` column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierBounds {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl OutlierBounds {
    /// Derive `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]` from the quartiles.
    pub fn from_quartiles(q1: f64, q3: f64) -> Self {
        let iqr = q3 - q1;
        Self {
            q1,
            q3,
            lower: q1 - 1.5 * iqr,
            upper: q3 + 1.5 * iqr,
        }
    }

    /// Values exactly on a bound are retained.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}
