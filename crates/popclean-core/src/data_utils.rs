//! Column access helpers shared by the cleaning stages.

use polars::prelude::{AnyValue, Column, DataFrame};

use popclean_ingest::{any_to_f64, any_to_string};
use popclean_model::{CleanError, Result, Stage};

/// Resolve a stage's required column or fail with `ColumnMissing`.
pub fn require_column<'a>(df: &'a DataFrame, stage: Stage, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| CleanError::ColumnMissing {
        stage,
        column: name.to_string(),
    })
}

/// Collect a column as optional strings; nulls become `None`.
pub fn string_values(column: &Column) -> Vec<Option<String>> {
    (0..column.len())
        .map(|idx| match column.get(idx).unwrap_or(AnyValue::Null) {
            AnyValue::Null => None,
            value => Some(any_to_string(&value)),
        })
        .collect()
}

/// Collect a column as optional floats; nulls and non-numeric cells
/// become `None`.
pub fn f64_values(column: &Column) -> Vec<Option<f64>> {
    (0..column.len())
        .map(|idx| any_to_f64(&column.get(idx).unwrap_or(AnyValue::Null)))
        .collect()
}
