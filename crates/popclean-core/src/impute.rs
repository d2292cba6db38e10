//! Imputer: fills remaining missing values per column-type policy.
//!
//! Two independent passes over the post-outlier table: numeric columns
//! first (median of each column's own non-missing values), then
//! categorical/text columns (deterministic mode). The pass order is
//! part of the documented contract for log ordering, so the numeric
//! report is always emitted before the categorical one.

use std::collections::BTreeSet;

use polars::prelude::{DataFrame, NamedFrom, Series};

use popclean_ingest::is_numeric_dtype;
use popclean_model::{CleanError, Result, Stage, StageReport};

use crate::data_utils::{f64_values, string_values};
use crate::stats::{median_sorted, mode_value, sorted_non_missing};

/// The imputed table plus the two per-group reports, in emission order.
#[derive(Debug)]
pub struct ImputeOutcome {
    pub df: DataFrame,
    pub numeric: StageReport,
    pub categorical: StageReport,
}

fn no_fill_value(name: &str) -> CleanError {
    CleanError::Frame(format!(
        "cannot impute column '{name}': no non-missing values"
    ))
}

/// Fill every missing value in the table.
///
/// Affected rows per group are the rows that had at least one missing
/// value in a column of that group *before* the group's pass ran.
/// After this stage no column contains a missing value.
pub fn impute_missing(df: DataFrame) -> Result<ImputeOutcome> {
    let height = df.height();
    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let numeric_names: Vec<&String> = column_names
        .iter()
        .filter(|name| {
            df.column(name)
                .map(|column| is_numeric_dtype(column.dtype()))
                .unwrap_or(false)
        })
        .collect();

    let mut df = df;
    let mut numeric_rows: BTreeSet<usize> = BTreeSet::new();
    for name in &numeric_names {
        let column = df.column(name).map_err(CleanError::frame)?;
        let values = f64_values(column);
        let missing: Vec<usize> = values
            .iter()
            .enumerate()
            .filter_map(|(idx, value)| value.is_none().then_some(idx))
            .collect();
        if missing.is_empty() {
            continue;
        }
        let median =
            median_sorted(&sorted_non_missing(&values)).ok_or_else(|| no_fill_value(name))?;
        numeric_rows.extend(missing);
        let filled: Vec<f64> = values.into_iter().map(|v| v.unwrap_or(median)).collect();
        df.with_column(Series::new(name.as_str().into(), filled))
            .map_err(CleanError::frame)?;
    }
    let numeric_report = StageReport::new(Stage::ImputeNumeric, height, height)
        .with_affected_rows(numeric_rows.into_iter().collect());

    let mut categorical_rows: BTreeSet<usize> = BTreeSet::new();
    let categorical_names = column_names
        .iter()
        .filter(|name| !numeric_names.contains(name));
    for name in categorical_names {
        let column = df.column(name).map_err(CleanError::frame)?;
        if column.null_count() == 0 {
            continue;
        }
        let values = string_values(column);
        let mode = mode_value(&values).ok_or_else(|| no_fill_value(name))?;
        categorical_rows.extend(
            values
                .iter()
                .enumerate()
                .filter_map(|(idx, value)| value.is_none().then_some(idx)),
        );
        let filled: Vec<String> = values
            .into_iter()
            .map(|v| v.unwrap_or_else(|| mode.clone()))
            .collect();
        df.with_column(Series::new(name.as_str().into(), filled))
            .map_err(CleanError::frame)?;
    }
    let categorical_report = StageReport::new(Stage::ImputeCategorical, height, height)
        .with_affected_rows(categorical_rows.into_iter().collect());

    Ok(ImputeOutcome {
        df,
        numeric: numeric_report,
        categorical: categorical_report,
    })
}

/// Total null count across all columns.
pub fn missing_cell_count(df: &DataFrame) -> usize {
    df.get_columns()
        .iter()
        .map(|column| column.null_count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;
    use popclean_ingest::{column_value_f64, column_value_string};

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new(
                "population".into(),
                vec![Some(10.0), None, Some(30.0), Some(20.0)],
            ),
            Column::new(
                "gender".into(),
                vec![Some("one"), Some("two"), None, Some("one")],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn numeric_missing_becomes_median() {
        let outcome = impute_missing(frame()).expect("impute");
        assert_eq!(column_value_f64(&outcome.df, "population", 1), Some(20.0));
        assert_eq!(outcome.numeric.affected_rows, vec![1]);
        assert_eq!(outcome.numeric.rows_after, 4);
    }

    #[test]
    fn categorical_missing_becomes_mode() {
        let outcome = impute_missing(frame()).expect("impute");
        assert_eq!(column_value_string(&outcome.df, "gender", 2), "one");
        assert_eq!(outcome.categorical.affected_rows, vec![2]);
    }

    #[test]
    fn no_missing_values_remain() {
        let outcome = impute_missing(frame()).expect("impute");
        assert_eq!(missing_cell_count(&outcome.df), 0);
    }

    #[test]
    fn imputation_is_deterministic() {
        let a = impute_missing(frame()).expect("impute");
        let b = impute_missing(frame()).expect("impute");
        assert_eq!(
            column_value_string(&a.df, "gender", 2),
            column_value_string(&b.df, "gender", 2)
        );
    }

    #[test]
    fn numeric_report_precedes_categorical() {
        let outcome = impute_missing(frame()).expect("impute");
        assert_eq!(outcome.numeric.stage, Stage::ImputeNumeric);
        assert_eq!(outcome.categorical.stage, Stage::ImputeCategorical);
    }

    #[test]
    fn all_missing_column_cannot_be_imputed() {
        let df = DataFrame::new(vec![Column::new(
            "gender".into(),
            vec![None::<&str>, None],
        )])
        .unwrap();
        let error = impute_missing(df).unwrap_err();
        assert!(matches!(error, CleanError::Frame(_)));
    }
}
