//! Read-only aggregation over the pre-impute checkpoint.

use std::collections::HashMap;

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use popclean_core::{duplicate_indices, quantile_linear, sorted_non_missing};
use popclean_core::data_utils::{f64_values, string_values};
use popclean_ingest::is_numeric_dtype;
use popclean_model::{INCOME_GROUPS, MAX_VALID_YEAR, YEAR};

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator); 0 for a single value.
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Value frequencies for one categorical column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub count: usize,
    pub unique: usize,
    pub mode: Option<String>,
    /// `(value, count)` pairs, most frequent first; ties keep
    /// first-appearance order. A trailing `(None, n)` entry counts the
    /// missing cells when any exist.
    pub value_counts: Vec<(Option<String>, usize)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

/// Per-column missing counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingSummary {
    pub column: String,
    pub missing: usize,
    pub percent: f64,
}

/// Everything the exploratory pass derives from checkpoint A.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorationReport {
    pub rows: usize,
    pub columns: usize,
    /// `(column, summary)` in table column order.
    pub column_summaries: Vec<(String, ColumnSummary)>,
    pub missing: Vec<MissingSummary>,
    pub duplicate_rows: usize,
    /// Indices of rows with a negative value in any numeric column.
    pub negative_rows: Vec<usize>,
    /// Count of `year` entries beyond the validity ceiling.
    pub future_years: usize,
    pub income_group_values: Vec<String>,
}

fn numeric_summary(values: &[Option<f64>]) -> Option<NumericSummary> {
    let sorted = sorted_non_missing(values);
    if sorted.is_empty() {
        return None;
    }
    let count = sorted.len();
    let mean = sorted.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let variance = sorted
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / (count - 1) as f64;
        variance.sqrt()
    } else {
        0.0
    };
    Some(NumericSummary {
        count,
        mean,
        std,
        min: sorted[0],
        q1: quantile_linear(&sorted, 0.25)?,
        median: quantile_linear(&sorted, 0.5)?,
        q3: quantile_linear(&sorted, 0.75)?,
        max: sorted[count - 1],
    })
}

fn categorical_summary(values: &[Option<String>]) -> CategoricalSummary {
    // First-appearance order, then a stable sort by descending count.
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<(String, usize)> = Vec::new();
    let mut missing = 0usize;
    for value in values {
        match value {
            None => missing += 1,
            Some(value) => match index.get(value) {
                Some(&pos) => merged[pos].1 += 1,
                None => {
                    index.insert(value.clone(), merged.len());
                    merged.push((value.clone(), 1));
                }
            },
        }
    }
    merged.sort_by(|a, b| b.1.cmp(&a.1));
    let mode = merged.first().map(|(value, _)| value.clone());
    let unique = merged.len();
    let count = values.len() - missing;
    let mut value_counts: Vec<(Option<String>, usize)> = merged
        .into_iter()
        .map(|(value, count)| (Some(value), count))
        .collect();
    if missing > 0 {
        value_counts.push((None, missing));
    }
    CategoricalSummary {
        count,
        unique,
        mode,
        value_counts,
    }
}

/// Build the full exploration report over a loaded checkpoint.
pub fn build_report(df: &DataFrame) -> ExplorationReport {
    let rows = df.height();
    let mut column_summaries = Vec::new();
    let mut missing = Vec::new();
    let mut negative = std::collections::BTreeSet::new();

    for column in df.get_columns() {
        let name = column.name().to_string();
        let summary = if is_numeric_dtype(column.dtype()) {
            let values = f64_values(column);
            for (idx, value) in values.iter().enumerate() {
                if value.is_some_and(|v| v < 0.0) {
                    negative.insert(idx);
                }
            }
            match numeric_summary(&values) {
                Some(stats) => ColumnSummary::Numeric(stats),
                None => ColumnSummary::Categorical(categorical_summary(&[])),
            }
        } else {
            ColumnSummary::Categorical(categorical_summary(&string_values(column)))
        };
        let missing_count = column.null_count();
        missing.push(MissingSummary {
            column: name.clone(),
            missing: missing_count,
            percent: if rows == 0 {
                0.0
            } else {
                missing_count as f64 / rows as f64 * 100.0
            },
        });
        column_summaries.push((name, summary));
    }

    let future_years = df
        .column(YEAR)
        .map(|column| {
            f64_values(column)
                .iter()
                .filter(|value| value.is_some_and(|v| v > MAX_VALID_YEAR as f64))
                .count()
        })
        .unwrap_or(0);

    let income_group_values = df
        .column(INCOME_GROUPS)
        .map(|column| {
            let mut seen = std::collections::BTreeSet::new();
            string_values(column)
                .into_iter()
                .flatten()
                .filter(|value| seen.insert(value.clone()))
                .collect()
        })
        .unwrap_or_default();

    ExplorationReport {
        rows,
        columns: df.width(),
        column_summaries,
        missing,
        duplicate_rows: duplicate_indices(df).len(),
        negative_rows: negative.into_iter().collect(),
        future_years,
        income_group_values,
    }
}
