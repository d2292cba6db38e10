//! Deduplicator: removes exact-duplicate rows, keeping the first
//! occurrence of each group.

use std::collections::BTreeSet;

use polars::prelude::{AnyValue, BooleanChunked, DataFrame, NewChunkedArray};

use popclean_ingest::any_to_string;
use popclean_model::{CleanError, Result, Stage, StageReport};

// Separates cell encodings inside a composite key; nulls get their own
// encoding so a null never collides with a literal empty string.
const KEY_SEPARATOR: char = '\u{1f}';
const NULL_ENCODING: &str = "\u{0}";

fn row_key(df: &DataFrame, idx: usize) -> String {
    let mut key = String::new();
    for (pos, column) in df.get_columns().iter().enumerate() {
        if pos > 0 {
            key.push(KEY_SEPARATOR);
        }
        match column.get(idx).unwrap_or(AnyValue::Null) {
            AnyValue::Null => key.push_str(NULL_ENCODING),
            value => key.push_str(&any_to_string(&value)),
        }
    }
    key
}

/// Indices of rows that are duplicates of an earlier row, under full
/// row equality across all columns in their current state.
pub fn duplicate_indices(df: &DataFrame) -> Vec<usize> {
    let mut seen = BTreeSet::new();
    (0..df.height())
        .filter(|&idx| !seen.insert(row_key(df, idx)))
        .collect()
}

/// Remove all but the first occurrence of each equal-row group,
/// preserving the relative order of retained rows.
pub fn remove_duplicates(df: DataFrame) -> Result<(DataFrame, StageReport)> {
    let height = df.height();
    let duplicates = duplicate_indices(&df);

    let mut keep = vec![true; height];
    for &idx in &duplicates {
        keep[idx] = false;
    }
    let mask = BooleanChunked::from_slice("keep_first".into(), &keep);
    let deduped = df.filter(&mask).map_err(CleanError::frame)?;

    let report = StageReport::new(Stage::Deduplicator, height, deduped.height())
        .with_affected_rows(duplicates);
    Ok((deduped, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;
    use popclean_ingest::column_value_string;

    fn frame(a: Vec<Option<&str>>, b: Vec<Option<f64>>) -> DataFrame {
        DataFrame::new(vec![
            Column::new("a".into(), a),
            Column::new("b".into(), b),
        ])
        .unwrap()
    }

    #[test]
    fn keeps_first_occurrence_in_order() {
        let df = frame(
            vec![Some("x"), Some("y"), Some("x"), Some("x")],
            vec![Some(1.0), Some(2.0), Some(1.0), Some(3.0)],
        );
        let (df, report) = remove_duplicates(df).expect("dedupe");
        assert_eq!(df.height(), 3);
        assert_eq!(report.affected_rows, vec![2]);
        assert_eq!(column_value_string(&df, "a", 0), "x");
        assert_eq!(column_value_string(&df, "a", 1), "y");
        assert_eq!(column_value_string(&df, "b", 2), "3");
    }

    #[test]
    fn null_and_empty_like_values_do_not_collide() {
        let df = frame(vec![None, Some("")], vec![Some(1.0), Some(1.0)]);
        let (df, report) = remove_duplicates(df).expect("dedupe");
        assert_eq!(df.height(), 2);
        assert!(report.affected_rows.is_empty());
    }

    #[test]
    fn rerunning_on_own_output_is_a_noop() {
        let df = frame(
            vec![Some("x"), Some("x"), Some("y")],
            vec![Some(1.0), Some(1.0), Some(2.0)],
        );
        let (df, first) = remove_duplicates(df).expect("dedupe");
        assert_eq!(first.removed(), 1);
        let (df, second) = remove_duplicates(df).expect("dedupe again");
        assert_eq!(second.removed(), 0);
        assert_eq!(df.height(), 2);
    }
}
