//! TextNormalizer: repairs the known corruption pattern in
//! `income_groups`.

use polars::prelude::{DataFrame, NamedFrom, Series};

use popclean_model::{CleanError, INCOME_GROUPS, Result, Stage, StageReport, TYPO_MARKER};

use crate::data_utils::{require_column, string_values};

/// Remove one occurrence of the corruption marker from each affected
/// `income_groups` value. Unaffected values pass through identically
/// and the row count never changes.
pub fn fix_typos(df: DataFrame) -> Result<(DataFrame, StageReport)> {
    let column = require_column(&df, Stage::TextNormalizer, INCOME_GROUPS)?;
    let values = string_values(column);

    // Affected rows are identified on the pre-transform column.
    let affected: Vec<usize> = values
        .iter()
        .enumerate()
        .filter_map(|(idx, value)| {
            value
                .as_deref()
                .is_some_and(|v| v.contains(TYPO_MARKER))
                .then_some(idx)
        })
        .collect();

    let repaired: Vec<Option<String>> = values
        .into_iter()
        .map(|value| value.map(|v| v.replacen(TYPO_MARKER, "", 1)))
        .collect();

    let height = df.height();
    let mut df = df;
    df.with_column(Series::new(INCOME_GROUPS.into(), repaired))
        .map_err(CleanError::frame)?;
    let report =
        StageReport::new(Stage::TextNormalizer, height, height).with_affected_rows(affected);
    Ok((df, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;
    use popclean_ingest::column_value_string;

    fn frame(values: Vec<Option<&str>>) -> DataFrame {
        DataFrame::new(vec![Column::new(INCOME_GROUPS.into(), values)]).unwrap()
    }

    #[test]
    fn strips_exactly_one_marker_occurrence() {
        let df = frame(vec![
            Some("Low_typo"),
            Some("High"),
            Some("Mid_typo_typo"),
            None,
        ]);
        let (df, report) = fix_typos(df).expect("fix typos");
        assert_eq!(column_value_string(&df, INCOME_GROUPS, 0), "Low");
        assert_eq!(column_value_string(&df, INCOME_GROUPS, 1), "High");
        assert_eq!(column_value_string(&df, INCOME_GROUPS, 2), "Mid_typo");
        assert_eq!(column_value_string(&df, INCOME_GROUPS, 3), "");
        assert_eq!(report.affected_rows, vec![0, 2]);
        assert_eq!(report.rows_before, 4);
        assert_eq!(report.rows_after, 4);
    }

    #[test]
    fn missing_column_fails() {
        let df = DataFrame::new(vec![Column::new("other".into(), vec!["x"])]).unwrap();
        let error = fix_typos(df).unwrap_err();
        assert!(matches!(
            error,
            CleanError::ColumnMissing {
                stage: Stage::TextNormalizer,
                ..
            }
        ));
    }
}
