//! CategoryMapper: converts the coded `gender` column to enumerated
//! labels.

use polars::prelude::{DataFrame, NamedFrom, Series};

use popclean_model::{CleanError, GENDER, Result, Stage, StageReport, gender_label};

use crate::data_utils::{f64_values, require_column};

/// Map gender codes {1, 2, 3} to {"one", "two", "three"}.
///
/// Any other value (out-of-domain codes, non-integral numerics,
/// unparseable text) becomes missing; this is normal mapping behavior,
/// not an error. After this stage the column is text-typed and holds
/// only the enumerated labels plus nulls.
pub fn map_gender(df: DataFrame) -> Result<(DataFrame, StageReport)> {
    let column = require_column(&df, Stage::CategoryMapper, GENDER)?;
    let codes = f64_values(column);

    let affected: Vec<usize> = codes
        .iter()
        .enumerate()
        .filter_map(|(idx, code)| {
            code.and_then(gender_label).is_some().then_some(idx)
        })
        .collect();

    let labels: Vec<Option<&'static str>> = codes
        .into_iter()
        .map(|code| code.and_then(gender_label))
        .collect();

    let height = df.height();
    let mut df = df;
    df.with_column(Series::new(GENDER.into(), labels))
        .map_err(CleanError::frame)?;
    let report =
        StageReport::new(Stage::CategoryMapper, height, height).with_affected_rows(affected);
    Ok((df, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, DataType};
    use popclean_ingest::column_value_string;

    #[test]
    fn maps_codes_and_nulls_everything_else() {
        let df = DataFrame::new(vec![Column::new(
            GENDER.into(),
            vec![Some(1.0), Some(2.0), Some(3.0), Some(9.0), Some(1.5), None],
        )])
        .unwrap();
        let (df, report) = map_gender(df).expect("map gender");

        let column = df.column(GENDER).expect("gender column");
        assert_eq!(column.dtype(), &DataType::String);
        assert_eq!(column_value_string(&df, GENDER, 0), "one");
        assert_eq!(column_value_string(&df, GENDER, 1), "two");
        assert_eq!(column_value_string(&df, GENDER, 2), "three");
        assert_eq!(column.null_count(), 3);
        assert_eq!(report.affected_rows, vec![0, 1, 2]);
    }

    #[test]
    fn missing_column_fails() {
        let df = DataFrame::new(vec![Column::new("other".into(), vec![1.0])]).unwrap();
        let error = map_gender(df).unwrap_err();
        assert!(matches!(
            error,
            CleanError::ColumnMissing {
                stage: Stage::CategoryMapper,
                ..
            }
        ));
    }
}
