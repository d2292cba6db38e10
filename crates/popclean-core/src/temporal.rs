//! TemporalValidator: classifies `year` without dropping rows.

use polars::prelude::{DataFrame, NamedFrom, Series};

use popclean_model::{CleanError, Result, Stage, StageReport, YEAR, YEAR_FLAG, YearFlag};

use crate::data_utils::{f64_values, require_column};

/// Write the derived `year_flag` column.
///
/// Purely additive: `year` itself is never mutated and no row is
/// filtered. Affected rows are those flagged `future_year`.
pub fn flag_years(df: DataFrame) -> Result<(DataFrame, StageReport)> {
    let column = require_column(&df, Stage::TemporalValidator, YEAR)?;
    let flags: Vec<YearFlag> = f64_values(column).into_iter().map(YearFlag::classify).collect();

    let future: Vec<usize> = flags
        .iter()
        .enumerate()
        .filter_map(|(idx, flag)| (*flag == YearFlag::Future).then_some(idx))
        .collect();

    let labels: Vec<&'static str> = flags.iter().map(YearFlag::as_str).collect();
    let height = df.height();
    let mut df = df;
    df.with_column(Series::new(YEAR_FLAG.into(), labels))
        .map_err(CleanError::frame)?;
    let report =
        StageReport::new(Stage::TemporalValidator, height, height).with_affected_rows(future);
    Ok((df, report))
}
