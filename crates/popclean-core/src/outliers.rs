//! OutlierFilter: removes `population` values outside the IQR-derived
//! acceptable range.

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};

use popclean_model::{CleanError, OutlierBounds, POPULATION, Result, Stage, StageReport};

use crate::data_utils::{f64_values, require_column};
use crate::stats::{quantile_linear, sorted_non_missing};

/// Remove rows whose `population` falls strictly outside
/// `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]`; values exactly on a bound are
/// retained. Quartiles are computed over the pre-filter non-missing
/// values with the linear-interpolation method.
///
/// Rows with a missing `population` take no part in the quartile
/// computation and survive the filter; they are handled by the
/// Imputer. With no non-missing values at all the stage removes
/// nothing and reports no bounds.
pub fn filter_outliers(
    df: DataFrame,
) -> Result<(DataFrame, StageReport, Option<OutlierBounds>)> {
    let column = require_column(&df, Stage::OutlierFilter, POPULATION)?;
    let values = f64_values(column);
    let sorted = sorted_non_missing(&values);
    let height = df.height();

    let (Some(q1), Some(q3)) = (
        quantile_linear(&sorted, 0.25),
        quantile_linear(&sorted, 0.75),
    ) else {
        let report = StageReport::new(Stage::OutlierFilter, height, height);
        return Ok((df, report, None));
    };
    let bounds = OutlierBounds::from_quartiles(q1, q3);

    let keep: Vec<bool> = values
        .iter()
        .map(|value| value.is_none_or(|v| bounds.contains(v)))
        .collect();
    let removed: Vec<usize> = keep
        .iter()
        .enumerate()
        .filter_map(|(idx, &kept)| (!kept).then_some(idx))
        .collect();

    let mask = BooleanChunked::from_slice("within_bounds".into(), &keep);
    let filtered = df.filter(&mask).map_err(CleanError::frame)?;
    let report = StageReport::new(Stage::OutlierFilter, height, filtered.height())
        .with_affected_rows(removed);
    Ok((filtered, report, Some(bounds)))
}
