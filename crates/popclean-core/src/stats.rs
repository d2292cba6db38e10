//! Statistics primitives for outlier bounds and imputation.
//!
//! The quantile uses the linear-interpolation method (the position
//! `q * (n - 1)` between sorted order statistics), matching the
//! quartile definition the outlier bounds are specified against.

use std::collections::HashMap;

/// Linear-interpolation quantile over an ascending-sorted slice.
/// Returns `None` for an empty slice. `q` is clamped to `[0, 1]`.
pub fn quantile_linear(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let frac = pos - lo as f64;
    if frac == 0.0 || lo + 1 >= sorted.len() {
        return Some(sorted[lo]);
    }
    Some(sorted[lo] + (sorted[lo + 1] - sorted[lo]) * frac)
}

/// Median of an ascending-sorted slice; `None` when empty.
pub fn median_sorted(sorted: &[f64]) -> Option<f64> {
    quantile_linear(sorted, 0.5)
}

/// Sorted copy of the non-missing values.
pub fn sorted_non_missing(values: &[Option<f64>]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().flatten().collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Deterministic mode of the non-missing values.
///
/// The highest frequency wins; among tied values the one whose first
/// occurrence appears earliest in the input wins. Returns `None` when
/// every value is missing.
pub fn mode_value(values: &[Option<String>]) -> Option<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, value) in values.iter().enumerate() {
        let Some(value) = value else { continue };
        let entry = counts.entry(value.as_str()).or_insert((0, idx));
        entry.0 += 1;
    }
    counts
        .into_iter()
        .min_by(|a, b| {
            let (_, (count_a, first_a)) = a;
            let (_, (count_b, first_b)) = b;
            count_b.cmp(count_a).then(first_a.cmp(first_b))
        })
        .map(|(value, _)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn quantile_interpolates_linearly() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        // pos = 0.25 * 3 = 0.75 -> 1 + (2 - 1) * 0.75
        assert_eq!(quantile_linear(&sorted, 0.25), Some(1.75));
        // pos = 0.75 * 3 = 2.25 -> 3 + (4 - 3) * 0.25
        assert_eq!(quantile_linear(&sorted, 0.75), Some(3.25));
        assert_eq!(quantile_linear(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile_linear(&sorted, 1.0), Some(4.0));
    }

    #[test]
    fn quantile_of_empty_is_none() {
        assert_eq!(quantile_linear(&[], 0.5), None);
    }

    #[test]
    fn quantile_of_single_value_is_that_value() {
        assert_eq!(quantile_linear(&[7.0], 0.25), Some(7.0));
        assert_eq!(quantile_linear(&[7.0], 0.75), Some(7.0));
    }

    #[test]
    fn median_even_and_odd() {
        assert_eq!(median_sorted(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(median_sorted(&[1.0, 2.0, 3.0, 10.0]), Some(2.5));
    }

    #[test]
    fn sorted_non_missing_drops_nulls() {
        let mut values = opts(&[3.0, 1.0]);
        values.insert(1, None);
        assert_eq!(sorted_non_missing(&values), vec![1.0, 3.0]);
    }

    #[test]
    fn mode_picks_most_frequent() {
        let values: Vec<Option<String>> = ["b", "a", "b"]
            .iter()
            .map(|v| Some((*v).to_string()))
            .collect();
        assert_eq!(mode_value(&values), Some("b".to_string()));
    }

    #[test]
    fn mode_tie_breaks_by_first_appearance() {
        let values: Vec<Option<String>> = ["b", "a", "a", "b"]
            .iter()
            .map(|v| Some((*v).to_string()))
            .collect();
        assert_eq!(mode_value(&values), Some("b".to_string()));
    }

    #[test]
    fn mode_of_all_missing_is_none() {
        assert_eq!(mode_value(&[None, None]), None);
    }
}
