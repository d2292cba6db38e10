//! Boxplot rendering for numeric columns.
//!
//! No plotting dependency exists in this stack, so plots are emitted
//! as self-contained SVG documents: a horizontal box with whiskers at
//! the most extreme values within 1.5·IQR of the quartiles and the
//! points beyond drawn as outlier markers.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::info;

use popclean_core::data_utils::f64_values;
use popclean_core::{quantile_linear, sorted_non_missing};
use popclean_ingest::{format_numeric, is_numeric_dtype};

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 200.0;
const MARGIN: f64 = 40.0;

/// Five-number summary plus whisker reach and outliers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxplotStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Lowest value within `q1 - 1.5*IQR`.
    pub whisker_low: f64,
    /// Highest value within `q3 + 1.5*IQR`.
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

/// Compute boxplot statistics over an ascending-sorted slice.
pub fn boxplot_stats(sorted: &[f64]) -> Option<BoxplotStats> {
    let q1 = quantile_linear(sorted, 0.25)?;
    let median = quantile_linear(sorted, 0.5)?;
    let q3 = quantile_linear(sorted, 0.75)?;
    let iqr = q3 - q1;
    let fence_low = q1 - 1.5 * iqr;
    let fence_high = q3 + 1.5 * iqr;
    let whisker_low = sorted
        .iter()
        .copied()
        .find(|v| *v >= fence_low)
        .unwrap_or(q1);
    let whisker_high = sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= fence_high)
        .unwrap_or(q3);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < fence_low || *v > fence_high)
        .collect();
    Some(BoxplotStats {
        min: sorted[0],
        q1,
        median,
        q3,
        max: sorted[sorted.len() - 1],
        whisker_low,
        whisker_high,
        outliers,
    })
}

fn scale(value: f64, min: f64, max: f64) -> f64 {
    let span = if max > min { max - min } else { 1.0 };
    MARGIN + (value - min) / span * (WIDTH - 2.0 * MARGIN)
}

/// Render the boxplot as an SVG document.
pub fn render_boxplot_svg(column: &str, stats: &BoxplotStats) -> String {
    let (min, max) = (stats.min, stats.max);
    let x = |v: f64| scale(v, min, max);
    let mid = HEIGHT / 2.0;
    let box_top = mid - 40.0;
    let box_bottom = mid + 40.0;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" \
         viewBox=\"0 0 {WIDTH} {HEIGHT}\">"
    );
    let _ = writeln!(
        svg,
        "  <title>Boxplot of {column}</title>\n  <rect width=\"{WIDTH}\" height=\"{HEIGHT}\" fill=\"white\"/>"
    );
    let _ = writeln!(
        svg,
        "  <text x=\"{}\" y=\"24\" text-anchor=\"middle\" font-family=\"sans-serif\" \
         font-size=\"14\">Boxplot of {column}</text>",
        WIDTH / 2.0
    );
    // Whisker line and caps
    let _ = writeln!(
        svg,
        "  <line x1=\"{:.2}\" y1=\"{mid}\" x2=\"{:.2}\" y2=\"{mid}\" stroke=\"black\"/>",
        x(stats.whisker_low),
        x(stats.whisker_high)
    );
    for value in [stats.whisker_low, stats.whisker_high] {
        let _ = writeln!(
            svg,
            "  <line x1=\"{0:.2}\" y1=\"{1}\" x2=\"{0:.2}\" y2=\"{2}\" stroke=\"black\"/>",
            x(value),
            mid - 20.0,
            mid + 20.0
        );
    }
    // Box and median
    let _ = writeln!(
        svg,
        "  <rect x=\"{:.2}\" y=\"{box_top}\" width=\"{:.2}\" height=\"{}\" \
         fill=\"#9ecae1\" stroke=\"black\"/>",
        x(stats.q1),
        (x(stats.q3) - x(stats.q1)).max(1.0),
        box_bottom - box_top
    );
    let _ = writeln!(
        svg,
        "  <line x1=\"{0:.2}\" y1=\"{box_top}\" x2=\"{0:.2}\" y2=\"{box_bottom}\" \
         stroke=\"black\" stroke-width=\"2\"/>",
        x(stats.median)
    );
    // Outliers
    for value in &stats.outliers {
        let _ = writeln!(
            svg,
            "  <circle cx=\"{:.2}\" cy=\"{mid}\" r=\"3\" fill=\"none\" stroke=\"black\"/>",
            x(*value)
        );
    }
    // Axis labels at the extremes
    for value in [min, max] {
        let _ = writeln!(
            svg,
            "  <text x=\"{:.2}\" y=\"{}\" text-anchor=\"middle\" font-family=\"sans-serif\" \
             font-size=\"11\">{}</text>",
            x(value),
            HEIGHT - 10.0,
            format_numeric(value)
        );
    }
    svg.push_str("</svg>\n");
    svg
}

/// Write one `<column>_boxplot.svg` per numeric column with data.
/// Returns the written paths in column order.
pub fn write_boxplots(df: &DataFrame, output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create report dir {}", output_dir.display()))?;
    let mut written = Vec::new();
    for column in df.get_columns() {
        if !is_numeric_dtype(column.dtype()) {
            continue;
        }
        let sorted = sorted_non_missing(&f64_values(column));
        let Some(stats) = boxplot_stats(&sorted) else {
            continue;
        };
        let name = column.name().to_string();
        let path = output_dir.join(format!("{name}_boxplot.svg"));
        fs::write(&path, render_boxplot_svg(&name, &stats))
            .with_context(|| format!("write boxplot {}", path.display()))?;
        info!(path = %path.display(), column = %name, "wrote boxplot");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whiskers_stop_at_the_fences() {
        let sorted = [10.0, 11.0, 12.0, 13.0, 14.0, 500.0];
        let stats = boxplot_stats(&sorted).expect("stats");
        assert_eq!(stats.whisker_low, 10.0);
        assert_eq!(stats.whisker_high, 14.0);
        assert_eq!(stats.outliers, vec![500.0]);
        assert_eq!(stats.max, 500.0);
    }

    #[test]
    fn svg_contains_the_column_title_and_outliers() {
        let stats = boxplot_stats(&[1.0, 2.0, 3.0, 4.0, 100.0]).expect("stats");
        let svg = render_boxplot_svg("population", &stats);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Boxplot of population"));
        assert!(svg.contains("<circle"));
        assert!(svg.ends_with("</svg>\n"));
    }
}
