#![deny(unsafe_code)]

//! Exploratory pass over the pre-impute checkpoint.
//!
//! Read-only: everything here aggregates the cleaned table and writes
//! report artifacts (a JSON summary and per-column boxplot SVGs) that
//! nothing in the pipeline depends on.

pub mod boxplot;
pub mod render;
pub mod summary;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::info;

pub use boxplot::{BoxplotStats, boxplot_stats, render_boxplot_svg, write_boxplots};
pub use render::print_report;
pub use summary::{
    CategoricalSummary, ColumnSummary, ExplorationReport, MissingSummary, NumericSummary,
    build_report,
};

/// File name of the machine-readable exploration artifact.
pub const SUMMARY_FILE_NAME: &str = "exploration_summary.json";

/// Write the report as pretty-printed JSON.
pub fn write_summary_json(report: &ExplorationReport, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create report dir {}", output_dir.display()))?;
    let path = output_dir.join(SUMMARY_FILE_NAME);
    let json = serde_json::to_string_pretty(report).context("serialize exploration report")?;
    fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "wrote exploration summary");
    Ok(path)
}

/// Artifacts produced by one exploration run.
#[derive(Debug)]
pub struct ExplorationArtifacts {
    pub report: ExplorationReport,
    pub summary_path: PathBuf,
    pub boxplot_paths: Vec<PathBuf>,
}

/// Run the full exploratory pass over a loaded checkpoint frame.
pub fn explore(df: &DataFrame, output_dir: &Path) -> Result<ExplorationArtifacts> {
    let report = build_report(df);
    let summary_path = write_summary_json(&report, output_dir)?;
    let boxplot_paths = write_boxplots(df, output_dir)?;
    Ok(ExplorationArtifacts {
        report,
        summary_path,
        boxplot_paths,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    #[test]
    fn explore_writes_summary_and_boxplots() {
        let df = DataFrame::new(vec![
            Column::new("income_groups".into(), vec![Some("Low"), Some("High")]),
            Column::new("population".into(), vec![Some(10.0), Some(20.0)]),
            Column::new("year".into(), vec![Some(2020.0), Some(2023.0)]),
        ])
        .unwrap();
        let dir = tempfile::tempdir().expect("temp dir");

        let artifacts = explore(&df, dir.path()).expect("explore");
        assert!(artifacts.summary_path.exists());
        assert_eq!(artifacts.boxplot_paths.len(), 2);
        assert!(dir.path().join("population_boxplot.svg").exists());
        assert!(dir.path().join("year_boxplot.svg").exists());

        let json = std::fs::read_to_string(&artifacts.summary_path).expect("read summary");
        let round: ExplorationReport = serde_json::from_str(&json).expect("parse summary");
        assert_eq!(round.rows, 2);
        assert_eq!(round.columns, 3);
    }
}
