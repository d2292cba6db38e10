//! Full clean-then-explore flow over a realistic fixture.

use std::fs;

use popclean_core::{PipelineConfig, RecordingObserver, run_pipeline};
use popclean_ingest::load_dataset;
use popclean_report::{ColumnSummary, explore};

const FIXTURE: &str = "\
income_groups,gender,year,population
Low_typo,1,2000,1000
Low,2,2001,1100
Lower middle,3,2002,1050
Upper middle,1,2003,990
High,2,2030,1020
High,2,2030,1020
High_typo,9,,1010
Low,1,2004,
Low,2,2005,250000
";

#[test]
fn clean_then_explore_produces_consistent_artifacts() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("messy_population_data.csv");
    fs::write(&input, FIXTURE).expect("write fixture");

    let df = load_dataset(&input).expect("load");
    let config = PipelineConfig::new(dir.path());
    let mut observer = RecordingObserver::default();
    let result = run_pipeline(df, &config, &mut observer).expect("run");

    // One duplicate removed, one population outlier removed.
    assert_eq!(result.rows_in, 9);
    assert_eq!(result.rows_out, 7);
    let bounds = result.bounds.expect("bounds");
    assert!(bounds.upper < 250000.0);

    let cleaned_path = result.cleaned_path.expect("checkpoint A");
    let cleaned = load_dataset(&cleaned_path).expect("reload checkpoint A");
    assert_eq!(cleaned.height(), 7);

    let report_dir = dir.path().join("reports");
    let artifacts = explore(&cleaned, &report_dir).expect("explore");
    assert_eq!(artifacts.report.rows, 7);
    assert_eq!(artifacts.report.duplicate_rows, 0);
    assert_eq!(artifacts.report.future_years, 1);
    assert!(artifacts.summary_path.exists());
    // population and year boxplots
    assert_eq!(artifacts.boxplot_paths.len(), 2);

    // Typo repair is visible in the explored checkpoint.
    assert!(
        artifacts
            .report
            .income_group_values
            .iter()
            .all(|value| !value.contains("_typo"))
    );

    // gender was mapped to labels, so it summarizes as categorical.
    let gender = artifacts
        .report
        .column_summaries
        .iter()
        .find(|(name, _)| name == "gender")
        .map(|(_, summary)| summary)
        .expect("gender summary");
    match gender {
        ColumnSummary::Categorical(stats) => {
            assert!(stats.unique <= 3);
        }
        ColumnSummary::Numeric(_) => panic!("gender should be categorical after cleaning"),
    }
}
