//! End-to-end pipeline runs over small CSV fixtures.

use std::fs;

use polars::prelude::DataFrame;

use popclean_core::{
    PipelineConfig, RecordingObserver, missing_cell_count, run_pipeline,
};
use popclean_ingest::{column_value_string, load_dataset};
use popclean_model::{CleanError, Stage};

fn load_fixture(dir: &tempfile::TempDir, content: &str) -> DataFrame {
    let input = dir.path().join("messy_population_data.csv");
    fs::write(&input, content).expect("write fixture");
    load_dataset(&input).expect("load fixture")
}

const SCENARIO: &str = "\
income_groups,gender,year,population
Low_typo,1,2023,100
High,9,2030,100
High,9,2030,100
";

#[test]
fn three_row_scenario_produces_both_checkpoints() {
    let dir = tempfile::tempdir().expect("temp dir");
    let df = load_fixture(&dir, SCENARIO);
    let config = PipelineConfig::new(dir.path());
    let mut observer = RecordingObserver::default();

    let result = run_pipeline(df, &config, &mut observer).expect("run pipeline");

    assert_eq!(result.rows_in, 3);
    assert_eq!(result.rows_out, 2);

    let stages: Vec<Stage> = result.reports.iter().map(|r| r.stage).collect();
    assert_eq!(
        stages,
        vec![
            Stage::TextNormalizer,
            Stage::CategoryMapper,
            Stage::TemporalValidator,
            Stage::Deduplicator,
            Stage::OutlierFilter,
            Stage::ImputeNumeric,
            Stage::ImputeCategorical,
        ]
    );
    assert_eq!(result.reports[0].affected_rows, vec![0]);
    assert_eq!(result.reports[1].affected_rows, vec![0]);
    assert_eq!(result.reports[2].affected_rows, vec![1, 2]);
    assert_eq!(result.reports[3].affected_rows, vec![2]);
    // Two identical population values: zero-variance bounds retain both.
    assert!(result.reports[4].affected_rows.is_empty());
    let bounds = result.bounds.expect("bounds");
    assert_eq!(bounds.lower, 100.0);
    assert_eq!(bounds.upper, 100.0);
    assert!(result.reports[5].affected_rows.is_empty());
    assert_eq!(result.reports[6].affected_rows, vec![1]);

    // Observer saw the same reports, in the same order.
    assert_eq!(observer.reports.len(), result.reports.len());

    // Checkpoint A: pre-impute, gender still missing for the retained
    // duplicate row, year_flag present.
    let cleaned = load_dataset(&result.cleaned_path.expect("cleaned path"))
        .expect("reload checkpoint A");
    assert_eq!(cleaned.height(), 2);
    assert_eq!(column_value_string(&cleaned, "income_groups", 0), "Low");
    assert_eq!(column_value_string(&cleaned, "year_flag", 0), "valid_year");
    assert_eq!(column_value_string(&cleaned, "year_flag", 1), "future_year");
    assert_eq!(cleaned.column("gender").expect("gender").null_count(), 1);

    // Checkpoint B: post-impute, zero missing values anywhere.
    let imputed = load_dataset(&result.imputed_path.expect("imputed path"))
        .expect("reload checkpoint B");
    assert_eq!(imputed.height(), 2);
    assert_eq!(missing_cell_count(&imputed), 0);
    assert_eq!(column_value_string(&imputed, "gender", 0), "one");
    assert_eq!(column_value_string(&imputed, "gender", 1), "one");
}

#[test]
fn missing_required_column_aborts_without_checkpoints() {
    let dir = tempfile::tempdir().expect("temp dir");
    let df = load_fixture(
        &dir,
        "income_groups,gender,year\nLow,1,2023\nHigh,2,2020\n",
    );
    let config = PipelineConfig::new(dir.path());
    let mut observer = RecordingObserver::default();

    let error = run_pipeline(df, &config, &mut observer).unwrap_err();
    assert!(matches!(
        error,
        CleanError::ColumnMissing {
            stage: Stage::OutlierFilter,
            ..
        }
    ));
    assert!(!config.cleaned_path().exists());
    assert!(!config.imputed_path().exists());
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let df = load_fixture(&dir, SCENARIO);
    let config = PipelineConfig::new(dir.path()).with_dry_run(true);
    let mut observer = RecordingObserver::default();

    let result = run_pipeline(df, &config, &mut observer).expect("run pipeline");
    assert!(result.cleaned_path.is_none());
    assert!(result.imputed_path.is_none());
    assert!(!config.cleaned_path().exists());
    assert!(!config.imputed_path().exists());
}

#[test]
fn extra_columns_pass_through() {
    let dir = tempfile::tempdir().expect("temp dir");
    let df = load_fixture(
        &dir,
        "income_groups,gender,year,population,age\nLow,1,2023,100,30\nHigh,2,2020,110,\n",
    );
    let config = PipelineConfig::new(dir.path());
    let mut observer = RecordingObserver::default();

    let result = run_pipeline(df, &config, &mut observer).expect("run pipeline");
    let imputed = load_dataset(&result.imputed_path.expect("imputed path"))
        .expect("reload checkpoint B");
    assert!(imputed.column("age").is_ok());
    // The missing age cell was median-imputed.
    assert_eq!(column_value_string(&imputed, "age", 1), "30");
}
