//! Subcommand implementations.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use popclean_core::{PipelineConfig, RunResult, TracingObserver, run_pipeline};
use popclean_ingest::load_dataset;
use popclean_report::{ExplorationArtifacts, explore, print_report};

use crate::cli::{CleanArgs, ExploreArgs};

fn sibling_dir(input: &std::path::Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

pub fn run_clean(args: &CleanArgs) -> Result<RunResult> {
    let df = load_dataset(&args.input)
        .with_context(|| format!("load {}", args.input.display()))?;

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| sibling_dir(&args.input));
    if !args.dry_run {
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("create output dir {}", output_dir.display()))?;
    }

    let mut config = PipelineConfig::new(output_dir).with_dry_run(args.dry_run);
    config.cleaned_file_name = args.cleaned_name.clone();
    config.imputed_file_name = args.imputed_name.clone();

    let mut observer = TracingObserver;
    let result = run_pipeline(df, &config, &mut observer)?;
    Ok(result)
}

pub fn run_explore(args: &ExploreArgs) -> Result<ExplorationArtifacts> {
    let df = load_dataset(&args.input)
        .with_context(|| format!("load {}", args.input.display()))?;
    let report_dir = args
        .report_dir
        .clone()
        .unwrap_or_else(|| sibling_dir(&args.input));
    let artifacts = explore(&df, &report_dir)?;
    print_report(&artifacts.report);
    Ok(artifacts)
}
