//! The cleaning pipeline: a fixed, strictly sequential stage order.
//!
//! 1. TextNormalizer  — repair `income_groups` corruption
//! 2. CategoryMapper  — map `gender` codes to labels
//! 3. TemporalValidator — derive `year_flag`
//! 4. Deduplicator    — drop exact-duplicate rows
//! 5. OutlierFilter   — drop `population` outliers, then persist
//!    checkpoint A (pre-impute)
//! 6. Imputer         — fill remaining missing values, then persist
//!    checkpoint B (post-impute)
//!
//! Ownership of the table transfers fully from stage to stage. Any
//! failure aborts the run immediately; checkpoints written before the
//! failing stage remain, later ones are never created.

use std::path::PathBuf;

use polars::prelude::DataFrame;
use tracing::{debug, error, info_span};

use popclean_model::{CleanError, OutlierBounds, Result, Stage, StageReport};

use crate::categories::map_gender;
use crate::dedupe::remove_duplicates;
use crate::impute::impute_missing;
use crate::observer::StageObserver;
use crate::outliers::filter_outliers;
use crate::persist::write_checkpoint;
use crate::temporal::flag_years;
use crate::typos::fix_typos;

/// Default file name of the pre-impute checkpoint.
pub const CLEANED_FILE_NAME: &str = "cleaned_data.csv";

/// Default file name of the post-impute checkpoint.
pub const IMPUTED_FILE_NAME: &str = "clean_imputed_data.csv";

/// Where and whether the checkpoints are written.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub output_dir: PathBuf,
    pub cleaned_file_name: String,
    pub imputed_file_name: String,
    /// Run every stage but skip the checkpoint writes.
    pub dry_run: bool,
}

impl PipelineConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            cleaned_file_name: CLEANED_FILE_NAME.to_string(),
            imputed_file_name: IMPUTED_FILE_NAME.to_string(),
            dry_run: false,
        }
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn cleaned_path(&self) -> PathBuf {
        self.output_dir.join(&self.cleaned_file_name)
    }

    pub fn imputed_path(&self) -> PathBuf {
        self.output_dir.join(&self.imputed_file_name)
    }
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct RunResult {
    /// Stage reports in emission order.
    pub reports: Vec<StageReport>,
    pub rows_in: usize,
    pub rows_out: usize,
    /// Bounds used by the outlier filter; `None` when `population`
    /// had no non-missing values.
    pub bounds: Option<OutlierBounds>,
    /// Checkpoint A location (pre-impute), unless dry-run.
    pub cleaned_path: Option<PathBuf>,
    /// Checkpoint B location (post-impute), unless dry-run.
    pub imputed_path: Option<PathBuf>,
}

fn fail(stage: Stage, error: CleanError) -> CleanError {
    error!(stage = %stage, %error, "stage failed, aborting run");
    error
}

/// Run the fixed stage sequence over a loaded table.
///
/// Each stage consumes the table produced by the prior stage; stage
/// outcomes are delivered to `observer` in order, with the numeric
/// imputation report always preceding the categorical one.
pub fn run_pipeline(
    df: DataFrame,
    config: &PipelineConfig,
    observer: &mut dyn StageObserver,
) -> Result<RunResult> {
    let span = info_span!("clean_run", rows = df.height());
    let _guard = span.enter();

    let rows_in = df.height();
    let mut reports = Vec::new();

    let (df, report) = fix_typos(df).map_err(|e| fail(Stage::TextNormalizer, e))?;
    observer.stage_completed(&report);
    reports.push(report);

    let (df, report) = map_gender(df).map_err(|e| fail(Stage::CategoryMapper, e))?;
    observer.stage_completed(&report);
    reports.push(report);

    let (df, report) = flag_years(df).map_err(|e| fail(Stage::TemporalValidator, e))?;
    observer.stage_completed(&report);
    reports.push(report);

    let (df, report) = remove_duplicates(df).map_err(|e| fail(Stage::Deduplicator, e))?;
    observer.stage_completed(&report);
    reports.push(report);

    let (df, report, bounds) = filter_outliers(df).map_err(|e| fail(Stage::OutlierFilter, e))?;
    if let Some(bounds) = bounds {
        debug!(
            q1 = bounds.q1,
            q3 = bounds.q3,
            lower = bounds.lower,
            upper = bounds.upper,
            "outlier bounds"
        );
    }
    observer.stage_completed(&report);
    reports.push(report);

    let cleaned_path = if config.dry_run {
        None
    } else {
        Some(
            write_checkpoint(&df, &config.cleaned_path())
                .map_err(|e| fail(Stage::Persist, e))?,
        )
    };

    let outcome = impute_missing(df).map_err(|e| fail(Stage::ImputeNumeric, e))?;
    observer.stage_completed(&outcome.numeric);
    reports.push(outcome.numeric);
    observer.stage_completed(&outcome.categorical);
    reports.push(outcome.categorical);
    let df = outcome.df;

    let imputed_path = if config.dry_run {
        None
    } else {
        Some(
            write_checkpoint(&df, &config.imputed_path())
                .map_err(|e| fail(Stage::Persist, e))?,
        )
    };

    Ok(RunResult {
        reports,
        rows_in,
        rows_out: df.height(),
        bounds,
        cleaned_path,
        imputed_path,
    })
}
