#![deny(unsafe_code)]

pub mod categories;
pub mod data_utils;
pub mod dedupe;
pub mod impute;
pub mod observer;
pub mod outliers;
pub mod persist;
pub mod pipeline;
pub mod stats;
pub mod temporal;
pub mod typos;

pub use categories::map_gender;
pub use dedupe::{duplicate_indices, remove_duplicates};
pub use impute::{ImputeOutcome, impute_missing, missing_cell_count};
pub use observer::{RecordingObserver, StageObserver, TracingObserver};
pub use outliers::filter_outliers;
pub use persist::write_checkpoint;
pub use pipeline::{
    CLEANED_FILE_NAME, IMPUTED_FILE_NAME, PipelineConfig, RunResult, run_pipeline,
};
pub use stats::{median_sorted, mode_value, quantile_linear, sorted_non_missing};
pub use temporal::flag_years;
pub use typos::fix_typos;
