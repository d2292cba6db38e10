//! CLI argument definitions for popclean.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

use popclean_core::{CLEANED_FILE_NAME, IMPUTED_FILE_NAME};

#[derive(Parser)]
#[command(
    name = "popclean",
    version,
    about = "Clean a messy population dataset and explore the result",
    long_about = "Run a fixed sequence of cleaning stages over a raw CSV dataset\n\
                  (typo repair, category mapping, year flagging, deduplication,\n\
                  outlier removal, imputation) and write two checkpoint files.\n\
                  The explore subcommand summarizes the pre-impute checkpoint."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to an append-only file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the cleaning pipeline over a raw CSV dataset.
    Clean(CleanArgs),

    /// Summarize a cleaned checkpoint and render boxplots.
    Explore(ExploreArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Path to the raw CSV dataset.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory for the checkpoint files (default: the input's directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// File name of the pre-impute checkpoint.
    #[arg(long = "cleaned-name", default_value = CLEANED_FILE_NAME)]
    pub cleaned_name: String,

    /// File name of the post-impute checkpoint.
    #[arg(long = "imputed-name", default_value = IMPUTED_FILE_NAME)]
    pub imputed_name: String,

    /// Run every stage and report, but write no checkpoint files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ExploreArgs {
    /// Path to the pre-impute checkpoint CSV.
    #[arg(value_name = "CHECKPOINT")]
    pub input: PathBuf,

    /// Directory for the report artifacts (default: the checkpoint's directory).
    #[arg(long = "report-dir", value_name = "DIR")]
    pub report_dir: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
