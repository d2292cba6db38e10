//! Stage outcome sink.
//!
//! The pipeline reports each stage outcome to an explicitly passed
//! observer instead of ambient global state, so it stays embeddable
//! and testable without a live tracing subscriber.

use tracing::info;

use popclean_model::StageReport;

/// Receives one callback per completed stage, in pipeline order.
pub trait StageObserver {
    fn stage_completed(&mut self, report: &StageReport);
}

/// Default observer: one structured `info!` entry per stage outcome.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl StageObserver for TracingObserver {
    fn stage_completed(&mut self, report: &StageReport) {
        info!(
            stage = %report.stage,
            rows_before = report.rows_before,
            rows_after = report.rows_after,
            affected = report.affected(),
            "stage completed"
        );
    }
}

/// Collects reports in order; used by tests and the CLI summary.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub reports: Vec<StageReport>,
}

impl StageObserver for RecordingObserver {
    fn stage_completed(&mut self, report: &StageReport) {
        self.reports.push(report.clone());
    }
}
