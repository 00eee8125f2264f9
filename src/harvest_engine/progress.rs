//! Progress reporting abstraction for harvest runs
//!
//! Defines the `ProgressReporter` trait for per-page lifecycle reporting and
//! provides a log-backed implementation plus a no-op for callers that do not
//! need progress updates.

use log::{info, warn};

use super::types::QueryOutcome;

/// Trait for reporting harvest progress after every page resolution
///
/// Implementations can write to logs, update a UI, send to channels, etc.
/// This is an observability side-channel only; the orchestrator never changes
/// behavior based on what a reporter does.
pub trait ProgressReporter: Send + Sync {
    /// A page resolved successfully, possibly with zero records.
    fn report_page_completed(
        &self,
        query: &str,
        completed: u32,
        total: u32,
        cumulative_records: usize,
    );

    /// A page failed and was skipped.
    fn report_page_skipped(&self, query: &str, completed: u32, skipped: u32, total: u32, cause: &str);

    /// All pages of a query have resolved.
    fn report_query_finished(&self, outcome: &QueryOutcome);
}

/// Progress reporter that does nothing
///
/// All methods are no-ops and will be inlined away by the compiler.
#[derive(Debug, Clone, Copy)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report_page_completed(
        &self,
        _query: &str,
        _completed: u32,
        _total: u32,
        _cumulative_records: usize,
    ) {
    }

    #[inline(always)]
    fn report_page_skipped(
        &self,
        _query: &str,
        _completed: u32,
        _skipped: u32,
        _total: u32,
        _cause: &str,
    ) {
    }

    #[inline(always)]
    fn report_query_finished(&self, _outcome: &QueryOutcome) {}
}

/// Progress reporter backed by the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report_page_completed(
        &self,
        query: &str,
        completed: u32,
        total: u32,
        cumulative_records: usize,
    ) {
        info!("{query}: page {completed}/{total} done, {cumulative_records} places so far");
    }

    fn report_page_skipped(&self, query: &str, completed: u32, skipped: u32, total: u32, cause: &str) {
        warn!("{query}: page skipped ({completed} done, {skipped} skipped of {total}): {cause}");
    }

    fn report_query_finished(&self, outcome: &QueryOutcome) {
        info!(
            "{}: finished with {} places ({} pages done, {} skipped)",
            outcome.query, outcome.total_records, outcome.completed_pages, outcome.skipped_pages
        );
    }
}
