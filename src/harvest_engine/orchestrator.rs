//! Completion-order fan-out/fan-in for one query's page range
//!
//! Coordinates per-page fetching with:
//! - Admission control through a shared semaphore
//! - Concurrent task execution across the whole page range
//! - Completion-order result draining
//! - Per-page failure isolation and progress accounting

use std::sync::Arc;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use log::{debug, warn};
use tokio::sync::Semaphore;

use super::progress::ProgressReporter;
use super::types::{FetchError, PageResult, QueryOutcome};
use crate::fetcher::PageFetcher;

/// Runs the full page range `1..=total_pages` for one query.
///
/// One task is spawned per page. Each task acquires a permit from the shared
/// `limiter` before fetching and holds it until its fetch resolves, so the
/// number of in-flight fetches never exceeds the limiter's capacity - launch
/// order throttles nothing, admission does. Results are drained in completion
/// order, not page order: the aggregate record list therefore carries no
/// page-number ordering.
///
/// A failed page (fetch error or task panic) is counted as skipped and never
/// aborts the query; an empty page is a normal completion with zero records
/// and does not halt sibling pages already launched. This function always
/// returns.
pub async fn run_query<P>(
    fetcher: Arc<dyn PageFetcher>,
    query: &str,
    total_pages: u32,
    limiter: Arc<Semaphore>,
    progress: &P,
) -> QueryOutcome
where
    P: ProgressReporter + ?Sized,
{
    let mut tasks = FuturesUnordered::new();
    for page in 1..=total_pages {
        let fetcher = Arc::clone(&fetcher);
        let limiter = Arc::clone(&limiter);
        let query = query.to_string();
        tasks.push(tokio::spawn(async move {
            // Permit is held across the fetch and released on drop,
            // success or failure alike. acquire_owned only fails if the
            // semaphore is closed, which we never do.
            let _permit = limiter
                .acquire_owned()
                .await
                .map_err(|_| FetchError::Request("concurrency limiter closed".to_string()))?;
            fetcher.fetch_page(&query, page).await
        }));
    }

    let mut outcome = QueryOutcome::new(query);

    // Only this drain loop mutates the outcome; fetch tasks just return
    // results, so the counters need no synchronization.
    while let Some(joined) = tasks.next().await {
        let resolved: Result<PageResult, FetchError> = match joined {
            Ok(result) => result,
            Err(join_err) => Err(FetchError::Request(format!("fetch task panicked: {join_err}"))),
        };

        match resolved {
            Ok(page) => {
                if page.is_empty() {
                    debug!("{}: empty page, source likely exhausted", outcome.query);
                }
                outcome.completed_pages += 1;
                outcome.total_records += page.count();
                outcome.records.extend(page.records);
                progress.report_page_completed(
                    &outcome.query,
                    outcome.completed_pages,
                    total_pages,
                    outcome.total_records,
                );
            }
            Err(err) => {
                outcome.skipped_pages += 1;
                warn!("{}: page skipped: {err}", outcome.query);
                progress.report_page_skipped(
                    &outcome.query,
                    outcome.completed_pages,
                    outcome.skipped_pages,
                    total_pages,
                    &err.to_string(),
                );
            }
        }
    }

    progress.report_query_finished(&outcome);
    outcome
}
