//! Batch sequencing across queries
//!
//! Runs one primary query to completion, then all sub-region queries
//! concurrently, every page fetch in the whole batch gated by a single shared
//! semaphore. Each query's outcome is finalized and persisted independently:
//! one query failing entirely never prevents its siblings from completing or
//! being written.

use std::sync::Arc;

use log::{error, info};
use tokio::sync::Semaphore;

use super::orchestrator::run_query;
use super::progress::ProgressReporter;
use super::types::{QueryError, QueryOutcome};
use crate::fetcher::PageFetcher;
use crate::sink::RecordSink;

/// Result of one query within a batch: the finalized outcome, or the reason
/// the whole query failed.
#[derive(Debug)]
pub struct QueryReport {
    pub query: String,
    pub result: Result<QueryOutcome, QueryError>,
}

/// Runs the primary place's query plus one query per sub-region.
///
/// The primary query runs first and is awaited before any sub-region query
/// starts. Sub-region queries (query string = primary place + sub-region
/// name) then run concurrently, all sharing one semaphore of capacity
/// `concurrency_cap`, so the true bound on simultaneous in-flight page
/// fetches across the entire batch is `concurrency_cap`, never
/// `concurrency_cap * number_of_queries`.
///
/// Each finalized outcome is handed to `sink` as it completes. Reports come
/// back in a stable order (primary first, then sub-regions as given), even
/// though execution order is not deterministic.
pub async fn run_batch(
    fetcher: Arc<dyn PageFetcher>,
    primary_place: &str,
    sub_regions: &[String],
    pages_per_query: u32,
    concurrency_cap: usize,
    progress: Arc<dyn ProgressReporter>,
    sink: Arc<dyn RecordSink>,
) -> Vec<QueryReport> {
    let limiter = Arc::new(Semaphore::new(concurrency_cap));
    let mut reports = Vec::with_capacity(sub_regions.len() + 1);

    // Primary place runs to completion before any sub-region starts.
    let outcome = run_query(
        Arc::clone(&fetcher),
        primary_place,
        pages_per_query,
        Arc::clone(&limiter),
        progress.as_ref(),
    )
    .await;
    reports.push(finalize(outcome, sink.as_ref()));

    let mut handles = Vec::with_capacity(sub_regions.len());
    for sub_region in sub_regions {
        let fetcher = Arc::clone(&fetcher);
        let limiter = Arc::clone(&limiter);
        let progress = Arc::clone(&progress);
        let sink = Arc::clone(&sink);
        let query = format!("{primary_place}{sub_region}");
        handles.push(tokio::spawn(async move {
            let outcome =
                run_query(fetcher, &query, pages_per_query, limiter, progress.as_ref()).await;
            finalize(outcome, sink.as_ref())
        }));
    }

    // Any fault in a sub-region's querying logic itself (not just per-page
    // faults) surfaces here as a JoinError and is recorded for that query
    // alone.
    for (sub_region, handle) in sub_regions.iter().zip(handles) {
        match handle.await {
            Ok(report) => reports.push(report),
            Err(join_err) => {
                let query = format!("{primary_place}{sub_region}");
                error!("{query}: query task failed: {join_err}");
                reports.push(QueryReport {
                    query,
                    result: Err(QueryError::Task(join_err.to_string())),
                });
            }
        }
    }

    reports
}

fn finalize(outcome: QueryOutcome, sink: &dyn RecordSink) -> QueryReport {
    let query = outcome.query.clone();
    match sink.write(&query, &outcome.records) {
        Ok(path) => {
            info!(
                "{query}: wrote {} places to {}",
                outcome.total_records,
                path.display()
            );
            QueryReport {
                query,
                result: Ok(outcome),
            }
        }
        Err(err) => {
            error!("{query}: sink write failed: {err}");
            QueryReport {
                query,
                result: Err(QueryError::Sink(err)),
            }
        }
    }
}
