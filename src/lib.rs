//! # poi-harvest
//!
//! Bounded-concurrency paginated harvesting of place/POI search results.
//!
//! For each query (a place name, or place name + sub-region), every page in
//! the configured range is fetched concurrently through a shared admission
//! gate, results are drained in completion order, failed pages are skipped
//! without aborting the query, and each query's aggregate lands in its own
//! CSV file.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use poi_harvest::{harvest, HarvestConfig, StaticCredentials, DEFAULT_USER_AGENT};
//!
//! async fn run() -> anyhow::Result<()> {
//!     let config = HarvestConfig::builder("上海")
//!         .sub_regions(["黄浦区", "徐汇区"])
//!         .pages_per_query(140)
//!         .concurrency_cap(5)
//!         .build()?;
//!     let credentials = Arc::new(StaticCredentials::new(
//!         "SUB=...; XSRF-TOKEN=...",
//!         DEFAULT_USER_AGENT,
//!     )?);
//!     for report in harvest(config, credentials).await? {
//!         println!("{}: {:?}", report.query, report.result.map(|o| o.total_records));
//!     }
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

pub mod config;
pub mod credentials;
pub mod fetcher;
pub mod harvest_engine;
pub mod sink;

pub use config::HarvestConfig;
pub use credentials::{CredentialProvider, DEFAULT_USER_AGENT, StaticCredentials};
pub use fetcher::{HttpPageFetcher, PageFetcher};
pub use harvest_engine::{
    FetchError, LogProgress, NoOpProgress, PageResult, PlaceRecord, ProgressReporter, QueryError,
    QueryOutcome, QueryReport, run_batch, run_query,
};
pub use sink::{CsvSink, RecordSink, SinkError};

/// Runs a full batch with the HTTP fetcher, CSV sink, and log-backed
/// progress reporting.
///
/// Only construction can fail; once the batch is running, every per-page and
/// per-query fault is absorbed into the returned reports.
pub async fn harvest(
    config: HarvestConfig,
    credentials: Arc<dyn CredentialProvider>,
) -> anyhow::Result<Vec<QueryReport>> {
    let fetcher = HttpPageFetcher::new(config.endpoint.clone(), credentials, config.fetch_timeout)?;
    let sink = CsvSink::new(config.output_dir.clone());

    Ok(run_batch(
        Arc::new(fetcher),
        &config.primary_place,
        &config.sub_regions,
        config.pages_per_query,
        config.concurrency_cap,
        Arc::new(LogProgress),
        Arc::new(sink),
    )
    .await)
}
