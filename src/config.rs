//! Harvest run configuration
//!
//! `HarvestConfig` describes one batch run: where to fetch from, which place
//! and sub-regions to query, how many pages per query, and how wide the
//! concurrency gate opens. Built through a fluent builder with validation at
//! `build()` time.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use url::Url;

/// Place search endpoint queried when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://weibo.com/ajax/statuses/place";
/// Pages attempted per query when none is configured.
pub const DEFAULT_PAGES_PER_QUERY: u32 = 140;
/// Batch-wide bound on simultaneous in-flight page fetches.
pub const DEFAULT_CONCURRENCY_CAP: usize = 5;
/// Per-request timeout; a timed-out page is counted as skipped.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);
/// Directory the CSV sink writes into when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "place_all";

#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub endpoint: Url,
    pub primary_place: String,
    pub sub_regions: Vec<String>,
    pub pages_per_query: u32,
    pub concurrency_cap: usize,
    pub output_dir: PathBuf,
    pub fetch_timeout: Duration,
}

impl HarvestConfig {
    #[must_use]
    pub fn builder(primary_place: impl Into<String>) -> HarvestConfigBuilder {
        HarvestConfigBuilder {
            endpoint: None,
            primary_place: primary_place.into(),
            sub_regions: Vec::new(),
            pages_per_query: DEFAULT_PAGES_PER_QUERY,
            concurrency_cap: DEFAULT_CONCURRENCY_CAP,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HarvestConfigBuilder {
    endpoint: Option<String>,
    primary_place: String,
    sub_regions: Vec<String>,
    pages_per_query: u32,
    concurrency_cap: usize,
    output_dir: PathBuf,
    fetch_timeout: Duration,
}

impl HarvestConfigBuilder {
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    #[must_use]
    pub fn sub_regions<I, S>(mut self, sub_regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sub_regions = sub_regions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn pages_per_query(mut self, pages: u32) -> Self {
        self.pages_per_query = pages;
        self
    }

    #[must_use]
    pub fn concurrency_cap(mut self, cap: usize) -> Self {
        self.concurrency_cap = cap;
        self
    }

    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Validates and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for an unparsable endpoint URL, an empty primary
    /// place, zero pages, or a zero concurrency cap.
    pub fn build(self) -> Result<HarvestConfig> {
        let endpoint = self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("invalid endpoint url '{endpoint}'"))?;

        ensure!(
            !self.primary_place.trim().is_empty(),
            "primary place must not be empty"
        );
        ensure!(self.pages_per_query >= 1, "pages per query must be at least 1");
        ensure!(self.concurrency_cap >= 1, "concurrency cap must be at least 1");

        Ok(HarvestConfig {
            endpoint,
            primary_place: self.primary_place,
            sub_regions: self.sub_regions,
            pages_per_query: self.pages_per_query,
            concurrency_cap: self.concurrency_cap,
            output_dir: self.output_dir,
            fetch_timeout: self.fetch_timeout,
        })
    }
}
