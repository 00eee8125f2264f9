//! Core types for harvest operations.
//!
//! This module contains the fundamental types used throughout the harvester:
//! decoded place records, per-page results, per-query outcomes, and the
//! error taxonomy.

use serde::{Deserialize, Serialize};

use crate::sink::SinkError;

/// A single point-of-interest record decoded from one page entry.
///
/// `id` is unique within one query's result set, but not globally.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    #[serde(rename = "poiid")]
    pub id: String,
    pub title: String,
    #[serde(rename = "lat", deserialize_with = "f64_or_string")]
    pub latitude: f64,
    #[serde(rename = "lon", deserialize_with = "f64_or_string")]
    pub longitude: f64,
}

/// The remote API serves coordinates as JSON numbers on most pages and as
/// numeric strings near the end of a result set. Accept both.
fn f64_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Coordinate {
        Number(f64),
        Text(String),
    }

    match Coordinate::deserialize(deserializer)? {
        Coordinate::Number(value) => Ok(value),
        Coordinate::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Result of fetching one page: zero or more records.
///
/// An empty page is the source's natural end-of-data signal, not an error.
/// Consumed exactly once by the orchestrator's drain loop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResult {
    pub records: Vec<PlaceRecord>,
}

impl PageResult {
    #[must_use]
    pub fn new(records: Vec<PlaceRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of records on this page.
    #[must_use]
    pub fn count(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Aggregated result of one query across all its pages.
///
/// Created empty at query start and mutated only by the orchestrator's drain
/// loop, so no synchronization is needed on the counters.
#[derive(Debug, Clone, Default)]
pub struct QueryOutcome {
    /// The query string this outcome belongs to.
    pub query: String,
    /// All records collected across successful pages, in completion order.
    /// Completion order is the only ordering guarantee; it does not reflect
    /// page numbers.
    pub records: Vec<PlaceRecord>,
    /// Cumulative record count across completed pages.
    pub total_records: usize,
    /// Pages that resolved successfully (including empty pages).
    pub completed_pages: u32,
    /// Pages that failed and were skipped.
    pub skipped_pages: u32,
}

impl QueryOutcome {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Total pages that have resolved, successfully or as skips.
    #[must_use]
    pub fn resolved_pages(&self) -> u32 {
        self.completed_pages + self.skipped_pages
    }
}

/// Failure of a single page fetch. Always recoverable locally: the page is
/// counted as skipped and the query continues.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, task fault).
    #[error("request failed: {0}")]
    Request(String),
    /// The endpoint answered with a non-success status.
    #[error("unexpected http status {0}")]
    Status(u16),
    /// The response body could not be decoded into the expected shape.
    #[error("decode failed: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// Failure of a whole query, arising outside the per-page boundary.
/// Recoverable at the batch level: the query is recorded as failed and
/// sibling queries are unaffected.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The query task itself faulted (e.g. panicked).
    #[error("query task failed: {0}")]
    Task(String),
    /// The finalized outcome could not be persisted.
    #[error("sink write failed: {0}")]
    Sink(#[from] SinkError),
}
