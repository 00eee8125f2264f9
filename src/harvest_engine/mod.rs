//! Harvest Engine Module
//!
//! This module contains the core coordination logic of the harvester: the
//! per-query orchestrator (bounded fan-out, completion-order fan-in), the
//! batch driver that sequences queries over one shared limiter, the progress
//! reporting seam, and the engine's data and error types.

pub mod batch;
pub mod orchestrator;
pub mod progress;
pub mod types;

pub use batch::{QueryReport, run_batch};
pub use orchestrator::run_query;
pub use progress::{LogProgress, NoOpProgress, ProgressReporter};
pub use types::{FetchError, PageResult, PlaceRecord, QueryError, QueryOutcome};
