//! Persistence of finalized query results
//!
//! The engine hands each finished query's record list to a `RecordSink`; the
//! on-disk schema (delimiters, quoting) is the sink's business, not the
//! engine's. The default sink writes one CSV file per query.

use std::fs;
use std::path::{Path, PathBuf};

use crate::harvest_engine::types::PlaceRecord;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Persists one query's aggregated records.
pub trait RecordSink: Send + Sync {
    /// Writes the records for `query` and returns the path written.
    fn write(&self, query: &str, records: &[PlaceRecord]) -> Result<PathBuf, SinkError>;
}

/// Writes `{query}_place.csv` into the output directory, one row per record
/// with columns `poiid,title,lat,lon`.
///
/// Rows appear in the order the engine aggregated them, which is page
/// completion order and therefore not stable across runs.
#[derive(Debug, Clone)]
pub struct CsvSink {
    output_dir: PathBuf,
}

impl CsvSink {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl RecordSink for CsvSink {
    fn write(&self, query: &str, records: &[PlaceRecord]) -> Result<PathBuf, SinkError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{query}_place.csv"));

        // Header is written explicitly so an all-skipped query still leaves
        // a well-formed file behind.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)?;
        writer.write_record(["poiid", "title", "lat", "lon"])?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        Ok(path)
    }
}
