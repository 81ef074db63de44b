//! Sensor snapshot ingestion.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::logging::structured::LogContext;
use crate::models::SensorSnapshot;
use crate::validation::schema::validate_snapshot;

use super::reader::read_json;

/// Reads one sensor snapshot per call. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct Ingestor {
    path: PathBuf,
}

impl Ingestor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the snapshot.
    ///
    /// An absent resource yields [`SensorSnapshot::empty_default`]. Unparseable
    /// content and schema violations are returned as errors.
    pub fn ingest(&self, ctx: &LogContext) -> Result<SensorSnapshot> {
        let Some(doc) = read_json(&self.path)? else {
            log::warn!(
                "{} SNAPSHOT_ABSENT path={} using_default=true",
                ctx,
                self.path.display()
            );
            return Ok(SensorSnapshot::empty_default());
        };

        let snapshot = validate_snapshot(doc, &self.path, ctx)?;

        log::info!(
            "{} SNAPSHOT_INGESTED source={} timestamp={} fields={}",
            ctx,
            snapshot.source,
            snapshot.timestamp,
            snapshot.payload.len()
        );

        Ok(snapshot)
    }
}
