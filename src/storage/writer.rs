//! Token batch persistence.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};
use crate::logging::structured::LogContext;
use crate::models::TokenBatch;

/// Writes each batch over the previous one at a fixed path.
#[derive(Debug, Clone)]
pub struct TokenWriter {
    path: PathBuf,
}

impl TokenWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `batch` atomically (write temp file, then rename).
    ///
    /// Missing parent directories are created.
    pub fn write(&self, batch: &TokenBatch, ctx: &LogContext) -> Result<()> {
        let json = serde_json::to_string_pretty(batch)
            .map_err(|e| PipelineError::write(&self.path, format!("serialize: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    PipelineError::write(&self.path, format!("create {}: {}", parent.display(), e))
                })?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let persisted = fs::write(&tmp_path, json.as_bytes())
            .and_then(|()| fs::rename(&tmp_path, &self.path));

        if let Err(e) = persisted {
            // A partial temp file must not outlive a failed write.
            let _ = fs::remove_file(&tmp_path);
            return Err(PipelineError::write(&self.path, e.to_string()));
        }

        log::info!(
            "{} BATCH_WRITTEN path={} tokens={} status={}",
            ctx,
            self.path.display(),
            batch.token_count(),
            batch.status.as_str()
        );

        Ok(())
    }
}

/// Read a persisted batch back.
pub fn read_batch(path: &Path) -> Result<TokenBatch> {
    let content = fs::read_to_string(path).map_err(|e| PipelineError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| PipelineError::malformed(path, e.to_string()))
}
