//! Shared JSON resource reading.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;

use crate::error::{PipelineError, Result};

/// Read and parse a JSON resource.
///
/// Returns `Ok(None)` when the resource does not exist.
pub fn read_json(path: &Path) -> Result<Option<Value>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(PipelineError::Read {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    // Invalid UTF-8 surfaces here as a parse error, not a read error.
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| PipelineError::malformed(path, e.to_string()))
}
