//! Error types for the sensor token pipeline.
//!
//! Every variant here is fatal to a single invocation. Resources that are
//! simply absent are not errors: the readers return safe defaults instead.
//! Individually invalid rules are reported as [`RuleViolation`] values and
//! dropped by the loader without ever becoming a `PipelineError`.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Fatal pipeline failure.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Content is not parseable as JSON at all.
    #[error("Malformed input in {path}: {message}")]
    MalformedInput { path: PathBuf, message: String },

    /// JSON parsed but does not match the expected shape.
    #[error("Schema violation in {path}: {message}")]
    SchemaViolation { path: PathBuf, message: String },

    /// Input resource exists but could not be read.
    #[error("Read error for {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Token batch could not be persisted.
    #[error("Write error for {path}: {message}")]
    Write { path: PathBuf, message: String },

    /// Unexpected failure while evaluating rules.
    #[error("Evaluation error: {0}")]
    Evaluation(String),
}

impl PipelineError {
    pub fn malformed(path: &Path, msg: impl Into<String>) -> Self {
        PipelineError::MalformedInput {
            path: path.to_path_buf(),
            message: msg.into(),
        }
    }

    pub fn schema(path: &Path, msg: impl Into<String>) -> Self {
        PipelineError::SchemaViolation {
            path: path.to_path_buf(),
            message: msg.into(),
        }
    }

    pub fn write(path: &Path, msg: impl Into<String>) -> Self {
        PipelineError::Write {
            path: path.to_path_buf(),
            message: msg.into(),
        }
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        PipelineError::Evaluation(msg.into())
    }

    /// Short machine-readable kind, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::MalformedInput { .. } => "malformed_input",
            PipelineError::SchemaViolation { .. } => "schema_violation",
            PipelineError::Read { .. } => "read",
            PipelineError::Write { .. } => "write",
            PipelineError::Evaluation(_) => "evaluation",
        }
    }
}

/// Result type alias for pipeline stages.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// A single rule record that failed validation.
///
/// Non-fatal: the loader logs it and moves on to the next record.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleViolation {
    /// Position of the record in the input `rules` array.
    pub index: usize,
    /// `rule_id` if the record had a readable one.
    pub rule_id: Option<String>,
    pub reason: String,
}

impl RuleViolation {
    pub fn new(index: usize, rule_id: Option<String>, reason: impl Into<String>) -> Self {
        Self {
            index,
            rule_id,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rule_id {
            Some(id) => write!(f, "rule[{}] ({}): {}", self.index, id, self.reason),
            None => write!(f, "rule[{}]: {}", self.index, self.reason),
        }
    }
}
