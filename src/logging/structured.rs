//! Structured logging utilities.
//!
//! Log lines follow `<context> EVENT_NAME key=value ...`, where the context
//! renders as `[run=...]` or `[run=...] [stage=...]`.

use std::fmt;

/// Logging context for one pipeline run.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub run_id: String,
    pub stage: Option<&'static str>,
}

impl LogContext {
    pub fn new(run_id: &str) -> Self {
        Self {
            run_id: run_id.to_string(),
            stage: None,
        }
    }

    pub fn with_stage(&self, stage: &'static str) -> Self {
        Self {
            run_id: self.run_id.clone(),
            stage: Some(stage),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage {
            Some(stage) => write!(f, "[run={}] [stage={}]", self.run_id, stage),
            None => write!(f, "[run={}]", self.run_id),
        }
    }
}
