//! Pipeline run context.
//!
//! Provides the run id and stage contexts used for log correlation.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::logging::structured::LogContext;

/// Context for a single pipeline invocation.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
}

impl RunContext {
    pub fn new() -> Self {
        let run_id = format!("run-{}", &Uuid::new_v4().to_string()[..8]);

        Self {
            run_id,
            started_at: Utc::now(),
        }
    }

    pub fn log_context(&self) -> LogContext {
        LogContext::new(&self.run_id)
    }

    /// Log context for one named stage of this run.
    pub fn stage(&self, stage: &'static str) -> LogContext {
        self.log_context().with_stage(stage)
    }

    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.started_at).num_milliseconds()
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
