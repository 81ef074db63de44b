//! Pipeline runner.
//!
//! Runs ingest -> load rules -> generate -> write, and converts the outcome
//! into a [`PipelineResult`]. Nothing below this boundary is allowed to
//! escape as an error: the caller always receives a well-formed result.

use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::ingest::{Ingestor, RuleLoader};
use crate::models::TokenBatch;
use crate::storage::TokenWriter;
use crate::tokens::generate_tokens;

use super::context::RunContext;

/// Invocation result handed back to the external caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PipelineResult {
    Success {
        tokens_generated: usize,
        timestamp: String,
        details: TokenBatch,
    },
    Error {
        error: String,
    },
}

impl PipelineResult {
    fn from_batch(batch: TokenBatch) -> Self {
        PipelineResult::Success {
            tokens_generated: batch.token_count(),
            timestamp: batch.timestamp.clone(),
            details: batch,
        }
    }

    fn from_error(err: &PipelineError) -> Self {
        PipelineResult::Error {
            error: err.to_string(),
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            PipelineResult::Success { .. } => "success",
            PipelineResult::Error { .. } => "error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PipelineResult::Success { .. })
    }

    /// The generated batch, if the run succeeded.
    pub fn batch(&self) -> Option<&TokenBatch> {
        match self {
            PipelineResult::Success { details, .. } => Some(details),
            PipelineResult::Error { .. } => None,
        }
    }
}

/// Sequences the pipeline stages for one data directory.
#[derive(Debug, Clone)]
pub struct PipelineRunner {
    ingestor: Ingestor,
    rule_loader: RuleLoader,
    writer: TokenWriter,
}

impl PipelineRunner {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            ingestor: Ingestor::new(&config.snapshot_path),
            rule_loader: RuleLoader::new(&config.rules_path),
            writer: TokenWriter::new(&config.output_path),
        }
    }

    /// Run one invocation. Never fails: errors become `PipelineResult::Error`.
    pub fn run(&self) -> PipelineResult {
        let ctx = RunContext::new();
        let log_ctx = ctx.log_context();

        log::info!(
            "{} PIPELINE_START snapshot={} rules={} output={}",
            log_ctx,
            self.ingestor.path().display(),
            self.rule_loader.path().display(),
            self.writer.path().display()
        );

        match self.run_stages(&ctx) {
            Ok(batch) => {
                log::info!(
                    "{} PIPELINE_COMPLETE status={} tokens={} elapsed_ms={}",
                    log_ctx,
                    batch.status.as_str(),
                    batch.token_count(),
                    ctx.elapsed_ms()
                );
                PipelineResult::from_batch(batch)
            }
            Err(e) => {
                log::error!(
                    "{} PIPELINE_FAILED kind={} error={}",
                    log_ctx,
                    e.kind(),
                    e
                );
                PipelineResult::from_error(&e)
            }
        }
    }

    fn run_stages(&self, ctx: &RunContext) -> Result<TokenBatch> {
        let snapshot = self.ingestor.ingest(&ctx.stage("ingest"))?;
        let rules = self.rule_loader.load_rules(&ctx.stage("load_rules"))?;
        let batch = generate_tokens(&snapshot, &rules, &ctx.stage("generate"))?;
        self.writer.write(&batch, &ctx.stage("write"))?;
        Ok(batch)
    }
}
