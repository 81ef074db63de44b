//! Structured logging with run context.
//!
//! Every log line emitted by a pipeline run carries the run id, and the
//! stage name once a stage is underway.

pub mod structured;

pub use structured::*;
