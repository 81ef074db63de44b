//! Pipeline orchestration module.
//!
//! Sequences the four stages of one invocation:
//! - Snapshot ingestion
//! - Rule loading
//! - Token generation
//! - Batch persistence

pub mod context;
pub mod runner;

pub use context::*;
pub use runner::*;
