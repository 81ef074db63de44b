//! Storage module.
//!
//! Persists token batches as indented JSON in the data directory.

pub mod writer;

pub use writer::*;
