//! Schema validation module.
//!
//! Shape checks for the two input resources:
//! - Sensor snapshot: all-or-nothing, any violation is fatal
//! - Rule set: wrapper must be well formed, individual rules are dropped
//!   when invalid

pub mod schema;

pub use schema::*;
