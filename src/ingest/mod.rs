//! Input stage readers.
//!
//! - `Ingestor` - reads the sensor snapshot
//! - `RuleLoader` - reads the rule set
//!
//! Both treat an absent resource as a normal, empty input.

pub mod reader;
pub mod rules;
pub mod snapshot;

pub use reader::*;
pub use rules::*;
pub use snapshot::*;
