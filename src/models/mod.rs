//! Pipeline data model.
//!
//! Records read from and written to the data directory:
//! - `SensorSnapshot` - one point-in-time sensor reading batch
//! - `Rule` - a configured numeric range condition
//! - `RangeToken` / `TokenBatch` - derived tokens and their envelope

pub mod rule;
pub mod snapshot;
pub mod token;

pub use rule::*;
pub use snapshot::*;
pub use token::*;

use chrono::{SecondsFormat, Utc};

/// Current time as an RFC 3339 UTC string.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
