//! Pipeline configuration.
//!
//! Resolves the data directory and log level from the environment. The
//! pipeline stages themselves only ever see the resulting paths.

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;

pub const DATA_DIR_ENV: &str = "DATA_DIR";
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

pub const DEFAULT_DATA_DIR: &str = "data";
pub const SNAPSHOT_FILE: &str = "realtime_data.json";
pub const RULES_FILE: &str = "rules.json";
pub const OUTPUT_FILE: &str = "semantic_tokens.json";

/// Locations of the three pipeline resources plus the log level.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub snapshot_path: PathBuf,
    pub rules_path: PathBuf,
    pub output_path: PathBuf,
    pub log_level: LevelFilter,
}

impl PipelineConfig {
    /// Standard file layout under `data_dir`.
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            snapshot_path: data_dir.join(SNAPSHOT_FILE),
            rules_path: data_dir.join(RULES_FILE),
            output_path: data_dir.join(OUTPUT_FILE),
            data_dir,
            log_level: LevelFilter::Info,
        }
    }

    /// Read `DATA_DIR` and `LOG_LEVEL` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup(DATA_DIR_ENV)
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());

        let log_level = lookup(LOG_LEVEL_ENV)
            .map(|lvl| parse_log_level(&lvl))
            .unwrap_or(LevelFilter::Info);

        Self::with_data_dir(data_dir).log_level(log_level)
    }

    pub fn log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::with_data_dir(DEFAULT_DATA_DIR)
    }
}

/// Parse a level name case-insensitively. Python-style `WARNING` and
/// `CRITICAL` are accepted; anything unknown falls back to info.
pub fn parse_log_level(value: &str) -> LevelFilter {
    match value.trim().to_ascii_lowercase().as_str() {
        "warning" => LevelFilter::Warn,
        "critical" | "fatal" => LevelFilter::Error,
        other => LevelFilter::from_str(other).unwrap_or(LevelFilter::Info),
    }
}
