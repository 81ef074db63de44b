//! Sensor Pipeline Core - rule-driven semantic token generation
//!
//! This crate turns one raw sensor snapshot into a batch of validated
//! "semantic tokens" by matching numeric payload fields against configured
//! range rules, then persists the batch. It is the core invoked by an
//! external agent tool wrapper, optionally exposed to Python via PyO3.
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `pipeline` - Run orchestration and the caller-facing result
//! - `ingest` - Snapshot and rule set readers
//! - `validation` - Snapshot and rule schema checks
//! - `tokens` - Rule evaluation and token generation
//! - `storage` - Token batch persistence
//! - `models` - Snapshot, rule and token records
//! - `config` - Data directory and log level resolution
//! - `logging` - Structured logging with run context
//! - `error` - Fatal error taxonomy

#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use pyo3::types::{PyDict, PyList};

pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod storage;
pub mod tokens;
pub mod validation;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use pipeline::runner::{PipelineResult, PipelineRunner};

use log::LevelFilter;

/// Initialize the module-level logger
pub fn init_logger(level: LevelFilter) {
    let _ = env_logger::builder()
        .filter_level(level)
        .format_timestamp_millis()
        .try_init();
}

/// Run the pipeline once against `config`.
///
/// Always returns a result record; failures are reported as
/// `PipelineResult::Error`.
pub fn run_pipeline(config: &PipelineConfig) -> PipelineResult {
    init_logger(config.log_level);
    PipelineRunner::new(config).run()
}

/// Run the pipeline from Python.
///
/// # Arguments
/// * `data_dir` - Data directory; defaults to `DATA_DIR` or `data`
///
/// # Returns
/// Dict with `status`, and either `tokens_generated`, `timestamp` and
/// `details`, or `error`.
#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "run_pipeline", signature = (data_dir=None))]
fn py_run_pipeline(py: Python<'_>, data_dir: Option<String>) -> PyResult<Py<PyAny>> {
    let config = match data_dir {
        Some(dir) => PipelineConfig::with_data_dir(dir).log_level(PipelineConfig::from_env().log_level),
        None => PipelineConfig::from_env(),
    };

    let result = py.allow_threads(|| run_pipeline(&config));

    let py_result = PyDict::new(py);
    py_result.set_item("status", result.status())?;

    match &result {
        PipelineResult::Success {
            tokens_generated,
            timestamp,
            details,
        } => {
            py_result.set_item("tokens_generated", *tokens_generated)?;
            py_result.set_item("timestamp", timestamp)?;

            let details_dict = PyDict::new(py);
            details_dict.set_item("entity", &details.entity)?;
            details_dict.set_item("timestamp", &details.timestamp)?;
            details_dict.set_item("status", details.status.as_str())?;

            let tokens_list = PyList::empty(py);
            for token in &details.tokens {
                let token_dict = PyDict::new(py);
                token_dict.set_item("type", "RANGE")?;
                token_dict.set_item("field", &token.field)?;
                token_dict.set_item("value", token.value)?;
                token_dict.set_item("confidence", token.confidence)?;
                tokens_list.append(token_dict)?;
            }
            details_dict.set_item("tokens", tokens_list)?;

            py_result.set_item("details", details_dict)?;
        }
        PipelineResult::Error { error } => {
            py_result.set_item("error", error)?;
        }
    }

    Ok(py_result.into())
}

/// Python module definition
#[cfg(feature = "python")]
#[pymodule]
fn sensor_pipeline_core(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_run_pipeline, m)?)?;
    Ok(())
}
