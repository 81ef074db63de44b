//! End-to-end pipeline tests against a temporary data directory.

use std::fs;
use std::path::Path;

use serde_json::{json, Value};
use sensor_pipeline_core::models::{BatchStatus, TokenKind};
use sensor_pipeline_core::storage::read_batch;
use sensor_pipeline_core::{run_pipeline, PipelineConfig, PipelineResult, PipelineRunner};

fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn rules_doc() -> Value {
    json!({
        "rules": [
            {"rule_id": "temp-normal", "type": "range", "field": "temperature",
             "min": 0, "max": 100, "confidence": 0.9, "status": "stable"},
            {"rule_id": "temp-hot", "type": "range", "field": "temperature",
             "min": 80, "max": 200, "confidence": 0.7, "status": "stable"},
            {"rule_id": "temp-draft", "type": "range", "field": "temperature",
             "min": 0, "max": 100, "confidence": 0.6, "status": "draft"},
            {"rule_id": "pressure-no-confidence", "type": "range", "field": "pressure",
             "min": 0, "max": 10, "status": "stable"},
            {"rule_id": "humidity", "type": "range", "field": "humidity",
             "min": 30, "max": 60, "confidence": 0.5, "status": "stable"}
        ]
    })
}

#[test]
fn test_full_run_writes_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::with_data_dir(dir.path());
    write_json(
        &config.snapshot_path,
        &json!({
            "source": "line-3/plc",
            "timestamp": "2026-05-04T10:30:00Z",
            "payload": {"temperature": 50, "pressure": 4.2, "humidity": 45, "unit": "celsius"}
        }),
    );
    write_json(&config.rules_path, &rules_doc());

    let result = run_pipeline(&config);

    let (tokens_generated, details) = match &result {
        PipelineResult::Success {
            tokens_generated,
            details,
            ..
        } => (*tokens_generated, details.clone()),
        PipelineResult::Error { error } => panic!("pipeline failed: {}", error),
    };

    assert_eq!(tokens_generated, 2);
    assert_eq!(details.status, BatchStatus::Success);

    let first = &details.tokens[0];
    assert_eq!(first.kind, TokenKind::Range);
    assert_eq!(first.field, "temperature_celsius");
    assert_eq!(first.value, (49.0, 51.0));
    assert_eq!(first.confidence, 0.9);

    let second = &details.tokens[1];
    assert_eq!(second.field, "humidity_celsius");
    assert_eq!(second.value, (44.0, 46.0));

    // What was written is exactly what was returned.
    let persisted = read_batch(&config.output_path).unwrap();
    assert_eq!(persisted, details);
    assert_ne!(persisted.timestamp, "2026-05-04T10:30:00Z");
}

#[test]
fn test_absent_snapshot_is_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::with_data_dir(dir.path());
    write_json(&config.rules_path, &rules_doc());

    let result = PipelineRunner::new(&config).run();
    assert_eq!(result.status(), "success");

    let batch = result.batch().unwrap();
    assert_eq!(batch.status, BatchStatus::NoData);
    assert!(batch.tokens.is_empty());

    let persisted: Value =
        serde_json::from_str(&fs::read_to_string(&config.output_path).unwrap()).unwrap();
    assert_eq!(persisted["status"], json!("no_data"));
    assert_eq!(persisted["entity"], json!("sensor_reading"));
}

#[test]
fn test_absent_rules_is_empty_success() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::with_data_dir(dir.path());
    write_json(
        &config.snapshot_path,
        &json!({"source": "s", "timestamp": "2026-05-04T10:30:00", "payload": {"temperature": 5}}),
    );

    let result = PipelineRunner::new(&config).run();
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["status"], json!("success"));
    assert_eq!(value["tokens_generated"], json!(0));
    assert_eq!(value["details"]["tokens"], json!([]));
    assert_eq!(value["details"]["status"], json!("success"));
}

#[test]
fn test_schema_violation_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::with_data_dir(dir.path());
    write_json(
        &config.snapshot_path,
        &json!({"source": "s", "payload": {"temperature": 5}}),
    );

    let value = serde_json::to_value(PipelineRunner::new(&config).run()).unwrap();
    assert_eq!(value["status"], json!("error"));
    assert!(value["error"].as_str().unwrap().contains("timestamp"));
    assert!(value.get("details").is_none());
}

#[test]
fn test_bad_rules_wrapper_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::with_data_dir(dir.path());
    write_json(
        &config.snapshot_path,
        &json!({"source": "s", "timestamp": "2026-05-04T10:30:00Z", "payload": {"temperature": 5}}),
    );
    write_json(&config.rules_path, &json!({"rules": "temperature"}));

    let result = PipelineRunner::new(&config).run();
    assert!(!result.is_success());
    assert!(!config.output_path.exists());
}

#[test]
fn test_output_directory_created() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("fresh/data");
    let config = PipelineConfig::with_data_dir(&data_dir);

    let result = PipelineRunner::new(&config).run();
    assert!(result.is_success());
    assert!(data_dir.join("semantic_tokens.json").exists());
}
