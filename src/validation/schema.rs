//! Snapshot and rule schema validation.
//!
//! Raw JSON is inspected before being turned into typed records so that
//! violations name the offending key instead of a generic serde error.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::error::{PipelineError, Result, RuleViolation};
use crate::logging::structured::LogContext;
use crate::models::{Rule, SensorSnapshot};

/// Key holding the rule collection in the rules resource.
pub const RULES_KEY: &str = "rules";

/// Validate a parsed snapshot document.
pub fn validate_snapshot(doc: Value, path: &Path, ctx: &LogContext) -> Result<SensorSnapshot> {
    let obj = doc
        .as_object()
        .ok_or_else(|| PipelineError::schema(path, format!("expected object, got {}", json_type(&doc))))?;

    check_payload_types(obj).map_err(|msg| PipelineError::schema(path, msg))?;

    let snapshot: SensorSnapshot =
        serde_json::from_value(doc).map_err(|e| PipelineError::schema(path, e.to_string()))?;

    if !is_iso8601(&snapshot.timestamp) {
        return Err(PipelineError::schema(
            path,
            format!("timestamp {:?} is not ISO-8601", snapshot.timestamp),
        ));
    }

    log::debug!(
        "{} SNAPSHOT_VALID source={} fields={}",
        ctx,
        snapshot.source,
        snapshot.payload.len()
    );

    Ok(snapshot)
}

/// Payload values must be numbers or strings.
fn check_payload_types(obj: &Map<String, Value>) -> std::result::Result<(), String> {
    let Some(payload) = obj.get("payload") else {
        // Reported as a missing field by serde.
        return Ok(());
    };

    let entries = payload
        .as_object()
        .ok_or_else(|| format!("payload: expected object, got {}", json_type(payload)))?;

    for (key, value) in entries {
        if !(value.is_number() || value.is_string()) {
            return Err(format!(
                "payload.{}: expected number or string, got {}",
                key,
                json_type(value)
            ));
        }
    }
    Ok(())
}

/// Validate a single rule record.
pub fn validate_rule(index: usize, record: &Value) -> std::result::Result<Rule, RuleViolation> {
    let rule_id = record
        .get("rule_id")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    if !record.is_object() {
        return Err(RuleViolation::new(
            index,
            None,
            format!("expected object, got {}", json_type(record)),
        ));
    }

    let rule: Rule = serde_json::from_value(record.clone())
        .map_err(|e| RuleViolation::new(index, rule_id.clone(), e.to_string()))?;

    if rule.rule_id.trim().is_empty() {
        return Err(RuleViolation::new(index, None, "rule_id is empty"));
    }
    if rule.field.trim().is_empty() {
        return Err(RuleViolation::new(index, rule_id, "field is empty"));
    }
    if !(0.0..=1.0).contains(&rule.confidence) {
        return Err(RuleViolation::new(
            index,
            rule_id,
            format!("confidence {} outside [0.0, 1.0]", rule.confidence),
        ));
    }

    Ok(rule)
}

/// Outcome of validating a rule collection.
#[derive(Debug, Default)]
pub struct RuleSetValidation {
    /// Valid rules in input order.
    pub rules: Vec<Rule>,
    pub rejected: Vec<RuleViolation>,
}

/// Validate the rules document.
///
/// A missing or mistyped `rules` key is fatal. Individual records that fail
/// validation, or repeat an earlier `rule_id`, are logged and dropped.
pub fn validate_rule_set(doc: &Value, path: &Path, ctx: &LogContext) -> Result<RuleSetValidation> {
    let records = doc
        .get(RULES_KEY)
        .ok_or_else(|| PipelineError::schema(path, format!("missing field `{}`", RULES_KEY)))?
        .as_array()
        .ok_or_else(|| PipelineError::schema(path, format!("`{}` must be an array", RULES_KEY)))?;

    let mut result = RuleSetValidation::default();
    let mut seen: HashSet<String> = HashSet::new();

    for (index, record) in records.iter().enumerate() {
        let rule = match validate_rule(index, record) {
            Ok(rule) => rule,
            Err(violation) => {
                log::warn!("{} RULE_REJECTED {}", ctx, violation);
                result.rejected.push(violation);
                continue;
            }
        };

        if !seen.insert(rule.rule_id.clone()) {
            let violation =
                RuleViolation::new(index, Some(rule.rule_id.clone()), "duplicate rule_id");
            log::warn!("{} RULE_REJECTED {}", ctx, violation);
            result.rejected.push(violation);
            continue;
        }

        if rule.min > rule.max {
            log::warn!(
                "{} RULE_INVERTED_BOUNDS rule_id={} min={} max={}",
                ctx,
                rule.rule_id,
                rule.min,
                rule.max
            );
        }

        result.rules.push(rule);
    }

    log::info!(
        "{} RULES_VALIDATED accepted={} rejected={}",
        ctx,
        result.rules.len(),
        result.rejected.len()
    );

    Ok(result)
}

/// Date-time layouts accepted without a zone designator.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

/// ISO-8601 date or date-time, extended or basic format.
///
/// Date-times may carry `Z`, `+hh:mm` or `+hhmm`, or no zone at all.
pub fn is_iso8601(ts: &str) -> bool {
    if DateTime::parse_from_rfc3339(ts).is_ok() {
        return true;
    }

    let local = ts.strip_suffix(['Z', 'z']).unwrap_or(ts);
    let naive = |s: &str| {
        DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
    };
    if naive(local) {
        return true;
    }

    let with_offset = DATETIME_FORMATS.iter().any(|fmt| {
        ["%z", "%:z"].iter().any(|zone| {
            DateTime::parse_from_str(ts, &format!("{}{}", fmt, zone)).is_ok()
        })
    });
    if with_offset {
        return true;
    }

    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(ts, fmt).is_ok())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
