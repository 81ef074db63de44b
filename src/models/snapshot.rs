//! Sensor snapshot model.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Payload key carrying the unit of the snapshot's readings.
pub const UNIT_KEY: &str = "unit";

/// Source tag for the synthetic snapshot used when no input exists.
pub const DEFAULT_SOURCE: &str = "default";

/// A single payload value: a numeric reading or string metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadValue {
    Number(f64),
    Text(String),
}

impl PayloadValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PayloadValue::Number(n) => Some(*n),
            PayloadValue::Text(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            PayloadValue::Number(_) => "number",
            PayloadValue::Text(_) => "string",
        }
    }
}

impl fmt::Display for PayloadValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadValue::Number(n) => write!(f, "{}", n),
            PayloadValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for PayloadValue {
    fn from(n: f64) -> Self {
        PayloadValue::Number(n)
    }
}

impl From<&str> for PayloadValue {
    fn from(s: &str) -> Self {
        PayloadValue::Text(s.to_string())
    }
}

pub type Payload = BTreeMap<String, PayloadValue>;

/// One point-in-time reading batch from a sensor or upstream system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub source: String,
    pub timestamp: String,
    pub payload: Payload,
}

impl SensorSnapshot {
    /// Synthetic snapshot returned when the input resource is absent.
    pub fn empty_default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            timestamp: super::now_timestamp(),
            payload: Payload::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&PayloadValue> {
        self.payload.get(field)
    }

    /// Unit metadata for the payload, if present.
    pub fn unit(&self) -> Option<String> {
        self.payload.get(UNIT_KEY).map(|u| u.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_value_untagged() {
        let payload: Payload =
            serde_json::from_value(json!({"temperature": 50, "unit": "celsius"})).unwrap();
        assert_eq!(payload["temperature"], PayloadValue::Number(50.0));
        assert_eq!(payload["unit"], PayloadValue::from("celsius"));
    }

    #[test]
    fn test_payload_rejects_bool() {
        let result = serde_json::from_value::<Payload>(json!({"door_open": true}));
        assert!(result.is_err());
    }

    #[test]
    fn test_unit_rendering() {
        let mut snapshot = SensorSnapshot::empty_default();
        assert_eq!(snapshot.unit(), None);

        snapshot.payload.insert(UNIT_KEY.to_string(), "kPa".into());
        assert_eq!(snapshot.unit().as_deref(), Some("kPa"));

        snapshot.payload.insert(UNIT_KEY.to_string(), PayloadValue::Number(3.0));
        assert_eq!(snapshot.unit().as_deref(), Some("3"));
    }

    #[test]
    fn test_empty_default() {
        let snapshot = SensorSnapshot::empty_default();
        assert_eq!(snapshot.source, "default");
        assert!(snapshot.is_empty());
        assert!(chrono::DateTime::parse_from_rfc3339(&snapshot.timestamp).is_ok());
    }
}
