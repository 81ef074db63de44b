//! Range tokens and the batch envelope written to storage.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Fixed widening applied on each side of a matched value.
pub const RANGE_MARGIN: f64 = 1.0;

/// Unit suffix used when the payload carries no unit.
pub const UNKNOWN_UNIT: &str = "unknown";

/// Entity tag of every batch.
pub const SENSOR_ENTITY: &str = "sensor_reading";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    #[serde(rename = "RANGE")]
    Range,
}

/// A range-qualified field observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeToken {
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub field: String,
    pub value: (f64, f64),
    pub confidence: f64,
}

impl RangeToken {
    /// Build a token around a matched value.
    ///
    /// Fails if `confidence` is outside [0.0, 1.0].
    pub fn around(field: &str, unit: Option<&str>, value: f64, confidence: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(PipelineError::evaluation(format!(
                "token confidence {} for field {} outside [0.0, 1.0]",
                confidence, field
            )));
        }

        Ok(Self {
            kind: TokenKind::Range,
            field: token_field_name(field, unit),
            value: (value - RANGE_MARGIN, value + RANGE_MARGIN),
            confidence,
        })
    }
}

/// `{field}_{unit}`, with `unknown` standing in for a missing unit.
pub fn token_field_name(field: &str, unit: Option<&str>) -> String {
    format!("{}_{}", field, unit.unwrap_or(UNKNOWN_UNIT))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Success,
    NoData,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Success => "success",
            BatchStatus::NoData => "no_data",
        }
    }
}

/// All tokens produced by one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBatch {
    pub entity: String,
    pub tokens: Vec<RangeToken>,
    /// Generation time, not the snapshot's capture time.
    pub timestamp: String,
    pub status: BatchStatus,
}

impl TokenBatch {
    pub fn success(tokens: Vec<RangeToken>) -> Self {
        Self::with_status(tokens, BatchStatus::Success)
    }

    pub fn no_data() -> Self {
        Self::with_status(Vec::new(), BatchStatus::NoData)
    }

    fn with_status(tokens: Vec<RangeToken>, status: BatchStatus) -> Self {
        Self {
            entity: SENSOR_ENTITY.to_string(),
            tokens,
            timestamp: super::now_timestamp(),
            status,
        }
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_around() {
        let token = RangeToken::around("temperature", Some("celsius"), 50.0, 0.9).unwrap();
        assert_eq!(token.kind, TokenKind::Range);
        assert_eq!(token.field, "temperature_celsius");
        assert_eq!(token.value, (49.0, 51.0));
        assert_eq!(token.confidence, 0.9);
    }

    #[test]
    fn test_token_unknown_unit() {
        assert_eq!(token_field_name("pressure", None), "pressure_unknown");
    }

    #[test]
    fn test_token_rejects_confidence_out_of_range() {
        let err = RangeToken::around("temperature", None, 1.0, 1.2).unwrap_err();
        assert!(matches!(err, PipelineError::Evaluation(_)));
        assert!(RangeToken::around("temperature", None, 1.0, -0.1).is_err());
        assert!(RangeToken::around("temperature", None, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_batch_serialized_shape() {
        let token = RangeToken::around("temperature", Some("celsius"), 50.0, 0.9).unwrap();
        let batch = TokenBatch::success(vec![token]);
        let value = serde_json::to_value(&batch).unwrap();

        assert_eq!(value["entity"], json!("sensor_reading"));
        assert_eq!(value["status"], json!("success"));
        assert_eq!(
            value["tokens"][0],
            json!({
                "type": "RANGE",
                "field": "temperature_celsius",
                "value": [49.0, 51.0],
                "confidence": 0.9
            })
        );
    }

    #[test]
    fn test_no_data_batch() {
        let batch = TokenBatch::no_data();
        assert_eq!(batch.status, BatchStatus::NoData);
        assert_eq!(batch.token_count(), 0);
        assert_eq!(serde_json::to_value(batch.status).unwrap(), json!("no_data"));
    }
}
