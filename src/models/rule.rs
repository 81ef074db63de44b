//! Rule model.

use serde::{Deserialize, Serialize};

/// Lifecycle tag of a rule. Only `Stable` rules are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    Stable,
    Draft,
    Deprecated,
    Retired,
}

impl RuleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleStatus::Stable => "stable",
            RuleStatus::Draft => "draft",
            RuleStatus::Deprecated => "deprecated",
            RuleStatus::Retired => "retired",
        }
    }
}

/// A numeric range condition on one payload field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub rule_id: String,
    /// Classification tag, carried through untouched.
    #[serde(rename = "type")]
    pub rule_type: String,
    pub field: String,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
    pub confidence: f64,
    pub status: RuleStatus,
}

impl Rule {
    pub fn is_stable(&self) -> bool {
        self.status == RuleStatus::Stable
    }

    /// Inclusive on both ends.
    pub fn matches(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}
