//! Rule evaluation.
//!
//! # Decision Tree
//! 1. Empty payload -> `no_data` batch, rules are not consulted
//! 2. Non-stable rule -> ignored
//! 3. Field absent from payload -> skipped
//! 4. Field present but not numeric -> skipped (logged)
//! 5. `min <= value <= max` -> token `{field}_{unit}` spanning `value ± 1`
//! 6. Otherwise -> no token
//!
//! Each rule is evaluated independently and in input order.

use crate::error::Result;
use crate::logging::structured::LogContext;
use crate::models::{PayloadValue, RangeToken, Rule, SensorSnapshot, TokenBatch};

/// Evaluate `rules` against `snapshot` and build the token batch.
pub fn generate_tokens(
    snapshot: &SensorSnapshot,
    rules: &[Rule],
    ctx: &LogContext,
) -> Result<TokenBatch> {
    if snapshot.is_empty() {
        log::info!(
            "{} GENERATE_NO_DATA source={} rules={}",
            ctx,
            snapshot.source,
            rules.len()
        );
        return Ok(TokenBatch::no_data());
    }

    let unit = snapshot.unit();
    let mut tokens = Vec::new();
    let mut evaluated = 0;

    for rule in rules.iter().filter(|r| r.is_stable()) {
        evaluated += 1;
        if let Some(token) = evaluate_rule(rule, snapshot, unit.as_deref(), ctx)? {
            tokens.push(token);
        }
    }

    log::info!(
        "{} GENERATE_COMPLETE rules={} stable={} tokens={}",
        ctx,
        rules.len(),
        evaluated,
        tokens.len()
    );

    Ok(TokenBatch::success(tokens))
}

/// Evaluate one rule. Returns `Ok(None)` when the rule does not apply.
pub fn evaluate_rule(
    rule: &Rule,
    snapshot: &SensorSnapshot,
    unit: Option<&str>,
    ctx: &LogContext,
) -> Result<Option<RangeToken>> {
    let value = match snapshot.get(&rule.field) {
        None => {
            log::debug!(
                "{} RULE_SKIPPED_FIELD_ABSENT rule_id={} field={}",
                ctx,
                rule.rule_id,
                rule.field
            );
            return Ok(None);
        }
        Some(PayloadValue::Number(n)) => *n,
        Some(other) => {
            log::warn!(
                "{} RULE_SKIPPED_NON_NUMERIC rule_id={} field={} value_type={}",
                ctx,
                rule.rule_id,
                rule.field,
                other.type_name()
            );
            return Ok(None);
        }
    };

    if !rule.matches(value) {
        log::debug!(
            "{} RULE_NO_MATCH rule_id={} value={} min={} max={}",
            ctx,
            rule.rule_id,
            value,
            rule.min,
            rule.max
        );
        return Ok(None);
    }

    let token = RangeToken::around(&rule.field, unit, value, rule.confidence)?;

    log::debug!(
        "{} RULE_MATCHED rule_id={} token_field={} value={}",
        ctx,
        rule.rule_id,
        token.field,
        value
    );

    Ok(Some(token))
}
