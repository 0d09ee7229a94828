//! Rules for `boolean` fields
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use super::{parse_rules, RuleError, RuleOutcome, TypeValidator};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
enum BooleanRule {
    Equals(bool),
}

/// Fixed-value rule for booleans, e.g. an accepted-terms flag
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanValidator;

impl TypeValidator for BooleanValidator {
    fn type_name(&self) -> &str {
        "boolean"
    }

    fn validate(&self, value: &Value, rules: &[Value]) -> Result<RuleOutcome, RuleError> {
        let b = value
            .as_bool()
            .ok_or_else(|| RuleError::unexpected_value("boolean", value))?;

        for rule in parse_rules::<BooleanRule>("boolean", rules)? {
            match rule {
                BooleanRule::Equals(expected) if b != expected => {
                    return Ok(RuleOutcome::fail(format!("must be {}", expected)))
                }
                BooleanRule::Equals(_) => {}
            }
        }

        Ok(RuleOutcome::pass())
    }
}
