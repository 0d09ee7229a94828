//! Rules for `string` fields
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use super::{parse_rules, RuleError, RuleOutcome, TypeValidator};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
enum StringRule {
    MinLength(usize),
    MaxLength(usize),
    Pattern(String),
    OneOf(Vec<String>),
    NonBlank,
}

/// Length, pattern and enumeration rules for strings
///
/// Compiled `pattern` rules are kept for the life of the validator.
#[derive(Debug, Default)]
pub struct StringValidator {
    patterns: RwLock<HashMap<String, Regex>>,
}

impl StringValidator {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_match(&self, pattern: &str, raw: &Value, s: &str) -> Result<bool, RuleError> {
        if let Ok(patterns) = self.patterns.read() {
            if let Some(re) = patterns.get(pattern) {
                return Ok(re.is_match(s));
            }
        }
        let re = Regex::new(pattern)
            .map_err(|e| RuleError::malformed("string", raw, e.to_string()))?;
        let matched = re.is_match(s);
        if let Ok(mut patterns) = self.patterns.write() {
            patterns.insert(pattern.to_string(), re);
        }
        Ok(matched)
    }
}

impl TypeValidator for StringValidator {
    fn type_name(&self) -> &str {
        "string"
    }

    fn validate(&self, value: &Value, rules: &[Value]) -> Result<RuleOutcome, RuleError> {
        let s = value
            .as_str()
            .ok_or_else(|| RuleError::unexpected_value("string", value))?;

        let parsed: Vec<StringRule> = parse_rules("string", rules)?;
        let length = s.chars().count();
        for (rule, raw) in parsed.iter().zip(rules) {
            let outcome = match rule {
                StringRule::MinLength(min) if length < *min => {
                    RuleOutcome::fail(format!("must be at least {} characters long", min))
                }
                StringRule::MaxLength(max) if length > *max => {
                    RuleOutcome::fail(format!("must be at most {} characters long", max))
                }
                StringRule::Pattern(pattern) => {
                    if self.is_match(pattern, raw, s)? {
                        continue;
                    }
                    RuleOutcome::fail(format!("must match pattern {}", pattern))
                }
                StringRule::OneOf(allowed) if !allowed.iter().any(|a| a == s) => {
                    RuleOutcome::fail(format!("must be one of: {}", allowed.join(", ")))
                }
                StringRule::NonBlank if s.trim().is_empty() => {
                    RuleOutcome::fail("must not be blank")
                }
                _ => continue,
            };
            return Ok(outcome);
        }

        Ok(RuleOutcome::pass())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(value: Value, rules: Value) -> Result<RuleOutcome, RuleError> {
        let rules = rules.as_array().cloned().unwrap();
        StringValidator::new().validate(&value, &rules)
    }

    #[test]
    fn test_length_rules() {
        let rules = json!([{"minLength": 2}, {"maxLength": 4}]);
        assert!(check(json!("abc"), rules.clone()).unwrap().valid);
        assert_eq!(
            check(json!("a"), rules.clone()).unwrap().message,
            "must be at least 2 characters long"
        );
        assert_eq!(
            check(json!("abcde"), rules).unwrap().message,
            "must be at most 4 characters long"
        );
    }

    #[test]
    fn test_length_counts_chars() {
        assert!(check(json!("héé"), json!([{"maxLength": 3}])).unwrap().valid);
    }

    #[test]
    fn test_first_broken_rule_reported() {
        let outcome = check(json!(""), json!([{"minLength": 1}, "nonBlank"])).unwrap();
        assert_eq!(outcome.message, "must be at least 1 characters long");
    }

    #[test]
    fn test_pattern_and_one_of() {
        assert!(check(json!("ab12"), json!([{"pattern": "^[a-z]+[0-9]+$"}])).unwrap().valid);
        assert_eq!(
            check(json!("12ab"), json!([{"pattern": "^[a-z]+$"}])).unwrap().message,
            "must match pattern ^[a-z]+$"
        );
        assert_eq!(
            check(json!("red"), json!([{"oneOf": ["green", "blue"]}])).unwrap().message,
            "must be one of: green, blue"
        );
        assert_eq!(check(json!("   "), json!(["nonBlank"])).unwrap().message, "must not be blank");
    }

    #[test]
    fn test_compiled_pattern_reused() {
        let validator = StringValidator::new();
        let rules = vec![json!({"pattern": "^[0-9]+$"})];
        assert!(validator.validate(&json!("123"), &rules).unwrap().valid);
        assert!(!validator.validate(&json!("12a"), &rules).unwrap().valid);
        assert_eq!(validator.patterns.read().unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_rules() {
        assert!(matches!(
            check(json!("x"), json!([{"shorterThan": 2}])),
            Err(RuleError::Malformed { .. })
        ));
        assert!(matches!(
            check(json!("x"), json!([{"pattern": "("}])),
            Err(RuleError::Malformed { .. })
        ));
        assert!(matches!(
            check(json!(5), json!([])),
            Err(RuleError::UnexpectedValue { .. })
        ));
    }
}
