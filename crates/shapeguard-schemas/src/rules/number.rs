//! Rules for `number` fields
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use super::{parse_rules, RuleError, RuleOutcome, TypeValidator};
use serde::Deserialize;
use serde_json::{Number, Value};
use std::cmp::Ordering;

/// Tolerance for `multipleOf` on non-integral divisors
const MULTIPLE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
enum NumberRule {
    Min(Number),
    Max(Number),
    MultipleOf(Number),
    Integer,
}

/// Bound and granularity rules for numbers
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberValidator;

/// Exact integer view of a JSON number, when it has one
fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

fn as_float(n: &Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

/// Integers past 2^53 do not survive a trip through `f64`, so two integral
/// operands are compared exactly.
fn compare(value: &Number, bound: &Number) -> Option<Ordering> {
    match (as_integer(value), as_integer(bound)) {
        (Some(v), Some(b)) => Some(v.cmp(&b)),
        _ => as_float(value).partial_cmp(&as_float(bound)),
    }
}

fn is_multiple(value: &Number, step: &Number) -> bool {
    if let (Some(v), Some(s)) = (as_integer(value), as_integer(step)) {
        return v.checked_rem(s) == Some(0);
    }
    let quotient = as_float(value) / as_float(step);
    (quotient - quotient.round()).abs() <= MULTIPLE_EPSILON
}

fn is_integral(n: &Number) -> bool {
    n.is_i64() || n.is_u64() || as_float(n).fract() == 0.0
}

impl TypeValidator for NumberValidator {
    fn type_name(&self) -> &str {
        "number"
    }

    fn validate(&self, value: &Value, rules: &[Value]) -> Result<RuleOutcome, RuleError> {
        let n = match value {
            Value::Number(n) => n,
            other => return Err(RuleError::unexpected_value("number", other)),
        };

        let parsed: Vec<NumberRule> = parse_rules("number", rules)?;
        for (rule, raw) in parsed.iter().zip(rules) {
            match rule {
                NumberRule::Min(min) if compare(n, min) == Some(Ordering::Less) => {
                    return Ok(RuleOutcome::fail(format!(
                        "must be greater than or equal to {}",
                        min
                    )))
                }
                NumberRule::Max(max) if compare(n, max) == Some(Ordering::Greater) => {
                    return Ok(RuleOutcome::fail(format!(
                        "must be less than or equal to {}",
                        max
                    )))
                }
                NumberRule::MultipleOf(step) => {
                    if as_float(step) <= 0.0 {
                        return Err(RuleError::malformed("number", raw, "multipleOf must be positive"));
                    }
                    if !is_multiple(n, step) {
                        return Ok(RuleOutcome::fail(format!("must be a multiple of {}", step)));
                    }
                }
                NumberRule::Integer if !is_integral(n) => {
                    return Ok(RuleOutcome::fail("must be an integer"))
                }
                _ => {}
            }
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
        NumberValidator.validate(&value, &rules)
    }

    #[test]
    fn test_bounds_inclusive() {
        let rules = json!([{"min": 0}, {"max": 10}]);
        assert!(check(json!(0), rules.clone()).unwrap().valid);
        assert!(check(json!(10), rules.clone()).unwrap().valid);
        assert_eq!(
            check(json!(-1), rules.clone()).unwrap().message,
            "must be greater than or equal to 0"
        );
        assert_eq!(
            check(json!(10.5), rules).unwrap().message,
            "must be less than or equal to 10"
        );
    }

    #[test]
    fn test_integer_rule() {
        assert!(check(json!(3), json!(["integer"])).unwrap().valid);
        assert!(check(json!(3.0), json!(["integer"])).unwrap().valid);
        assert_eq!(check(json!(3.5), json!(["integer"])).unwrap().message, "must be an integer");
    }

    #[test]
    fn test_multiple_of() {
        assert!(check(json!(0.3), json!([{"multipleOf": 0.1}])).unwrap().valid);
        assert!(check(json!(15), json!([{"multipleOf": 5}])).unwrap().valid);
        assert_eq!(
            check(json!(7), json!([{"multipleOf": 5}])).unwrap().message,
            "must be a multiple of 5"
        );
        assert!(matches!(
            check(json!(7), json!([{"multipleOf": 0}])),
            Err(RuleError::Malformed { .. })
        ));
    }

    #[test]
    fn test_large_integers_compared_exactly() {
        let odd = json!(9007199254740993u64);
        assert_eq!(
            check(odd.clone(), json!([{"multipleOf": 2}])).unwrap().message,
            "must be a multiple of 2"
        );
        assert!(check(json!(9007199254740994u64), json!([{"multipleOf": 2}])).unwrap().valid);
        assert_eq!(
            check(odd.clone(), json!([{"max": 9007199254740992u64}])).unwrap().message,
            "must be less than or equal to 9007199254740992"
        );
        assert!(check(odd.clone(), json!([{"min": 9007199254740993u64}])).unwrap().valid);
        assert!(check(json!(i64::MIN), json!([{"max": u64::MAX}, {"multipleOf": 2}])).unwrap().valid);
    }

    #[test]
    fn test_malformed_rule() {
        assert!(matches!(
            check(json!(1), json!([{"min": "zero"}])),
            Err(RuleError::Malformed { .. })
        ));
    }
}
