//! Type validators: per-type business rules beyond structural type checks
//!
//! Each type name owns one validator in a [`ValidatorRegistry`]. A descriptor
//! with a `validation` list is dispatched to the validator registered for its
//! type, which evaluates the rules in order and reports the first one broken.
//!
//! Built-in rule vocabulary, one rule per list entry:
//!
//! | type      | rules                                                              |
//! |-----------|--------------------------------------------------------------------|
//! | `string`  | `{"minLength": n}` `{"maxLength": n}` `{"pattern": re}` `{"oneOf": [..]}` `"nonBlank"` |
//! | `number`  | `{"min": x}` `{"max": x}` `{"multipleOf": x}` `"integer"`          |
//! | `boolean` | `{"equals": b}`                                                    |
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

pub mod boolean;
pub mod number;
pub mod string;

pub use boolean::BooleanValidator;
pub use number::NumberValidator;
pub use string::StringValidator;

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result of running a rule list against one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub valid: bool,
    /// Explanation of the first broken rule; empty when valid
    pub message: String,
}

impl RuleOutcome {
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// A rule list that cannot be evaluated. This is a schema problem, not a
/// payload problem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Malformed {type_name} rule {rule}: {reason}")]
    Malformed {
        type_name: String,
        rule: String,
        reason: String,
    },

    #[error("{type_name} validator cannot check value {found}")]
    UnexpectedValue { type_name: String, found: String },
}

impl RuleError {
    pub fn malformed(type_name: &str, rule: &Value, reason: impl Into<String>) -> Self {
        Self::Malformed {
            type_name: type_name.to_string(),
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }

    pub fn unexpected_value(type_name: &str, found: &Value) -> Self {
        Self::UnexpectedValue {
            type_name: type_name.to_string(),
            found: found.to_string(),
        }
    }
}

/// Business-rule checks for values of one type
pub trait TypeValidator: Send + Sync {
    /// The type name this validator is registered under
    fn type_name(&self) -> &str;

    /// Evaluate `rules` in order against `value`, stopping at the first failure
    fn validate(&self, value: &Value, rules: &[Value]) -> Result<RuleOutcome, RuleError>;
}

/// Deserialize every rule of a list into the validator's rule type
pub(crate) fn parse_rules<R: DeserializeOwned>(
    type_name: &str,
    rules: &[Value],
) -> Result<Vec<R>, RuleError> {
    rules
        .iter()
        .map(|rule| {
            serde_json::from_value(rule.clone())
                .map_err(|e| RuleError::malformed(type_name, rule, e.to_string()))
        })
        .collect()
}

/// Type validators keyed by type name
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    validators: HashMap<String, Arc<dyn TypeValidator>>,
}

impl ValidatorRegistry {
    /// A registry with no validators
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the `string`, `number` and `boolean` validators
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(StringValidator::new());
        registry.register(NumberValidator);
        registry.register(BooleanValidator);
        registry
    }

    /// Register a validator under its own type name, replacing any previous one
    pub fn register<V: TypeValidator + 'static>(&mut self, validator: V) {
        self.register_arc(Arc::new(validator));
    }

    pub fn register_arc(&mut self, validator: Arc<dyn TypeValidator>) {
        self.validators
            .insert(validator.type_name().to_string(), validator);
    }

    pub fn get(&self, type_name: &str) -> Option<&Arc<dyn TypeValidator>> {
        self.validators.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.validators.contains_key(type_name)
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EvenValidator;

    impl TypeValidator for EvenValidator {
        fn type_name(&self) -> &str {
            "number"
        }

        fn validate(&self, value: &Value, _rules: &[Value]) -> Result<RuleOutcome, RuleError> {
            match value.as_i64() {
                Some(n) if n % 2 == 0 => Ok(RuleOutcome::pass()),
                Some(_) => Ok(RuleOutcome::fail("must be even")),
                None => Err(RuleError::unexpected_value("number", value)),
            }
        }
    }

    #[test]
    fn test_builtins_registered() {
        let registry = ValidatorRegistry::with_builtins();
        assert_eq!(registry.type_names(), vec!["boolean", "number", "string"]);
        assert!(!registry.contains("object"));
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = ValidatorRegistry::with_builtins();
        registry.register(EvenValidator);

        let validator = registry.get("number").unwrap();
        assert_eq!(validator.validate(&json!(3), &[]).unwrap(), RuleOutcome::fail("must be even"));
        assert!(validator.validate(&json!(4), &[]).unwrap().valid);
    }

    #[test]
    fn test_debug_lists_types() {
        let registry = ValidatorRegistry::with_builtins();
        assert_eq!(
            format!("{:?}", registry),
            r#"ValidatorRegistry { types: ["boolean", "number", "string"] }"#
        );
    }
}
