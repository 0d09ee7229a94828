//! Validation error types for request payloads
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use crate::document::SchemaError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What went wrong at the point validation stopped
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// A key-value mapping was required
    #[error("Type error. Expected object, found {found}.")]
    TypeError { found: String },

    /// A declared field is absent from a payload that must be complete
    #[error("Type error. Missing key {key}.")]
    MissingKey { key: String },

    /// A submitted field is not declared by the schema
    #[error("Type error. Invalid key {key} in object.")]
    UnknownKey { key: String },

    /// A field's value does not have its declared type or shape
    #[error("Type error. Key {key} must be of type {expected}")]
    TypeMismatch { key: String, expected: String },

    /// A field passed the type check but broke one of its declared rules
    #[error("Validation error with key {key}. {message}")]
    CustomValidation { key: String, message: String },

    /// The schema document cannot be used; not caused by the payload
    #[error("Schema configuration error: {reason}")]
    Configuration { reason: String },
}

/// A payload rejection or configuration failure, located by JSON path
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}")]
pub struct ValidationError {
    /// JSON path of the value being inspected when validation stopped
    pub path: String,
    #[serde(flatten)]
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new<P: Into<String>>(path: P, kind: ValidationErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn type_error<P: Into<String>>(path: P, found: &serde_json::Value) -> Self {
        Self::new(
            path,
            ValidationErrorKind::TypeError {
                found: found.to_string(),
            },
        )
    }

    pub fn missing_key<P: Into<String>, K: Into<String>>(path: P, key: K) -> Self {
        Self::new(path, ValidationErrorKind::MissingKey { key: key.into() })
    }

    pub fn unknown_key<P: Into<String>, K: Into<String>>(path: P, key: K) -> Self {
        Self::new(path, ValidationErrorKind::UnknownKey { key: key.into() })
    }

    pub fn type_mismatch<P, K, E>(path: P, key: K, expected: E) -> Self
    where
        P: Into<String>,
        K: Into<String>,
        E: Into<String>,
    {
        Self::new(
            path,
            ValidationErrorKind::TypeMismatch {
                key: key.into(),
                expected: expected.into(),
            },
        )
    }

    pub fn custom<P, K, M>(path: P, key: K, message: M) -> Self
    where
        P: Into<String>,
        K: Into<String>,
        M: Into<String>,
    {
        Self::new(
            path,
            ValidationErrorKind::CustomValidation {
                key: key.into(),
                message: message.into(),
            },
        )
    }

    pub fn configuration<P: Into<String>, R: Into<String>>(path: P, reason: R) -> Self {
        Self::new(
            path,
            ValidationErrorKind::Configuration {
                reason: reason.into(),
            },
        )
    }

    /// Relocate the error to `path`
    pub fn at<P: Into<String>>(mut self, path: P) -> Self {
        self.path = path.into();
        self
    }

    /// The message a host sends back to the client
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Whether the schema document, not the payload, is at fault
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind, ValidationErrorKind::Configuration { .. })
    }

    /// HTTP-style status a host should answer with
    pub fn status_code(&self) -> u16 {
        if self.is_configuration() {
            500
        } else {
            400
        }
    }
}

impl From<SchemaError> for ValidationError {
    fn from(error: SchemaError) -> Self {
        Self::configuration("$", error.to_string())
    }
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_messages_use_host_wording() {
        assert_eq!(
            ValidationError::type_error("$", &json!(5)).to_string(),
            "Type error. Expected object, found 5."
        );
        assert_eq!(
            ValidationError::missing_key("$", "name").to_string(),
            "Type error. Missing key name."
        );
        assert_eq!(
            ValidationError::unknown_key("$", "extra").to_string(),
            "Type error. Invalid key extra in object."
        );
        assert_eq!(
            ValidationError::type_mismatch("$", "a", "Foo").to_string(),
            "Type error. Key a must be of type Foo"
        );
        assert_eq!(
            ValidationError::custom("$", "name", "must be at least 3 characters long").to_string(),
            "Validation error with key name. must be at least 3 characters long"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ValidationError::missing_key("$", "a").status_code(), 400);
        let config = ValidationError::configuration("$.a", "no validator registered for type 'object'");
        assert!(config.is_configuration());
        assert_eq!(config.status_code(), 500);
    }

    #[test]
    fn test_serialized_shape() {
        let err = ValidationError::type_mismatch("$.a", "b", "string");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            json!({"path": "$.a", "kind": "type_mismatch", "key": "b", "expected": "string"})
        );
    }

    #[test]
    fn test_schema_error_is_configuration() {
        let err: ValidationError = SchemaError::InvalidDocument {
            found: "[]".to_string(),
        }
        .into();
        assert!(err.is_configuration());
    }
}
