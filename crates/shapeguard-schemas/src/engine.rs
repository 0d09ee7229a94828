//! Validation entry point
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use crate::document::SchemaDocument;
use crate::request::{RequestContext, RequestPolicy, Treatment};
use crate::resolver::resolve_request;
use crate::rules::ValidatorRegistry;
use crate::validation::{ObjectValidator, ValidationContext, ValidationResult};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Why a request was let through without validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The method carries no body to validate
    ReadOnlyMethod,
    /// The document has no `root` fragment
    NoSchemaConfigured,
}

/// Outcome of a validation call that did not reject the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The body conforms to the resolved fragment
    Accepted,
    /// Validation does not apply to this request
    Skipped(SkipReason),
}

/// Validates request bodies against a shared, immutable schema document
///
/// Holds no mutable state; one instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct PayloadValidator {
    document: Arc<SchemaDocument>,
    registry: Arc<ValidatorRegistry>,
    policy: RequestPolicy,
}

impl PayloadValidator {
    /// Create a validator with the built-in type validators and default policy
    pub fn new(document: Arc<SchemaDocument>) -> Self {
        Self {
            document,
            registry: Arc::new(ValidatorRegistry::with_builtins()),
            policy: RequestPolicy::default(),
        }
    }

    pub fn with_registry(mut self, registry: ValidatorRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    pub fn with_policy(mut self, policy: RequestPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn document(&self) -> &SchemaDocument {
        &self.document
    }

    pub fn policy(&self) -> &RequestPolicy {
        &self.policy
    }

    /// Resolve the fragment for `request` and validate `body` against it
    ///
    /// Stops at, and returns, the first violation.
    pub fn validate(&self, request: &RequestContext, body: &Value) -> ValidationResult<Verdict> {
        let mode = match self.policy.treatment(request.method) {
            Treatment::Skip => {
                debug!(method = %request.method, "method is not validated");
                return Ok(Verdict::Skipped(SkipReason::ReadOnlyMethod));
            }
            Treatment::Validate(mode) => mode,
        };

        let Some(fragment) = resolve_request(&self.document, request.segments.as_slice())? else {
            debug!(path = %request.path(), "no root schema configured; request allowed");
            return Ok(Verdict::Skipped(SkipReason::NoSchemaConfigured));
        };

        let validator = ObjectValidator::new(&self.document, &self.registry);
        match validator.validate_object(body, fragment, &ValidationContext::new(mode)) {
            Ok(()) => {
                debug!(method = %request.method, path = %request.path(), ?mode, "payload accepted");
                Ok(Verdict::Accepted)
            }
            Err(error) => {
                info!(
                    method = %request.method,
                    path = %request.path(),
                    error_path = %error.path,
                    error = %error,
                    "payload rejected"
                );
                Err(error)
            }
        }
    }

    /// Boolean form of [`validate`](Self::validate)
    pub fn is_valid(&self, request: &RequestContext, body: &Value) -> bool {
        self.validate(request, body).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;
    use crate::validation::ValidationErrorKind;
    use serde_json::json;

    fn validator() -> PayloadValidator {
        let document = SchemaDocument::from_value(&json!({
            "root": {
                "users": {"type": "collection", "schema": "User"}
            },
            "User": {
                "name": {"type": "string"},
                "email": {"type": "string", "validation": [{"pattern": "^[^@]+@[^@]+$"}]}
            }
        }))
        .unwrap();
        PayloadValidator::new(Arc::new(document))
    }

    #[test]
    fn test_post_requires_every_key() {
        let v = validator();
        let request = RequestContext::new(Method::Post, "/users");

        let verdict = v.validate(&request, &json!({"name": "Ada", "email": "ada@example.com"}));
        assert_eq!(verdict.unwrap(), Verdict::Accepted);

        let err = v.validate(&request, &json!({"name": "Ada"})).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MissingKey { key: "email".to_string() });
    }

    #[test]
    fn test_put_is_partial() {
        let v = validator();
        let request = RequestContext::new(Method::Put, "/users/42");
        assert_eq!(v.validate(&request, &json!({"name": "Grace"})).unwrap(), Verdict::Accepted);

        let err = v.validate(&request, &json!({"email": "nope"})).unwrap_err();
        assert!(matches!(err.kind, ValidationErrorKind::CustomValidation { .. }));
    }

    #[test]
    fn test_read_only_methods_skipped() {
        let v = validator();
        let request = RequestContext::new(Method::Get, "/users");
        assert_eq!(
            v.validate(&request, &json!("anything")).unwrap(),
            Verdict::Skipped(SkipReason::ReadOnlyMethod)
        );
    }

    #[test]
    fn test_no_root_allows_request() {
        let v = PayloadValidator::new(Arc::new(SchemaDocument::empty()));
        let request = RequestContext::new(Method::Post, "/users");
        assert_eq!(
            v.validate(&request, &json!({"whatever": true})).unwrap(),
            Verdict::Skipped(SkipReason::NoSchemaConfigured)
        );
        assert!(v.is_valid(&request, &json!(1)));
    }

    #[test]
    fn test_strict_policy_validates_put_fully() {
        let v = validator().with_policy(RequestPolicy::strict());
        let request = RequestContext::new(Method::Put, "/users/42");
        assert!(!v.is_valid(&request, &json!({"name": "Grace"})));
    }

    #[test]
    fn test_non_object_body_rejected() {
        let v = validator();
        let request = RequestContext::new(Method::Post, "/users");
        let err = v.validate(&request, &json!("Ada")).unwrap_err();
        assert_eq!(err.to_string(), "Type error. Expected object, found \"Ada\".");
    }
}
