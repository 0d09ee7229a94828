//! Shapeguard Schemas - structural validation of JSON request bodies
//!
//! A schema document is a set of named fragments. Each fragment maps field
//! names to type descriptors; descriptors may refer to other fragments by
//! name. The `root` fragment describes the resource tree: a request path is
//! walked through it to pick the fragment its body must satisfy.
//!
//! ## Features
//!
//! - **Closed objects**: every declared key required, no undeclared key allowed
//! - **Partial updates**: PUT/PATCH bodies may omit top-level keys
//! - **Nested fragments and collections** resolved by name
//! - **Pluggable rules**: per-type validators for extra constraints
//! - **Fail-fast**: the first violation is the only one reported
//!
//! ## Quick Start
//!
//! ```rust
//! use shapeguard_schemas::{Method, PayloadValidator, RequestContext, SchemaDocument, Verdict};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let document = SchemaDocument::from_value(&json!({
//!     "root": {
//!         "users": {"type": "collection", "schema": "User"}
//!     },
//!     "User": {
//!         "name": {"type": "string", "validation": [{"minLength": 2}]},
//!         "age": {"type": "number"}
//!     }
//! }))?;
//!
//! let validator = PayloadValidator::new(Arc::new(document));
//! let request = RequestContext::new(Method::Post, "/users");
//!
//! let verdict = validator.validate(&request, &json!({"name": "Ada", "age": 36}))?;
//! assert_eq!(verdict, Verdict::Accepted);
//!
//! let err = validator.validate(&request, &json!({"name": "Ada"})).unwrap_err();
//! assert_eq!(err.to_string(), "Type error. Missing key age.");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

pub mod document;
pub mod engine;
pub mod loader;
pub mod request;
pub mod resolver;
pub mod rules;
pub mod validation;

// Re-export commonly used types for convenience
pub use document::{
    CollectionItems, FieldType, Fragment, Primitive, SchemaDocument, SchemaError, TypeDescriptor,
    DEFAULT_SCHEMA_KEY, ROOT_FRAGMENT,
};
pub use engine::{PayloadValidator, SkipReason, Verdict};
pub use loader::{DocumentLoader, Format, LoaderConfig, LoaderError};
pub use request::{Method, RequestContext, RequestPolicy, Treatment};
pub use resolver::{resolve_named, resolve_request, split_path};
pub use rules::{RuleError, RuleOutcome, TypeValidator, ValidatorRegistry};
pub use validation::{
    ObjectValidator, ValidationContext, ValidationError, ValidationErrorKind, ValidationMode,
    ValidationResult,
};
