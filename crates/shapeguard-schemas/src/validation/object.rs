//! Object validation against a schema fragment
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use crate::document::{Fragment, SchemaDocument, TypeDescriptor};
use crate::rules::ValidatorRegistry;
use crate::validation::base::ValidationContext;
use crate::validation::error::{ValidationError, ValidationResult};
use serde_json::Value;
use tracing::trace;

/// Walks a payload against fragments of one schema document
///
/// Validation is fail-fast: the first violation found ends the walk and is
/// the only error reported.
#[derive(Debug, Clone, Copy)]
pub struct ObjectValidator<'a> {
    pub(crate) document: &'a SchemaDocument,
    pub(crate) registry: &'a ValidatorRegistry,
}

impl<'a> ObjectValidator<'a> {
    pub fn new(document: &'a SchemaDocument, registry: &'a ValidatorRegistry) -> Self {
        Self { document, registry }
    }

    pub fn document(&self) -> &'a SchemaDocument {
        self.document
    }

    /// Validate `value` against `fragment`
    ///
    /// 1. `value` must be a key-value mapping.
    /// 2. Unless `ctx` is partial, every declared key must be present
    ///    (checked in declaration order).
    /// 3. Every submitted key, in submission order, must be declared, must
    ///    pass the type check, and must satisfy its declared rules.
    pub fn validate_object(
        &self,
        value: &Value,
        fragment: &Fragment,
        ctx: &ValidationContext,
    ) -> ValidationResult<()> {
        let Some(object) = value.as_object() else {
            return Err(ValidationError::type_error(&ctx.path, value));
        };
        trace!(path = %ctx.path, keys = object.len(), "validating object");

        if !ctx.is_partial() {
            if let Some(missing) = fragment.keys().find(|key| !object.contains_key(*key)) {
                return Err(ValidationError::missing_key(&ctx.path, missing));
            }
        }

        for (key, field_value) in object {
            let field_ctx = ctx.child(key);
            let Some(descriptor) = fragment.get(key) else {
                return Err(ValidationError::unknown_key(&field_ctx.path, key));
            };

            if !self.check_type(field_value, descriptor, &field_ctx)? {
                return Err(ValidationError::type_mismatch(
                    &field_ctx.path,
                    key,
                    descriptor.expected(),
                ));
            }

            if let Some(rules) = &descriptor.validation {
                self.apply_rules(key, field_value, descriptor, rules, &field_ctx)?;
            }
        }

        Ok(())
    }

    /// Dispatch a field's rule list to the validator registered for its type
    fn apply_rules(
        &self,
        key: &str,
        value: &Value,
        descriptor: &TypeDescriptor,
        rules: &[Value],
        field_ctx: &ValidationContext,
    ) -> ValidationResult<()> {
        let type_name = descriptor.type_name();
        let validator = self.registry.get(type_name).ok_or_else(|| {
            ValidationError::configuration(
                &field_ctx.path,
                format!("no type validator registered for type '{}'", type_name),
            )
        })?;

        let outcome = validator
            .validate(value, rules)
            .map_err(|e| ValidationError::configuration(&field_ctx.path, e.to_string()))?;

        if outcome.valid {
            Ok(())
        } else {
            Err(ValidationError::custom(&field_ctx.path, key, outcome.message))
        }
    }
}
