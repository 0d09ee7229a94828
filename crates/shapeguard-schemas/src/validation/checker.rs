//! Structural type checks for a single value
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use crate::document::{CollectionItems, FieldType, Fragment, Primitive, TypeDescriptor};
use crate::resolver::resolve_named;
use crate::validation::base::ValidationContext;
use crate::validation::error::ValidationResult;
use crate::validation::object::ObjectValidator;
use serde_json::Value;
use tracing::debug;

impl ObjectValidator<'_> {
    /// Decide whether `value` conforms to `descriptor`
    ///
    /// `Ok(false)` is a plain mismatch, reported by the caller against the
    /// field key. `Err` carries a more specific failure from inside a nested
    /// object, or a configuration error.
    ///
    /// Collection checks visit every element even after one fails; the
    /// collection as a whole is reported, not the element.
    pub fn check_type(
        &self,
        value: &Value,
        descriptor: &TypeDescriptor,
        ctx: &ValidationContext,
    ) -> ValidationResult<bool> {
        match &descriptor.field_type {
            FieldType::String => Ok(Primitive::String.matches(value)),
            FieldType::Number => Ok(Primitive::Number.matches(value)),
            FieldType::Boolean => Ok(Primitive::Boolean.matches(value)),
            FieldType::Object { schema: None } => Ok(value.is_object()),
            FieldType::Object { schema: Some(name) } => {
                let fragment = self.fragment(name, ctx)?;
                self.validate_object(value, fragment, ctx)?;
                Ok(true)
            }
            FieldType::Collection { items } => {
                let Some(elements) = value.as_array() else {
                    return Ok(false);
                };
                match items {
                    None => Ok(true),
                    Some(CollectionItems::Primitive(primitive)) => {
                        self.check_primitive_elements(elements, *primitive, ctx)
                    }
                    Some(CollectionItems::Fragment(name)) => {
                        let fragment = self.fragment(name, ctx)?;
                        self.check_object_elements(elements, fragment, ctx)
                    }
                }
            }
        }
    }

    fn fragment(&self, name: &str, ctx: &ValidationContext) -> ValidationResult<&Fragment> {
        resolve_named(self.document, name).map_err(|e| e.at(&ctx.path))
    }

    fn check_primitive_elements(
        &self,
        elements: &[Value],
        primitive: Primitive,
        ctx: &ValidationContext,
    ) -> ValidationResult<bool> {
        let element_descriptor = TypeDescriptor::new(FieldType::from(primitive));
        let mut valid = true;
        for (index, element) in elements.iter().enumerate() {
            if !self.check_type(element, &element_descriptor, &ctx.child_index(index))? {
                valid = false;
            }
        }
        Ok(valid)
    }

    fn check_object_elements(
        &self,
        elements: &[Value],
        fragment: &Fragment,
        ctx: &ValidationContext,
    ) -> ValidationResult<bool> {
        let mut valid = true;
        for (index, element) in elements.iter().enumerate() {
            match self.validate_object(element, fragment, &ctx.child_index(index)) {
                Ok(()) => {}
                Err(error) if error.is_configuration() => return Err(error),
                Err(error) => {
                    debug!(path = %error.path, error = %error, "collection element rejected");
                    valid = false;
                }
            }
        }
        Ok(valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SchemaDocument;
    use crate::rules::ValidatorRegistry;
    use crate::validation::error::ValidationErrorKind;
    use serde_json::json;

    fn document() -> SchemaDocument {
        SchemaDocument::from_value(&json!({
            "root": {
                "a": {"type": "object", "schema": "Foo"},
                "items": {"type": "collection", "schema": "Foo"}
            },
            "Foo": {
                "b": {"type": "string"}
            }
        }))
        .unwrap()
    }

    fn check(value: Value, descriptor: TypeDescriptor) -> ValidationResult<bool> {
        let doc = document();
        let registry = ValidatorRegistry::with_builtins();
        ObjectValidator::new(&doc, &registry).check_type(&value, &descriptor, &ValidationContext::full())
    }

    #[test]
    fn test_primitives_match_exactly() {
        assert!(!check(json!(true), TypeDescriptor::string()).unwrap());
        assert!(check(json!("x"), TypeDescriptor::string()).unwrap());
        assert!(check(json!(5), TypeDescriptor::number()).unwrap());
        assert!(check(json!(5.5), TypeDescriptor::number()).unwrap());
        assert!(!check(json!("5"), TypeDescriptor::number()).unwrap());
        assert!(!check(json!(1), TypeDescriptor::boolean()).unwrap());
        assert!(check(json!(false), TypeDescriptor::boolean()).unwrap());
        assert!(!check(Value::Null, TypeDescriptor::string()).unwrap());
    }

    #[test]
    fn test_unconstrained_object_and_collection() {
        assert!(check(json!({"any": [1]}), TypeDescriptor::object()).unwrap());
        assert!(!check(json!([1]), TypeDescriptor::object()).unwrap());
        assert!(!check(json!("x"), TypeDescriptor::object()).unwrap());
        assert!(check(json!([1, "x", {}]), TypeDescriptor::collection()).unwrap());
        assert!(!check(json!({}), TypeDescriptor::collection()).unwrap());
    }

    #[test]
    fn test_primitive_collection() {
        assert!(!check(json!([1, 2, "x"]), TypeDescriptor::collection_of("number")).unwrap());
        assert!(check(json!([1, 2, 3]), TypeDescriptor::collection_of("number")).unwrap());
        assert!(check(json!([]), TypeDescriptor::collection_of("number")).unwrap());
        assert!(!check(json!("123"), TypeDescriptor::collection_of("string")).unwrap());
    }

    #[test]
    fn test_fragment_collection_reports_whole_collection() {
        assert!(check(json!([{"b": "x"}, {"b": "y"}]), TypeDescriptor::collection_of("Foo")).unwrap());
        assert!(!check(json!([{"b": 1}, {"b": "y"}]), TypeDescriptor::collection_of("Foo")).unwrap());
        assert!(!check(json!([{"b": "x"}, 7]), TypeDescriptor::collection_of("Foo")).unwrap());
    }

    #[test]
    fn test_nested_object_surfaces_inner_error() {
        let err = check(json!({"b": 5}), TypeDescriptor::object_of("Foo")).unwrap_err();
        assert_eq!(
            err.kind,
            ValidationErrorKind::TypeMismatch {
                key: "b".to_string(),
                expected: "string".to_string()
            }
        );
        assert_eq!(err.path, "$.b");

        let err = check(json!("flat"), TypeDescriptor::object_of("Foo")).unwrap_err();
        assert!(matches!(err.kind, ValidationErrorKind::TypeError { .. }));
    }

    #[test]
    fn test_undefined_reference_is_configuration_error() {
        let err = check(json!({}), TypeDescriptor::object_of("Missing")).unwrap_err();
        assert!(err.is_configuration());

        let err = check(json!([{}]), TypeDescriptor::collection_of("Missing")).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_collection_mismatch_reported_on_key() {
        let doc = document();
        let registry = ValidatorRegistry::with_builtins();
        let err = ObjectValidator::new(&doc, &registry)
            .validate_object(
                &json!({"a": {"b": "x"}, "items": [{"b": "ok"}, {"b": false}]}),
                doc.root().unwrap(),
                &ValidationContext::full(),
            )
            .unwrap_err();
        assert_eq!(
            err.kind,
            ValidationErrorKind::TypeMismatch {
                key: "items".to_string(),
                expected: "Foo".to_string()
            }
        );
        assert_eq!(err.path, "$.items");
    }
}
