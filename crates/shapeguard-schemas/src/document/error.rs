//! Error types for schema document construction
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Result type for document construction
pub type SchemaResult<T> = Result<T, SchemaError>;

/// A schema document that cannot be used for validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The document itself is not a mapping of fragment names
    #[error("Schema document must be an object of named fragments, found {found}")]
    InvalidDocument { found: String },

    /// A fragment is not a mapping of field keys
    #[error("Fragment '{fragment}' must be an object of field descriptors, found {found}")]
    InvalidFragment { fragment: String, found: String },

    /// A descriptor is structurally malformed
    #[error("Descriptor for '{fragment}.{key}' is malformed: {reason}")]
    InvalidDescriptor {
        fragment: String,
        key: String,
        reason: String,
    },

    /// The `type` value is not one the engine knows about
    #[error("Descriptor for '{fragment}.{key}' has unknown type '{type_name}'")]
    UnknownType {
        fragment: String,
        key: String,
        type_name: String,
    },

    /// A primitive type carries a `schema` reference
    #[error("Descriptor for '{fragment}.{key}' of type '{type_name}' cannot reference schema '{reference}'")]
    UnexpectedReference {
        fragment: String,
        key: String,
        type_name: String,
        reference: String,
    },

    /// A `schema` reference names a fragment missing from the document
    #[error("Descriptor for '{fragment}.{key}' references unknown schema '{reference}'")]
    DanglingReference {
        fragment: String,
        key: String,
        reference: String,
    },
}

impl SchemaError {
    pub(crate) fn invalid_descriptor(
        fragment: &str,
        key: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidDescriptor {
            fragment: fragment.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// The fragment the error was found in, if it is tied to one
    pub fn fragment(&self) -> Option<&str> {
        match self {
            Self::InvalidDocument { .. } => None,
            Self::InvalidFragment { fragment, .. }
            | Self::InvalidDescriptor { fragment, .. }
            | Self::UnknownType { fragment, .. }
            | Self::UnexpectedReference { fragment, .. }
            | Self::DanglingReference { fragment, .. } => Some(fragment),
        }
    }
}
