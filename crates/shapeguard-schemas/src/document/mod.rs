//! Schema document model
//!
//! A schema document is a set of named fragments. Each fragment maps field keys
//! to type descriptors, and `object`/`collection` descriptors refer to other
//! fragments by name. The reserved fragment `root` describes the resource tree
//! addressed by request paths.
//!
//! ```text
//! {
//!   "root":  { "users": { "type": "collection", "schema": "User" } },
//!   "User":  { "name":  { "type": "string", "validation": [{ "minLength": 1 }] },
//!              "tags":  { "type": "collection", "schema": "string" } }
//! }
//! ```
//!
//! Documents are checked completely when they are built, so a document that
//! exists is one whose types are known and whose references all resolve.
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

pub mod error;

pub use error::{SchemaError, SchemaResult};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the fragment describing the request-addressable resource tree
pub const ROOT_FRAGMENT: &str = "root";

/// Key under which a data store keeps its schema document
pub const DEFAULT_SCHEMA_KEY: &str = "_schema";

/// Primitive value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Number,
    Boolean,
}

impl Primitive {
    /// Look up a primitive by its type name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    /// Exact runtime type match, without coercion
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

/// Element type of a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionItems {
    /// Every element must be this primitive
    Primitive(Primitive),
    /// Every element must be an object conforming to the named fragment
    Fragment(String),
}

impl CollectionItems {
    /// Primitive type names take precedence over fragment names
    pub fn from_name(name: &str) -> Self {
        match Primitive::from_name(name) {
            Some(primitive) => Self::Primitive(primitive),
            None => Self::Fragment(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(primitive) => primitive.name(),
            Self::Fragment(name) => name.as_str(),
        }
    }
}

/// The declared type of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Boolean,
    /// Any object when `schema` is absent, otherwise an object conforming to it
    Object { schema: Option<String> },
    /// Any array when `items` is absent, otherwise an array of those elements
    Collection { items: Option<CollectionItems> },
}

impl FieldType {
    /// Type name as written in documents; also the type-validator registry key
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object { .. } => "object",
            Self::Collection { .. } => "collection",
        }
    }

    /// The raw `schema` value of this type, primitive element names included
    pub fn schema_name(&self) -> Option<&str> {
        match self {
            Self::Object { schema } => schema.as_deref(),
            Self::Collection { items } => items.as_ref().map(CollectionItems::name),
            _ => None,
        }
    }

    /// The fragment this type refers to, if any
    pub fn reference(&self) -> Option<&str> {
        match self {
            Self::Object { schema } => schema.as_deref(),
            Self::Collection {
                items: Some(CollectionItems::Fragment(name)),
            } => Some(name.as_str()),
            _ => None,
        }
    }

    fn parse(
        fragment: &str,
        key: &str,
        type_name: &str,
        schema: Option<&str>,
    ) -> SchemaResult<Self> {
        let field_type = match type_name {
            "object" => {
                return Ok(Self::Object {
                    schema: schema.map(str::to_string),
                })
            }
            "collection" => {
                return Ok(Self::Collection {
                    items: schema.map(CollectionItems::from_name),
                })
            }
            other => match Primitive::from_name(other) {
                Some(primitive) => Self::from(primitive),
                None => {
                    return Err(SchemaError::UnknownType {
                        fragment: fragment.to_string(),
                        key: key.to_string(),
                        type_name: other.to_string(),
                    })
                }
            },
        };

        match schema {
            Some(reference) => Err(SchemaError::UnexpectedReference {
                fragment: fragment.to_string(),
                key: key.to_string(),
                type_name: type_name.to_string(),
                reference: reference.to_string(),
            }),
            None => Ok(field_type),
        }
    }
}

impl From<Primitive> for FieldType {
    fn from(primitive: Primitive) -> Self {
        match primitive {
            Primitive::String => Self::String,
            Primitive::Number => Self::Number,
            Primitive::Boolean => Self::Boolean,
        }
    }
}

/// Declaration of one field: its type and optional custom rules
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "RawDescriptor")]
pub struct TypeDescriptor {
    pub field_type: FieldType,
    /// Ordered rule declarations for the type validator registered for the type
    pub validation: Option<Vec<Value>>,
}

/// Wire shape of a descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawDescriptor {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    validation: Option<Vec<Value>>,
}

impl From<TypeDescriptor> for RawDescriptor {
    fn from(descriptor: TypeDescriptor) -> Self {
        Self {
            type_name: descriptor.field_type.name().to_string(),
            schema: descriptor.field_type.schema_name().map(str::to_string),
            validation: descriptor.validation,
        }
    }
}

impl TypeDescriptor {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            validation: None,
        }
    }

    pub fn string() -> Self {
        Self::new(FieldType::String)
    }

    pub fn number() -> Self {
        Self::new(FieldType::Number)
    }

    pub fn boolean() -> Self {
        Self::new(FieldType::Boolean)
    }

    /// An unconstrained object
    pub fn object() -> Self {
        Self::new(FieldType::Object { schema: None })
    }

    /// An object conforming to the named fragment
    pub fn object_of(schema: impl Into<String>) -> Self {
        Self::new(FieldType::Object {
            schema: Some(schema.into()),
        })
    }

    /// An unconstrained array
    pub fn collection() -> Self {
        Self::new(FieldType::Collection { items: None })
    }

    /// An array whose elements are the named primitive or fragment
    pub fn collection_of(schema: &str) -> Self {
        Self::new(FieldType::Collection {
            items: Some(CollectionItems::from_name(schema)),
        })
    }

    pub fn with_rules(mut self, rules: Vec<Value>) -> Self {
        self.validation = Some(rules);
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.field_type.name()
    }

    pub fn reference(&self) -> Option<&str> {
        self.field_type.reference()
    }

    /// The type named in mismatch errors: the schema for object and
    /// collection types that declare one, the type name otherwise
    pub fn expected(&self) -> &str {
        self.field_type
            .schema_name()
            .unwrap_or_else(|| self.field_type.name())
    }

    fn from_value(fragment: &str, key: &str, value: &Value) -> SchemaResult<Self> {
        let obj = value.as_object().ok_or_else(|| {
            SchemaError::invalid_descriptor(fragment, key, format!("expected object, found {}", value))
        })?;

        let type_name = match obj.get("type") {
            Some(Value::String(name)) => name.as_str(),
            Some(other) => {
                return Err(SchemaError::invalid_descriptor(
                    fragment,
                    key,
                    format!("'type' must be a string, found {}", other),
                ))
            }
            None => return Err(SchemaError::invalid_descriptor(fragment, key, "missing 'type'")),
        };

        let schema = match obj.get("schema") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name.as_str()),
            Some(other) => {
                return Err(SchemaError::invalid_descriptor(
                    fragment,
                    key,
                    format!("'schema' must be a string, found {}", other),
                ))
            }
        };

        let validation = match obj.get("validation") {
            None | Some(Value::Null) => None,
            Some(Value::Array(rules)) => Some(rules.clone()),
            Some(other) => {
                return Err(SchemaError::invalid_descriptor(
                    fragment,
                    key,
                    format!("'validation' must be an array of rules, found {}", other),
                ))
            }
        };

        Ok(Self {
            field_type: FieldType::parse(fragment, key, type_name, schema)?,
            validation,
        })
    }
}

/// A named group of field declarations, kept in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Fragment {
    fields: IndexMap<String, TypeDescriptor>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, key: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        self.insert(key, descriptor);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, descriptor: TypeDescriptor) {
        self.fields.insert(key.into(), descriptor);
    }

    pub fn get(&self, key: &str) -> Option<&TypeDescriptor> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Field keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeDescriptor)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn from_value(name: &str, value: &Value) -> SchemaResult<Self> {
        let obj = value.as_object().ok_or_else(|| SchemaError::InvalidFragment {
            fragment: name.to_string(),
            found: value.to_string(),
        })?;

        let mut fragment = Self::new();
        for (key, descriptor) in obj {
            fragment.insert(key.clone(), TypeDescriptor::from_value(name, key, descriptor)?);
        }
        Ok(fragment)
    }
}

/// Immutable set of named fragments
///
/// Fragments refer to each other by name only; no fragment owns another.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SchemaDocument {
    fragments: IndexMap<String, Fragment>,
}

impl SchemaDocument {
    /// An empty document. It has no root, so no request is validated against it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a document from its JSON form, checking every type and reference
    pub fn from_value(value: &Value) -> SchemaResult<Self> {
        let obj = value.as_object().ok_or_else(|| SchemaError::InvalidDocument {
            found: value.to_string(),
        })?;

        let mut fragments = IndexMap::with_capacity(obj.len());
        for (name, fragment) in obj {
            fragments.insert(name.clone(), Fragment::from_value(name, fragment)?);
        }

        Self::from_fragments(fragments)
    }

    /// Extract the document a data store keeps under `key`
    ///
    /// A data store without that key has no schema configured and yields an
    /// empty document.
    pub fn from_data(data: &Value, key: &str) -> SchemaResult<Self> {
        match data.get(key) {
            Some(schema) => Self::from_value(schema),
            None => Ok(Self::empty()),
        }
    }

    /// Build a document from already-parsed fragments, checking references
    pub fn from_fragments<I, S>(fragments: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = (S, Fragment)>,
        S: Into<String>,
    {
        let document = Self {
            fragments: fragments
                .into_iter()
                .map(|(name, fragment)| (name.into(), fragment))
                .collect(),
        };
        document.check_references()?;
        Ok(document)
    }

    pub fn root(&self) -> Option<&Fragment> {
        self.fragment(ROOT_FRAGMENT)
    }

    pub fn fragment(&self, name: &str) -> Option<&Fragment> {
        self.fragments.get(name)
    }

    pub fn fragment_names(&self) -> impl Iterator<Item = &str> {
        self.fragments.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    fn check_references(&self) -> SchemaResult<()> {
        for (name, fragment) in &self.fragments {
            for (key, descriptor) in fragment.iter() {
                if let Some(reference) = descriptor.reference() {
                    if !self.fragments.contains_key(reference) {
                        return Err(SchemaError::DanglingReference {
                            fragment: name.clone(),
                            key: key.to_string(),
                            reference: reference.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
