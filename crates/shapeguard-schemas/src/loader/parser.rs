//! Document parsing for YAML and JSON formats
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde_json::Value;
use std::path::Path;

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
        }
    }

    /// Get the primary file extension for this format
    pub fn primary_extension(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
        }
    }
}

/// Parser turning YAML or JSON text into a JSON value
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaParser;

impl SchemaParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a file, detecting format from extension
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

        self.parse_content(&content, format, path)
    }

    /// Parse content with explicit format; `path` is only used in errors
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        match format {
            Format::Yaml => self.parse_yaml(content, path),
            Format::Json => self.parse_json(content, path),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        // First parse as YAML Value to catch YAML-specific errors
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?;

        // Convert to JSON Value for consistent handling
        serde_json::to_value(yaml_value)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        serde_json::from_str(content)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(Path::new("test.yaml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("test.YML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("test.json")).unwrap(), Format::Json);

        assert!(Format::from_path(Path::new("test.txt")).is_err());
        assert!(Format::from_path(Path::new("test")).is_err());
    }

    #[test]
    fn test_yaml_and_json_agree() {
        let parser = SchemaParser::new();
        let yaml = "root:\n  name:\n    type: string\n    validation:\n      - minLength: 2\n";
        let json_text = r#"{"root": {"name": {"type": "string", "validation": [{"minLength": 2}]}}}"#;

        let from_yaml = parser.parse_content(yaml, Format::Yaml, Path::new("a.yaml")).unwrap();
        let from_json = parser.parse_content(json_text, Format::Json, Path::new("a.json")).unwrap();
        assert_eq!(from_yaml, from_json);
        assert_eq!(from_yaml["root"]["name"]["validation"][0], json!({"minLength": 2}));
    }

    #[test]
    fn test_parse_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("schema.json");
        fs::write(&path, r#"{"root": {}}"#).unwrap();

        let value = SchemaParser::new().parse_file(&path).unwrap();
        assert_eq!(value, json!({"root": {}}));
    }

    #[test]
    fn test_parse_errors_carry_path() {
        let parser = SchemaParser::new();
        let err = parser
            .parse_content("{not json", Format::Json, Path::new("bad.json"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::JsonParseError { .. }));
        assert_eq!(err.path(), Path::new("bad.json"));

        let err = parser.parse_file(Path::new("/definitely/missing.yaml")).unwrap_err();
        assert!(matches!(err, LoaderError::IoError { .. }));
    }
}
