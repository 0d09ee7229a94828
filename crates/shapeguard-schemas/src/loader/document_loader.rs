//! Loading schema documents from files and strings
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use crate::document::SchemaDocument;
use crate::loader::cache::{CacheConfig, CacheStats, DocumentCache};
use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::parser::{Format, SchemaParser};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

/// Placeholder path reported in errors for documents loaded from memory
const INLINE_SOURCE: &str = "<inline>";

/// Where the document lives inside a loaded file, and how loads are cached
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub cache: CacheConfig,
    /// `None`: the file is the document. `Some(key)`: the file is a data
    /// store and the document sits under `key`.
    pub schema_key: Option<String>,
}

impl LoaderConfig {
    /// Configuration for data stores with the document embedded under `key`
    pub fn embedded(key: impl Into<String>) -> Self {
        Self {
            schema_key: Some(key.into()),
            ..Self::default()
        }
    }
}

/// Reads, builds and caches schema documents
#[derive(Debug)]
pub struct DocumentLoader {
    parser: SchemaParser,
    cache: DocumentCache,
    config: LoaderConfig,
}

impl DocumentLoader {
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            parser: SchemaParser::new(),
            cache: DocumentCache::with_config(config.cache.clone()),
            config,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load the document in `path`, reusing a cached build while the file is unchanged
    pub fn load(&mut self, path: &Path) -> LoaderResult<Arc<SchemaDocument>> {
        let mtime = std::fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

        if let Some(document) = self.cache.get(path, mtime) {
            trace!(path = %path.display(), "schema document served from cache");
            return Ok(document);
        }

        let value = self.parser.parse_file(path)?;
        let document = Arc::new(self.build(&value, path)?);
        debug!(
            path = %path.display(),
            fragments = document.len(),
            has_root = document.root().is_some(),
            "schema document loaded"
        );

        self.cache.put(path, Arc::clone(&document), mtime);
        Ok(document)
    }

    /// Build a document from in-memory content; never cached
    pub fn load_str(&self, content: &str, format: Format) -> LoaderResult<Arc<SchemaDocument>> {
        let source = Path::new(INLINE_SOURCE);
        let value = self.parser.parse_content(content, format, source)?;
        Ok(Arc::new(self.build(&value, source)?))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn build(&self, value: &Value, path: &Path) -> LoaderResult<SchemaDocument> {
        let built = match &self.config.schema_key {
            Some(key) => SchemaDocument::from_data(value, key),
            None => SchemaDocument::from_value(value),
        };
        built.map_err(|e| LoaderError::document_error(PathBuf::from(path), e))
    }
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DEFAULT_SCHEMA_KEY;
    use std::fs;
    use tempfile::tempdir;

    const USERS_YAML: &str = r#"
root:
  users:
    type: collection
    schema: User
User:
  name:
    type: string
"#;

    #[test]
    fn test_load_standalone_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("schema.yaml");
        fs::write(&path, USERS_YAML).unwrap();

        let mut loader = DocumentLoader::new();
        let document = loader.load(&path).unwrap();
        assert!(document.root().is_some());
        assert!(document.fragment("User").is_some());
    }

    #[test]
    fn test_second_load_hits_cache() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("schema.yaml");
        fs::write(&path, USERS_YAML).unwrap();

        let mut loader = DocumentLoader::new();
        let first = loader.load(&path).unwrap();
        let second = loader.load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.cache_stats().total_entries, 1);

        loader.clear_cache();
        let third = loader.load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(first, third);
    }

    #[test]
    fn test_embedded_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        fs::write(
            &path,
            r#"{"users": [], "_schema": {"root": {"name": {"type": "string"}}}}"#,
        )
        .unwrap();

        let mut loader = DocumentLoader::with_config(LoaderConfig::embedded(DEFAULT_SCHEMA_KEY));
        let document = loader.load(&path).unwrap();
        assert!(document.root().unwrap().contains_key("name"));
    }

    #[test]
    fn test_embedded_key_absent_yields_empty_document() {
        let loader = DocumentLoader::with_config(LoaderConfig::embedded("_schema"));
        let document = loader.load_str(r#"{"users": []}"#, Format::Json).unwrap();
        assert!(document.is_empty());
        assert!(document.root().is_none());
    }

    #[test]
    fn test_invalid_document_reported() {
        let loader = DocumentLoader::new();
        let err = loader
            .load_str(r#"{"root": {"a": {"type": "Missing"}}}"#, Format::Json)
            .unwrap_err();
        assert!(err.is_document_error());
        assert_eq!(err.path(), Path::new("<inline>"));
    }

    #[test]
    fn test_missing_file() {
        let mut loader = DocumentLoader::new();
        let err = loader.load(Path::new("/no/such/schema.yaml")).unwrap_err();
        assert!(matches!(err, LoaderError::IoError { .. }));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: LoaderConfig = serde_yaml::from_str("schema_key: _schema\n").unwrap();
        assert_eq!(config.schema_key.as_deref(), Some("_schema"));
        assert_eq!(config.cache, CacheConfig::default());
    }
}
