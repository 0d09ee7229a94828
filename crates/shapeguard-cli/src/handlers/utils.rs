//! Shared utilities for command handlers

use crate::cli::SchemaArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use serde_json::Value;
use shapeguard_schemas::{DocumentLoader, SchemaDocument};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Body argument meaning "read from stdin"
const STDIN_MARKER: &str = "-";

/// Load the schema document named on the command line or in the config
pub fn load_document(args: &SchemaArgs, config: &Config) -> Result<(PathBuf, Arc<SchemaDocument>)> {
    let path = args
        .schema
        .clone()
        .or_else(|| config.schema.clone())
        .ok_or_else(|| {
            Error::invalid_args("no schema document given; pass --schema or set `schema` in the config")
        })?;

    if !path.exists() {
        return Err(Error::FileNotFound { path });
    }

    let mut loader_config = config.loader.clone();
    if args.schema_key.is_some() {
        loader_config.schema_key = args.schema_key.clone();
    }
    debug!(path = %path.display(), schema_key = ?loader_config.schema_key, "loading schema document");

    let document = DocumentLoader::with_config(loader_config).load(&path)?;
    Ok((path, document))
}

/// Read a request body from a file, or JSON from stdin for `-`
pub fn read_body(path: &Path) -> Result<Value> {
    if path == Path::new(STDIN_MARKER) {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return parse_body(&content, path, false);
    }

    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    let is_yaml = matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    );
    parse_body(&content, path, is_yaml)
}

fn parse_body(content: &str, path: &Path, is_yaml: bool) -> Result<Value> {
    let invalid = |expected: &str| Error::InvalidFormat {
        path: path.to_path_buf(),
        expected: expected.to_string(),
    };
    if is_yaml {
        serde_yaml::from_str(content).map_err(|_| invalid("YAML"))
    } else {
        serde_json::from_str(content).map_err(|_| invalid("JSON"))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::fs;
    use std::path::{Path, PathBuf};

    pub const USERS_SCHEMA: &str = r#"
root:
  users:
    type: collection
    schema: User
User:
  name:
    type: string
    validation:
      - minLength: 2
  address:
    type: object
    schema: Address
Address:
  city:
    type: string
"#;

    pub fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }
}
