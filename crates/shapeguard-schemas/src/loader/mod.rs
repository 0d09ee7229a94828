//! Schema document loading
//!
//! Reads YAML or JSON files, builds a [`SchemaDocument`](crate::document::SchemaDocument)
//! from them and caches the result until the file changes.
//!
//! ```rust
//! use shapeguard_schemas::loader::{DocumentLoader, Format};
//!
//! let loader = DocumentLoader::new();
//! let document = loader.load_str(
//!     r#"{"root": {"name": {"type": "string"}}}"#,
//!     Format::Json,
//! )?;
//! assert!(document.root().is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

pub mod cache;
pub mod document_loader;
pub mod error;
pub mod parser;

pub use cache::{CacheConfig, CacheEntry, CacheStats, DocumentCache};
pub use document_loader::{DocumentLoader, LoaderConfig};
pub use error::{LoaderError, LoaderResult};
pub use parser::{Format, SchemaParser};
