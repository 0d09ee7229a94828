//! In-memory cache of parsed schema documents
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use crate::document::SchemaDocument;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Cache entry holding a built document and the file state it came from
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub document: Arc<SchemaDocument>,
    /// When this entry was cached
    pub cached_at: SystemTime,
    /// File modification time when cached
    pub file_mtime: SystemTime,
    pub file_path: PathBuf,
}

impl CacheEntry {
    pub fn new(document: Arc<SchemaDocument>, file_path: PathBuf, file_mtime: SystemTime) -> Self {
        Self {
            document,
            cached_at: SystemTime::now(),
            file_mtime,
            file_path,
        }
    }

    /// Check if this cache entry is still valid
    pub fn is_valid(&self, current_mtime: SystemTime, max_age: Option<Duration>) -> bool {
        if current_mtime > self.file_mtime {
            return false;
        }

        if let Some(max_age) = max_age {
            if let Ok(elapsed) = self.cached_at.elapsed() {
                if elapsed > max_age {
                    return false;
                }
            }
        }

        true
    }

    /// Get the age of this cache entry
    pub fn age(&self) -> Option<Duration> {
        self.cached_at.elapsed().ok()
    }
}

/// Configuration for cache behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of documents kept
    pub max_entries: usize,
    /// Maximum age for cache entries, in seconds
    pub max_age_secs: Option<u64>,
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 64,
            max_age_secs: Some(3600),
            enabled: true,
        }
    }
}

impl CacheConfig {
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age_secs.map(Duration::from_secs)
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Document cache keyed by canonical file path, evicting least recently used
#[derive(Debug)]
pub struct DocumentCache {
    entries: HashMap<PathBuf, CacheEntry>,
    config: CacheConfig,
    /// Most recently used last
    access_order: Vec<PathBuf>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            config,
            access_order: Vec::new(),
        }
    }

    /// Get a cached document if the file has not changed since it was cached
    pub fn get(&mut self, path: &Path, current_mtime: SystemTime) -> Option<Arc<SchemaDocument>> {
        if !self.config.enabled {
            return None;
        }

        let key = Self::canonicalize_path(path);
        let valid = self
            .entries
            .get(&key)
            .map(|entry| entry.is_valid(current_mtime, self.config.max_age()))?;

        if !valid {
            self.remove(&key);
            return None;
        }

        self.update_access_order(&key);
        self.entries.get(&key).map(|entry| Arc::clone(&entry.document))
    }

    /// Store a document
    pub fn put(&mut self, path: &Path, document: Arc<SchemaDocument>, file_mtime: SystemTime) {
        if !self.config.enabled || self.config.max_entries == 0 {
            return;
        }

        let key = Self::canonicalize_path(path);
        if !self.entries.contains_key(&key) {
            while self.entries.len() >= self.config.max_entries {
                if !self.evict_lru() {
                    break;
                }
            }
        }

        self.entries
            .insert(key.clone(), CacheEntry::new(document, key.clone(), file_mtime));
        self.update_access_order(&key);
    }

    pub fn remove(&mut self, path: &Path) -> Option<CacheEntry> {
        let key = Self::canonicalize_path(path);
        self.access_order.retain(|p| p != &key);
        self.entries.remove(&key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.access_order.clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(&Self::canonicalize_path(path))
    }

    /// Drop entries older than the configured maximum age
    pub fn cleanup_expired(&mut self) -> usize {
        let Some(max_age) = self.config.max_age() else {
            return 0;
        };

        let expired: Vec<PathBuf> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.age().is_some_and(|age| age > max_age))
            .map(|(path, _)| path.clone())
            .collect();

        for path in &expired {
            self.remove(path);
        }
        expired.len()
    }

    pub fn stats(&self) -> CacheStats {
        let ages: Vec<Duration> = self.entries.values().filter_map(CacheEntry::age).collect();
        let average_age = if ages.is_empty() {
            None
        } else {
            Some(ages.iter().sum::<Duration>() / ages.len() as u32)
        };

        CacheStats {
            total_entries: self.entries.len(),
            max_entries: self.config.max_entries,
            average_age,
            enabled: self.config.enabled,
        }
    }

    fn canonicalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
    }

    fn evict_lru(&mut self) -> bool {
        if self.access_order.is_empty() {
            return false;
        }
        let oldest = self.access_order.remove(0);
        self.entries.remove(&oldest);
        true
    }

    fn update_access_order(&mut self, key: &Path) {
        self.access_order.retain(|p| p != key);
        self.access_order.push(key.to_path_buf());
    }
}

impl Default for DocumentCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub max_entries: usize,
    pub average_age: Option<Duration>,
    pub enabled: bool,
}

impl CacheStats {
    /// Fraction of capacity in use, from 0.0 to 1.0
    pub fn utilization(&self) -> f64 {
        if self.max_entries == 0 {
            0.0
        } else {
            self.total_entries as f64 / self.max_entries as f64
        }
    }

    pub fn is_nearly_full(&self) -> bool {
        self.utilization() > 0.8
    }
}
