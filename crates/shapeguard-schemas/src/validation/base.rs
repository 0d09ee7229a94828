//! Validation context threaded through a single validation pass
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};

/// How strictly required keys are enforced on the top-level payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Every declared key must be present
    Full,
    /// Declared keys may be omitted (partial update)
    Partial,
}

/// Where in the payload validation currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationContext {
    /// Current JSON path
    pub path: String,
    /// Required-key mode for the object at `path`
    pub mode: ValidationMode,
}

impl ValidationContext {
    /// Create a context for a top-level payload
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            path: "$".to_string(),
            mode,
        }
    }

    /// Context for a top-level payload that must be complete
    pub fn full() -> Self {
        Self::new(ValidationMode::Full)
    }

    /// Context for a top-level partial update
    pub fn partial() -> Self {
        Self::new(ValidationMode::Partial)
    }

    /// Create a child context for an object field
    ///
    /// Nested objects always enforce their required keys.
    pub fn child<P: AsRef<str>>(&self, path_segment: P) -> Self {
        Self {
            path: format!("{}.{}", self.path, path_segment.as_ref()),
            mode: ValidationMode::Full,
        }
    }

    /// Create a child context for array index
    pub fn child_index(&self, index: usize) -> Self {
        Self {
            path: format!("{}[{}]", self.path, index),
            mode: ValidationMode::Full,
        }
    }

    pub fn is_partial(&self) -> bool {
        self.mode == ValidationMode::Partial
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::full()
    }
}
