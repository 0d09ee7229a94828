//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use shapeguard_schemas::{LoaderError, ValidationError};
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The schema document could not be loaded
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// The body was checked and does not conform
    #[error("Request rejected at {}: {}", .0.path, .0)]
    Rejected(ValidationError),

    /// The schema document is unusable for this request
    #[error("{} (at {})", .0, .0.path)]
    SchemaConfiguration(ValidationError),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Invalid file format
    #[error("Invalid file format for {}: expected {} format", path.display(), expected)]
    InvalidFormat { path: PathBuf, expected: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument combination
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<ValidationError> for Error {
    fn from(error: ValidationError) -> Self {
        if error.is_configuration() {
            Self::SchemaConfiguration(error)
        } else {
            Self::Rejected(error)
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs(message.into())
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Rejected(_) => 2,
            Self::FileNotFound { .. } => 3,
            Self::InvalidFormat { .. } => 4,
            Self::Config(_) => 5,
            Self::InvalidArgs(_) => 6,
            Self::Loader(_) => 7,
            Self::SchemaConfiguration(_) => 8,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
        }
    }

    /// Rejections are already in the command's report; only the exit code
    /// carries them further
    pub fn is_reported(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidArgs(_))
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        let label = match error {
            Error::Rejected(_) => "Rejected:".yellow().bold(),
            _ => "Error:".red().bold(),
        };
        format!("{} {}", label, error)
    } else {
        format!("Error: {}", error)
    }
}
