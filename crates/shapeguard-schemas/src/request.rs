//! Request context handed to the engine by its host
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use crate::resolver::split_path;
use crate::validation::ValidationMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// HTTP-like request method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Head,
    Options,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported request method '{0}'")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

/// The addressed resource and how it is being written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub method: Method,
    /// Path segments of the addressed resource, empty segments removed
    pub segments: Vec<String>,
}

impl RequestContext {
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            segments: split_path(path),
        }
    }

    /// The addressed path, normalised
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

/// What the engine does for a request, decided by its method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Treatment {
    /// No body to validate
    Skip,
    /// Validate the body
    Validate(ValidationMode),
}

/// Which methods skip validation and which submit partial updates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestPolicy {
    /// Methods whose requests are never validated
    pub skip: Vec<Method>,
    /// Methods whose top-level body may omit declared keys
    pub partial: Vec<Method>,
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self {
            skip: vec![Method::Get, Method::Head, Method::Options, Method::Delete],
            partial: vec![Method::Put, Method::Patch],
        }
    }
}

impl RequestPolicy {
    /// A policy validating every method with full required-key enforcement
    pub fn strict() -> Self {
        Self {
            skip: Vec::new(),
            partial: Vec::new(),
        }
    }

    pub fn treatment(&self, method: Method) -> Treatment {
        if self.skip.contains(&method) {
            Treatment::Skip
        } else if self.partial.contains(&method) {
            Treatment::Validate(ValidationMode::Partial)
        } else {
            Treatment::Validate(ValidationMode::Full)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parsing() {
        assert_eq!("post".parse::<Method>().unwrap(), Method::Post);
        assert_eq!("PATCH".parse::<Method>().unwrap(), Method::Patch);
        assert_eq!(
            "TRACE".parse::<Method>().unwrap_err(),
            UnknownMethod("TRACE".to_string())
        );
        assert_eq!(Method::Options.to_string(), "OPTIONS");
    }

    #[test]
    fn test_method_serde() {
        assert_eq!(serde_json::to_string(&Method::Put).unwrap(), "\"PUT\"");
        let methods: Vec<Method> = serde_json::from_str(r#"["GET", "DELETE"]"#).unwrap();
        assert_eq!(methods, vec![Method::Get, Method::Delete]);
    }

    #[test]
    fn test_request_context_path() {
        let request = RequestContext::new(Method::Post, "/users/42/");
        assert_eq!(request.segments, vec!["users", "42"]);
        assert_eq!(request.path(), "/users/42");
    }

    #[test]
    fn test_default_policy() {
        let policy = RequestPolicy::default();
        assert_eq!(policy.treatment(Method::Get), Treatment::Skip);
        assert_eq!(policy.treatment(Method::Delete), Treatment::Skip);
        assert_eq!(policy.treatment(Method::Post), Treatment::Validate(ValidationMode::Full));
        assert_eq!(policy.treatment(Method::Put), Treatment::Validate(ValidationMode::Partial));
        assert_eq!(policy.treatment(Method::Patch), Treatment::Validate(ValidationMode::Partial));
    }

    #[test]
    fn test_strict_policy_validates_everything_fully() {
        let policy = RequestPolicy::strict();
        assert_eq!(policy.treatment(Method::Get), Treatment::Validate(ValidationMode::Full));
        assert_eq!(policy.treatment(Method::Put), Treatment::Validate(ValidationMode::Full));
    }

    #[test]
    fn test_policy_deserializes_with_defaults() {
        let policy: RequestPolicy = serde_json::from_str(r#"{"partial": ["PATCH"]}"#).unwrap();
        assert_eq!(policy.partial, vec![Method::Patch]);
        assert_eq!(policy.skip, RequestPolicy::default().skip);
    }
}
