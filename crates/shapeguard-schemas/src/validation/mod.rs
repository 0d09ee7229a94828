//! Payload validation against schema fragments
//!
//! The [`ObjectValidator`] enforces required and unknown keys for an object
//! and runs the type check for every submitted field. Type checks recurse into
//! nested objects and collections, and fields that declare rules are handed to
//! the type validator registered for their type.
//!
//! Object validation stops at the first violation. Collection checks are the
//! exception: every element is visited and the collection passes or fails as
//! a whole.
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

pub mod base;
pub mod checker;
pub mod error;
pub mod object;

pub use base::{ValidationContext, ValidationMode};
pub use error::{ValidationError, ValidationErrorKind, ValidationResult};
pub use object::ObjectValidator;
