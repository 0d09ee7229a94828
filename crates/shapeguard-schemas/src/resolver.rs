//! Schema resolution
//!
//! Two walks are supported:
//!
//! - [`resolve_request`] descends from the `root` fragment along a request
//!   path, entering every referenced fragment it passes through. Segments that
//!   are not schema fields (collection member ids, for instance) and fields
//!   without a fragment reference leave the cursor where it is.
//! - [`resolve_named`] looks a fragment up by name; used once the engine is
//!   already inside the document and follows a `schema` reference.
//!
//! Both are pure functions of the document and their arguments.
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use crate::document::{Fragment, SchemaDocument};
use crate::validation::{ValidationError, ValidationResult};
use tracing::trace;

/// Split a request path into segments, dropping empty ones
///
/// `"/users/42/"` becomes `["users", "42"]`.
pub fn split_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve the fragment describing the resource addressed by `segments`
///
/// Returns `Ok(None)` when the document has no `root` fragment: no schema is
/// configured and validation does not apply.
pub fn resolve_request<'a, S: AsRef<str>>(
    document: &'a SchemaDocument,
    segments: &[S],
) -> ValidationResult<Option<&'a Fragment>> {
    match document.root() {
        Some(root) => descend(document, root, segments).map(Some),
        None => Ok(None),
    }
}

/// Look up a fragment by name
pub fn resolve_named<'a>(document: &'a SchemaDocument, name: &str) -> ValidationResult<&'a Fragment> {
    document.fragment(name).ok_or_else(|| {
        ValidationError::configuration("$", format!("schema '{}' is not defined in the document", name))
    })
}

fn descend<'a, S: AsRef<str>>(
    document: &'a SchemaDocument,
    cursor: &'a Fragment,
    segments: &[S],
) -> ValidationResult<&'a Fragment> {
    let Some((segment, rest)) = segments.split_first() else {
        return Ok(cursor);
    };
    let segment = segment.as_ref();

    let next = match cursor.get(segment).and_then(|descriptor| descriptor.reference()) {
        Some(reference) => {
            trace!(segment, reference, "entering referenced schema");
            resolve_named(document, reference)?
        }
        None => {
            trace!(segment, "segment does not enter a schema; cursor unchanged");
            cursor
        }
    };

    descend(document, next, rest)
}
