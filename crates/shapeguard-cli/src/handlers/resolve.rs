//! Resolve command handler

use super::utils::load_document;
use crate::cli::ResolveArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{OutputWriter, ResolveReport};
use shapeguard_schemas::{resolve_request, split_path, Fragment, SchemaDocument};
use std::ptr;
use tracing::instrument;

/// Handle the resolve command
#[instrument(skip_all, fields(path = %args.path))]
pub fn handle_resolve(args: ResolveArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let (_, document) = load_document(&args.schema, config)?;
    let report = resolve_report(&document, &args.path)?;
    output.resolve_report(&report)
}

fn resolve_report(document: &SchemaDocument, path: &str) -> Result<ResolveReport> {
    let segments = split_path(path);
    let fragment = resolve_request(document, segments.as_slice())?;

    Ok(ResolveReport {
        path: format!("/{}", segments.join("/")),
        fragment: fragment.and_then(|fragment| fragment_name(document, fragment)),
        fields: fragment.cloned(),
        segments,
    })
}

/// Name under which `fragment` is stored in `document`
fn fragment_name(document: &SchemaDocument, fragment: &Fragment) -> Option<String> {
    document
        .fragment_names()
        .find(|name| document.fragment(name).is_some_and(|f| ptr::eq(f, fragment)))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> SchemaDocument {
        SchemaDocument::from_value(&json!({
            "root": {"users": {"type": "collection", "schema": "User"}},
            "User": {"address": {"type": "object", "schema": "Address"}},
            "Address": {"city": {"type": "string"}}
        }))
        .unwrap()
    }

    #[test]
    fn test_resolves_through_collections_and_objects() {
        let doc = document();
        assert_eq!(resolve_report(&doc, "/").unwrap().fragment.as_deref(), Some("root"));
        assert_eq!(resolve_report(&doc, "/users").unwrap().fragment.as_deref(), Some("User"));
        assert_eq!(resolve_report(&doc, "/users/9").unwrap().fragment.as_deref(), Some("User"));

        let report = resolve_report(&doc, "users//9/address/").unwrap();
        assert_eq!(report.fragment.as_deref(), Some("Address"));
        assert_eq!(report.path, "/users/9/address");
        assert!(report.fields.unwrap().contains_key("city"));
    }

    #[test]
    fn test_no_root() {
        let report = resolve_report(&SchemaDocument::empty(), "/users").unwrap();
        assert!(report.fragment.is_none());
        assert!(report.fields.is_none());
    }
}
