//! Check command handler

use super::utils::load_document;
use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{DocumentSummary, FragmentSummary, OutputWriter};
use shapeguard_schemas::SchemaDocument;
use tracing::instrument;

/// Handle the check command
///
/// Loading already rejects unknown types and dangling references, so a
/// document that reaches the summary is usable.
#[instrument(skip_all)]
pub fn handle_check(args: CheckArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let (path, document) = load_document(&args.schema, config)?;
    let summary = summarize(&path.display().to_string(), &document);
    if !summary.has_root {
        output.warning("document has no root fragment; no request will be validated")?;
    }
    output.document_summary(&summary)
}

fn summarize(source: &str, document: &SchemaDocument) -> DocumentSummary {
    let fragments = document
        .fragment_names()
        .filter_map(|name| document.fragment(name).map(|fragment| (name, fragment)))
        .map(|(name, fragment)| {
            let mut references: Vec<String> = Vec::new();
            for reference in fragment.iter().filter_map(|(_, d)| d.reference()) {
                if !references.iter().any(|r| r == reference) {
                    references.push(reference.to_string());
                }
            }
            FragmentSummary {
                name: name.to_string(),
                fields: fragment.len(),
                references,
            }
        })
        .collect();

    DocumentSummary {
        source: source.to_string(),
        has_root: document.root().is_some(),
        fragments,
    }
}
