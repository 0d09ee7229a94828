//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing command
//! reports in various formats (JSON, YAML, human-readable).

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::logging::redaction;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use shapeguard_schemas::{Fragment, Method, ValidationError};
use std::io::{self, Write};
use tracing::trace;

/// Result of the validate command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub method: Method,
    pub path: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// What happened to the body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Accepted,
    Skipped { reason: String },
    Rejected {
        status_code: u16,
        error: ValidationError,
    },
}

/// Result of the resolve command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveReport {
    pub path: String,
    pub segments: Vec<String>,
    /// Name of the fragment the cursor stopped at; `None` without a root
    pub fragment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Fragment>,
}

/// Result of the check command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    pub source: String,
    pub has_root: bool,
    pub fragments: Vec<FragmentSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentSummary {
    pub name: String,
    pub fields: usize,
    pub references: Vec<String>,
}

/// Trait for formatting command reports
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    fn format_validation_report(&self, report: &ValidationReport) -> Result<String>;

    fn format_resolve_report(&self, report: &ResolveReport) -> Result<String>;

    fn format_document_summary(&self, summary: &DocumentSummary) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty | OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }

    fn format_validation_report(&self, report: &ValidationReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_validation_report_human(report)),
            _ => self.format(report),
        }
    }

    fn format_resolve_report(&self, report: &ResolveReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_resolve_report_human(report)),
            _ => self.format(report),
        }
    }

    fn format_document_summary(&self, summary: &DocumentSummary) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_document_summary_human(summary)),
            _ => self.format(summary),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message (human format only)
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a warning message (human format only)
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    pub fn validation_report(&mut self, report: &ValidationReport) -> Result<()> {
        let formatted = self.format.format_validation_report(report)?;
        self.emit(formatted, report_color(&report.outcome))
    }

    pub fn resolve_report(&mut self, report: &ResolveReport) -> Result<()> {
        let formatted = self.format.format_resolve_report(report)?;
        self.emit(formatted, None)
    }

    pub fn document_summary(&mut self, summary: &DocumentSummary) -> Result<()> {
        let formatted = self.format.format_document_summary(summary)?;
        self.emit(formatted, None)
    }

    /// Trace a request body with sensitive keys masked
    pub fn trace_body(&self, body: &Value) {
        trace!(body = %redaction::redacted(body), "request body");
    }

    fn emit(&mut self, formatted: String, color: Option<colored::Color>) -> Result<()> {
        let formatted = formatted.trim_end().to_string();
        match color {
            Some(color) if self.use_color && self.format == OutputFormat::Human => {
                self.writeln(&formatted.color(color).to_string())
            }
            _ => self.writeln(&formatted),
        }
    }
}

fn report_color(outcome: &Outcome) -> Option<colored::Color> {
    Some(match outcome {
        Outcome::Accepted => colored::Color::Green,
        Outcome::Skipped { .. } => colored::Color::Yellow,
        Outcome::Rejected { .. } => colored::Color::Red,
    })
}

fn format_validation_report_human(report: &ValidationReport) -> String {
    let target = format!("{} {}", report.method, report.path);
    match &report.outcome {
        Outcome::Accepted => format!("✓ {}: accepted", target),
        Outcome::Skipped { reason } => format!("- {}: skipped ({})", target, reason),
        Outcome::Rejected { status_code, error } => format!(
            "✗ {}: rejected with status {}\n  at {}: {}",
            target, status_code, error.path, error
        ),
    }
}

fn format_resolve_report_human(report: &ResolveReport) -> String {
    let Some(name) = &report.fragment else {
        return format!("{}: no root fragment configured; requests are not validated", report.path);
    };

    let mut output = format!("{} -> {}\n", report.path, name);
    if let Some(fields) = &report.fields {
        for (key, descriptor) in fields.iter() {
            let rules = descriptor
                .validation
                .as_ref()
                .map(|rules| format!(" ({} rule(s))", rules.len()))
                .unwrap_or_default();
            output.push_str(&format!("  {}: {}{}\n", key, descriptor.expected(), rules));
        }
    }
    output
}

fn format_document_summary_human(summary: &DocumentSummary) -> String {
    let mut output = format!(
        "{}: {} fragment(s){}\n",
        summary.source,
        summary.fragments.len(),
        if summary.has_root { "" } else { ", no root" }
    );
    for fragment in &summary.fragments {
        output.push_str(&format!("  {} ({} field(s))", fragment.name, fragment.fields));
        if !fragment.references.is_empty() {
            output.push_str(&format!(" -> {}", fragment.references.join(", ")));
        }
        output.push('\n');
    }
    output
}
