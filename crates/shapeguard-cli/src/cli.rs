//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use shapeguard_schemas::Method;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Shapeguard CLI - validate JSON request bodies against a schema document
///
/// Resolves the fragment a request path addresses and checks a body against
/// it the same way a server would before accepting a write.
#[derive(Parser, Debug)]
#[command(
    name = "shapeguard",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SHAPEGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a request body against the schema document
    Validate(ValidateArgs),

    /// Show which fragment a request path resolves to
    Resolve(ResolveArgs),

    /// Load a schema document and report its fragments
    Check(CheckArgs),
}

/// Where the schema document comes from
#[derive(Parser, Debug, Clone, Default)]
pub struct SchemaArgs {
    /// Schema document or data store file (JSON or YAML); falls back to `schema` in the config
    #[arg(short, long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Read the document from this key of a data store instead of the whole file
    #[arg(long, value_name = "KEY")]
    pub schema_key: Option<String>,
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Request body file (JSON or YAML), or `-` for JSON on stdin
    #[arg(value_name = "BODY")]
    pub body: PathBuf,

    /// Resource path of the request, e.g. /users/42
    #[arg(short, long, default_value = "/")]
    pub path: String,

    /// Request method; decides whether validation is skipped or partial
    #[arg(short, long, default_value = "POST")]
    pub method: Method,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Resource path to resolve
    #[arg(value_name = "PATH", default_value = "/")]
    pub path: String,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}
