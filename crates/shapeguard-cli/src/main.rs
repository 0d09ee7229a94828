//! Shapeguard CLI - validate JSON request bodies against a schema document
//!
//! This is the main entry point for the Shapeguard CLI application, providing
//! commands for validating bodies, resolving request paths and checking
//! schema documents.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    let cli = Cli::parse_args();

    // Configuration feeds the logger, so it loads before logging starts
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", error::format_error(&e, false));
            process::exit(e.exit_code());
        }
    };

    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);

    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli, &config, use_color) {
        Ok(()) => process::exit(0),
        Err(e) => {
            if !e.is_reported() {
                eprintln!("{}", error::format_error(&e, use_color));
            }

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip_all, fields(command = ?cli.command))]
fn run(cli: Cli, config: &Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let mut output = OutputWriter::new(cli.output, use_color, cli.quiet);

    tracing::info!(verbosity = cli.verbosity_level(), "Executing command");

    match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, config, &mut output),
        Commands::Resolve(args) => handlers::handle_resolve(args, config, &mut output),
        Commands::Check(args) => handlers::handle_check(args, config, &mut output),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let logging_config = logging_config(cli, config);
    logging::init_logging(logging_config)
}

/// Config file settings, replaced by `-v` when given, then environment overrides
fn logging_config(cli: &Cli, config: &Config) -> LoggingConfig {
    let mut logging_config = if cli.verbosity_level() > 0 {
        LoggingConfig::from_verbosity(cli.verbosity_level())
    } else {
        config.logging.clone()
    };

    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging_config
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["shapeguard", "-vv", "validate", "body.json"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["shapeguard", "--quiet", "check"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_quiet_logging_only_errors() {
        let cli = Cli::parse_from(["shapeguard", "--quiet", "check"]);
        let config = logging_config(&cli, &Config::default());
        assert_eq!(config.level, "error");
        assert!(!config.console);
    }
}
