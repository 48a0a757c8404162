//! Data package CLI - validate descriptors and resolve their column types
//!
//! This is the main entry point for the `datapackage` command, providing
//! commands for validating descriptors, listing resolved columns and
//! normalizing descriptor documents.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands, OutputFormat};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Configuration errors are reported after logging is up
    let config = Config::load_with_file(cli.config.as_deref());

    // Set up colored output
    let use_color = cli.use_color() && config.as_ref().map_or(true, |c| c.output.color);
    control::set_override(use_color);

    // Initialize logging
    if let Err(e) = init_logging(&cli, config.as_ref().ok()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    // Run the application
    let result = config.and_then(|config| run(cli, &config, use_color));

    // Handle the result
    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}", error::format_error(&e, use_color));

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: &Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = output_format(&cli, config);
    let mut output = OutputWriter::new(format, use_color, cli.quiet, cli.verbosity_level());

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        ?format,
        "Executing command"
    );

    // Handle the subcommand
    match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, config, &mut output),
        Commands::Columns(args) => handlers::handle_columns(args, &mut output),
        Commands::Fmt(args) => handlers::handle_fmt(args, &mut output),
        Commands::Config(args) => handlers::handle_config(args, config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// The `--output` flag wins over the configured default
fn output_format(cli: &Cli, config: &Config) -> OutputFormat {
    if let Some(format) = cli.output {
        return format;
    }

    OutputFormat::from_config(&config.output.format).unwrap_or_else(|| {
        tracing::warn!(format = %config.output.format, "Unknown output format in config, using human");
        OutputFormat::Human
    })
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: Option<&Config>) -> Result<()> {
    // Create logging configuration from CLI args, config file and environment
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());

    if let Some(config) = config {
        logging_config.merge_with_file_config(&config.logging, cli.verbosity_level());
    }

    // Apply environment overrides
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    // Initialize the logging system
    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        // Test verbose flag
        let cli = Cli::parse_from(["datapackage", "-vv", "validate", "datapackage.json"]);
        assert_eq!(cli.verbosity_level(), 2);

        // Test quiet flag
        let cli = Cli::parse_from(["datapackage", "--quiet", "validate", "datapackage.json"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_output_format_precedence() {
        let mut config = Config::default();
        config.output.format = "yaml".to_string();

        let cli = Cli::parse_from(["datapackage", "columns", "datapackage.json"]);
        assert_eq!(output_format(&cli, &config), OutputFormat::Yaml);

        let cli = Cli::parse_from(["datapackage", "-o", "json-pretty", "columns", "datapackage.json"]);
        assert_eq!(output_format(&cli, &config), OutputFormat::JsonPretty);

        config.output.format = "xml".to_string();
        let cli = Cli::parse_from(["datapackage", "columns", "datapackage.json"]);
        assert_eq!(output_format(&cli, &config), OutputFormat::Human);
    }
}
