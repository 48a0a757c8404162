//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use datapackage_core::DescriptorFormat;
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Data package CLI - validate descriptors and resolve their column types
///
/// Reads data package descriptors (JSON or YAML), reports every structural
/// problem in one pass, and shows the storage types each field resolves to.
#[derive(Parser, Debug)]
#[command(
    name = "datapackage",
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
    #[arg(short, long, global = true, env = "DATAPACKAGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (defaults to the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

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
    /// Validate a data package descriptor and report every issue
    Validate(ValidateArgs),

    /// Show the storage types each field resolves to
    Columns(ColumnsArgs),

    /// Decode and re-encode a descriptor in normalized form
    Fmt(FmtArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the descriptor file (JSON or YAML)
    #[arg(value_name = "DESCRIPTOR")]
    pub descriptor: PathBuf,

    /// Also run constraint and naming lint (reported as warnings)
    #[arg(long)]
    pub strict: bool,

    /// Treat warnings as a failed validation
    #[arg(long)]
    pub fail_on_warnings: bool,
}

/// Arguments for the columns command
#[derive(Parser, Debug)]
pub struct ColumnsArgs {
    /// Path to the descriptor file (JSON or YAML)
    #[arg(value_name = "DESCRIPTOR")]
    pub descriptor: PathBuf,

    /// Only show columns of the resource with this path
    #[arg(short, long, value_name = "PATH")]
    pub resource: Option<String>,
}

/// Arguments for the fmt command
#[derive(Parser, Debug)]
pub struct FmtArgs {
    /// Path to the descriptor file (JSON or YAML)
    #[arg(value_name = "DESCRIPTOR")]
    pub descriptor: PathBuf,

    /// Target document format (defaults to the format of the output file)
    #[arg(long, value_enum)]
    pub to: Option<DocumentFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long = "save-to")]
    pub output_file: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize default configuration files
    Init(ConfigInitArgs),

    /// Show current configuration values
    Show(ConfigShowArgs),
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Initialize user config (<config dir>/datapackage/config.toml)
    #[arg(long)]
    pub user: bool,

    /// Initialize project config (.datapackage.toml)
    #[arg(long)]
    pub project: bool,

    /// Force overwrite existing config files
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Descriptor document formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DocumentFormat {
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
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

impl OutputFormat {
    /// Parse a configured format name, as written in config files
    pub fn from_config(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
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

impl From<DocumentFormat> for DescriptorFormat {
    fn from(format: DocumentFormat) -> Self {
        match format {
            DocumentFormat::Json => DescriptorFormat::Json,
            DocumentFormat::Yaml => DescriptorFormat::Yaml,
        }
    }
}
