//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Veracity CLI - Aggregate deception-risk assessments for an investigation.
#[derive(Debug, Parser)]
#[command(name = "veracity")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (defaults to ~/.veracity/config.toml)
    #[arg(short, long, global = true, env = "VERACITY_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database path, overriding the configured one
    #[arg(short, long, global = true, env = "VERACITY_DATABASE")]
    pub database: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (score and level only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run an aggregation for one scope
    Aggregate(AggregateArgs),

    /// Load assessments from a JSON file into the store
    Import(ImportArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the aggregate command.
#[derive(Debug, Parser)]
pub struct AggregateArgs {
    /// Workspace/tenant scope to aggregate
    #[arg(short, long, env = "VERACITY_SCOPE")]
    pub scope: String,

    /// Maximum number of alerts to report
    #[arg(short = 'l', long)]
    pub alert_limit: Option<usize>,

    /// Read subsystems one after another instead of concurrently
    #[arg(long)]
    pub sequential: bool,
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// Workspace/tenant scope the assessments belong to
    #[arg(short, long, env = "VERACITY_SCOPE")]
    pub scope: String,

    /// JSON file with an array of assessment records
    pub file: PathBuf,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
