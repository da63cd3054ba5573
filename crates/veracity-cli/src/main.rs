//! Veracity CLI - Command-line interface for deception-risk aggregation.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use veracity_cli::commands;
use veracity_cli::{Cli, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `--verbose` forces debug, otherwise RUST_LOG or info.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> veracity_cli::Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };

    let mut config = Config::load_from(&config_path)?;
    if let Some(database) = cli.database {
        config.database = database;
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Aggregate(args) => {
            commands::execute_aggregate(args, &config, &formatter).await?;
        }
        Command::Import(args) => {
            commands::execute_import(args, &config, &formatter)?;
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)?;
        }
    }

    Ok(())
}
