//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Render the effective configuration in the formatter's format.
pub fn render_config(config: &Config, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(config)?),
        OutputFormat::Table | OutputFormat::Quiet => config.to_toml(),
    }
}

/// Write a default configuration to `path`.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn init_config(path: &Path, force: bool) -> Result<Config> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let config = Config::default();
    config.save_to(path)?;
    Ok(config)
}

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            if formatter.format() == OutputFormat::Table {
                println!("{}", formatter.info(&format!("Configuration file: {}", path.display())));
            }
            println!("{}", render_config(config, formatter.format())?);
            if let Err(e) = config.validate() {
                eprintln!("{}", formatter.warning(&e.to_string()));
            }
        }
        ConfigAction::Init { force } => {
            init_config(path, force)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote default configuration to {}", path.display()))
            );
        }
    }

    Ok(())
}
