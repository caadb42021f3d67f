//! Config command: inspect and initialize the configuration file.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;
use tracing::info;

/// Execute a config action against the file at `path`.
pub fn execute_config(args: ConfigArgs, config: &Config, path: &Path, formatter: &Formatter) -> Result<String> {
    match args.action {
        ConfigAction::Show => config.to_toml(),
        ConfigAction::Path => Ok(path.display().to_string()),
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                return Err(CliError::InvalidInput(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            Config::default().save_to(path)?;
            info!("Wrote default configuration to {}", path.display());
            Ok(formatter.success(&format!("Wrote {}", path.display())))
        }
    }
}
