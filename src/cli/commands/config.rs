//! Config command handler

use std::path::Path;

use crate::cli::error::CliError;
use crate::config::{CONFIG_FILENAME, InspectorConfig, sample_config};

/// Write a sample configuration file into a directory
pub fn handle_config_init(dir: &Path, force: bool) -> Result<(), CliError> {
    if !dir.is_dir() {
        return Err(CliError::FileNotFound(dir.to_path_buf()));
    }
    let path = dir.join(CONFIG_FILENAME);
    if InspectorConfig::exists(dir) && !force {
        return Err(CliError::InvalidArgument(format!(
            "{} already exists, use --force to overwrite",
            path.display()
        )));
    }

    std::fs::write(&path, sample_config())
        .map_err(|e| CliError::FileWriteError(path.clone(), e.to_string()))?;
    println!("Created {}", path.display());
    Ok(())
}

/// Print the effective configuration as TOML
pub fn handle_config_show(config: &InspectorConfig) -> Result<(), CliError> {
    print!("{}", config.to_toml()?);
    Ok(())
}
