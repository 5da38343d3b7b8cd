//! CLI command implementations

#[cfg(feature = "cli")]
pub mod config;
#[cfg(feature = "cli")]
pub mod guidelines;
#[cfg(feature = "cli")]
pub mod package;
#[cfg(feature = "cli")]
pub mod parameters;

use crate::cli::error::CliError;
use crate::config::InspectorConfig;
use crate::export::ExportResult;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
}

/// Load input content from file or stdin
pub fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        if !path.exists() {
            return Err(CliError::FileNotFound(path));
        }
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}

/// Load an optional input file
pub fn load_optional(input: Option<&Path>) -> Result<Option<String>, CliError> {
    input
        .map(|path| {
            std::fs::read_to_string(path)
                .map_err(|e| CliError::FileReadError(path.to_path_buf(), e.to_string()))
        })
        .transpose()
}

/// Configuration from `--config`, or from the working directory
pub fn load_config(path: Option<&Path>) -> Result<InspectorConfig, CliError> {
    let config = match path {
        Some(path) => InspectorConfig::load_file(path)?,
        None => InspectorConfig::load(Path::new("."))?,
    };
    Ok(config)
}

/// Print a report to stdout or write it to `--output`
pub fn emit(result: &ExportResult, output: Option<&Path>) -> Result<(), CliError> {
    match output {
        Some(path) => {
            result.write_to(path)?;
            eprintln!("Wrote {} report to {}", result.format, path.display());
        }
        None => println!("{}", result.content),
    }
    Ok(())
}
