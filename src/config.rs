//! Configuration file support
//!
//! Handles parsing of `.cpi-inspector.toml` configuration files and
//! environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::models::{DEFAULT_PARAMETER_TYPE, GLOBAL_CATEGORY};

/// Default configuration filename
pub const CONFIG_FILENAME: &str = ".cpi-inspector.toml";

/// Environment variable for the global parameter category label
pub const ENV_GLOBAL_CATEGORY: &str = "CPI_INSPECTOR_GLOBAL_CATEGORY";

/// Error loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Config error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Parameter analysis configuration section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSection {
    /// Category for parameters without a reference entry
    #[serde(default = "default_global_category")]
    pub global_category: String,

    /// Type assumed when a definition has none
    #[serde(default = "default_parameter_type")]
    pub default_type: String,
}

fn default_global_category() -> String {
    GLOBAL_CATEGORY.to_string()
}

fn default_parameter_type() -> String {
    DEFAULT_PARAMETER_TYPE.to_string()
}

impl Default for ParameterSection {
    fn default() -> Self {
        Self {
            global_category: default_global_category(),
            default_type: default_parameter_type(),
        }
    }
}

/// Artifact file recognition section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSection {
    /// Suffix of parameter schema documents
    #[serde(default = "default_schema_suffix")]
    pub schema_suffix: String,

    /// Suffix of property stores
    #[serde(default = "default_property_suffix")]
    pub property_suffix: String,

    /// Suffix of process definitions
    #[serde(default = "default_process_suffix")]
    pub process_suffix: String,
}

fn default_schema_suffix() -> String {
    ".propdef".to_string()
}

fn default_property_suffix() -> String {
    ".prop".to_string()
}

fn default_process_suffix() -> String {
    ".iflw".to_string()
}

impl Default for ArchiveSection {
    fn default() -> Self {
        Self {
            schema_suffix: default_schema_suffix(),
            property_suffix: default_property_suffix(),
            process_suffix: default_process_suffix(),
        }
    }
}

/// Main configuration structure
///
/// Represents the `.cpi-inspector.toml` configuration file format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectorConfig {
    /// Parameter analysis configuration
    #[serde(default)]
    pub parameters: ParameterSection,

    /// Artifact file recognition
    #[serde(default)]
    pub archive: ArchiveSection,
}

impl InspectorConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a directory
    ///
    /// Looks for `.cpi-inspector.toml` in the directory.
    /// Falls back to defaults if not found.
    pub fn load(dir: &Path) -> ConfigResult<Self> {
        let config_path = dir.join(CONFIG_FILENAME);
        if config_path.exists() {
            Self::load_file(&config_path)
        } else {
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Load configuration from an explicit file path
    pub fn load_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("Failed to read config: {}", e)))?;
        let mut config = Self::parse(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> ConfigResult<Self> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a directory
    pub fn save(&self, dir: &Path) -> ConfigResult<()> {
        let config_path = dir.join(CONFIG_FILENAME);
        let content = self.to_toml()?;

        std::fs::write(&config_path, content)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(category) = std::env::var(ENV_GLOBAL_CATEGORY)
            && !category.trim().is_empty()
        {
            self.parameters.global_category = category;
        }
    }

    /// Check if configuration exists in a directory
    pub fn exists(dir: &Path) -> bool {
        dir.join(CONFIG_FILENAME).exists()
    }
}

/// Generate a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# CPI Package Inspector Configuration

[parameters]
# Category for parameters that have no reference entry in the schema
global_category = "Global Parameters"

# Type assumed for parameter definitions without a <type>
default_type = "xsd:string"

[archive]
# File suffixes used to locate artifact files inside an integration flow archive
schema_suffix = ".propdef"
property_suffix = ".prop"
process_suffix = ".iflw"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = InspectorConfig::new();
        assert_eq!(config.parameters.global_category, GLOBAL_CATEGORY);
        assert_eq!(config.parameters.default_type, DEFAULT_PARAMETER_TYPE);
        assert_eq!(config.archive.schema_suffix, ".propdef");
        assert_eq!(config.archive.property_suffix, ".prop");
        assert_eq!(config.archive.process_suffix, ".iflw");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[parameters]
global_category = "Allgemein"

[archive]
process_suffix = ".bpmn"
"#;
        let config = InspectorConfig::parse(toml).unwrap();
        assert_eq!(config.parameters.global_category, "Allgemein");
        assert_eq!(config.parameters.default_type, DEFAULT_PARAMETER_TYPE);
        assert_eq!(config.archive.process_suffix, ".bpmn");
        assert_eq!(config.archive.schema_suffix, ".propdef");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = InspectorConfig::parse("[parameters\nglobal_category = 1");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let mut config = InspectorConfig::new();
        config.archive.schema_suffix = ".pdef".to_string();

        config.save(dir.path()).unwrap();
        assert!(InspectorConfig::exists(dir.path()));

        let loaded = InspectorConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.archive.schema_suffix, ".pdef");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let loaded = InspectorConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.archive, ArchiveSection::default());
    }

    #[test]
    fn test_sample_config_is_valid() {
        let result = InspectorConfig::parse(sample_config());
        assert!(result.is_ok(), "Sample config should be valid TOML");
        assert_eq!(result.unwrap(), InspectorConfig::new());
    }
}
