//! TOML configuration files.
//!
//! ```toml
//! [generator]
//! length = 16
//! numbers = true
//! symbols = "!@#$%&*"
//! strict = true
//!
//! [output]
//! count = 5
//! ```

use super::GeneratorOptions;
use crate::error::GenerateError;
use crate::generator::{CharacterPool, StrictRules};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration loading errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
    #[error("invalid generator options: {0}")]
    Invalid(#[from] GenerateError),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Password options.
    #[serde(default)]
    pub generator: GeneratorOptions,
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Number of passwords to generate.
    pub count: usize,
    /// Worker threads for bulk generation.
    pub workers: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            count: 1,
            workers: 1,
        }
    }
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Runs every check a generator would run at construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()?;
        let pool = CharacterPool::assemble(&self.generator)?;
        if self.generator.strict {
            StrictRules::from_options(&self.generator).ensure_satisfiable(&pool)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Symbols;

    #[test]
    fn test_default_config_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.output.count, 1);
    }

    #[test]
    fn test_parse_full_config() {
        let config = FileConfig::from_toml(
            r#"
            [generator]
            length = 16
            numbers = true
            symbols = "!@#$%&*"
            strict = true

            [output]
            count = 5
            workers = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.generator.length, 16);
        assert_eq!(config.generator.symbols, Symbols::Custom("!@#$%&*".to_owned()));
        assert!(config.generator.uppercase);
        assert_eq!(config.output.count, 5);
        assert_eq!(config.output.workers, 2);
    }

    #[test]
    fn test_empty_pool_rejected() {
        let result = FileConfig::from_toml(
            r#"
            [generator]
            lowercase = false
            uppercase = false
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::Invalid(GenerateError::EmptyPool))
        ));
    }

    #[test]
    fn test_strict_length_rejected() {
        let result = FileConfig::from_toml(
            r#"
            [generator]
            length = 2
            numbers = true
            symbols = true
            strict = true
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::Invalid(GenerateError::StrictLength { .. }))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let result = FileConfig::from_toml("[generator\nlength = 3");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = FileConfig::from_file("/nonexistent/passgen.toml");
        assert!(matches!(result, Err(ConfigError::FileReadError(_))));
    }
}
