//! Configuration for the Router

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the Router
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Run classification and identifier resolution on two threads
    pub parallel: bool,

    /// Ask the model for an identifier when no pattern matches
    pub fallback_enabled: bool,

    /// Use the query's known identifier when nothing else resolves one
    pub carry_context_identifier: bool,
}

impl Default for RouterConfig {
    /// Sequential routing with fallback and context carry-over
    fn default() -> Self {
        Self {
            parallel: false,
            fallback_enabled: true,
            carry_context_identifier: true,
        }
    }
}

impl RouterConfig {
    /// Concurrent preset: both gateway calls in flight at once
    pub fn concurrent() -> Self {
        Self {
            parallel: true,
            ..Self::default()
        }
    }

    /// Patterns-only preset: at most one gateway call per turn, no carry-over
    pub fn patterns_only() -> Self {
        Self {
            parallel: false,
            fallback_enabled: false,
            carry_context_identifier: false,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RouterConfig::default();
        assert!(!config.parallel);
        assert!(config.fallback_enabled);
        assert!(config.carry_context_identifier);
    }

    #[test]
    fn test_presets() {
        assert!(RouterConfig::concurrent().parallel);
        assert!(RouterConfig::concurrent().fallback_enabled);

        let patterns_only = RouterConfig::patterns_only();
        assert!(!patterns_only.fallback_enabled);
        assert!(!patterns_only.carry_context_identifier);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = RouterConfig::from_toml("parallel = true").unwrap();
        assert!(config.parallel);
        assert!(config.fallback_enabled);
        assert!(config.carry_context_identifier);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(RouterConfig::from_toml("").unwrap(), RouterConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = RouterConfig::patterns_only();
        let toml_str = config.to_toml().unwrap();
        assert_eq!(RouterConfig::from_toml(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml() {
        let result = RouterConfig::from_toml("parallel = \"sometimes\"");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = RouterConfig::from_file("/nonexistent/concierge/router.toml");
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }
}
