//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use concierge_agents::{PolicyBook, DEFAULT_ORDERS_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_TOP_K, STANDARD_POLICIES};
use concierge_llm::GatewayConfig;
use concierge_router::RouterConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Model backend
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Routing behaviour
    #[serde(default)]
    pub router: RouterConfig,

    /// Order-status service
    #[serde(default)]
    pub orders: OrdersSettings,

    /// Return-policy answers
    #[serde(default)]
    pub returns: ReturnsSettings,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Where the order-status service lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersSettings {
    /// Base URL of the service
    #[serde(default = "default_orders_url")]
    pub url: String,

    /// Request timeout (seconds)
    #[serde(default = "default_orders_timeout")]
    pub timeout_secs: u64,
}

/// Return-policy retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnsSettings {
    /// Passages handed to the model per question
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Policy passages
    #[serde(default = "default_policies")]
    pub policies: Vec<String>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".concierge").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if it is missing.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.gateway
            .validate()
            .map_err(|e| CliError::Config(format!("[gateway] {}", e)))?;
        if self.orders.url.trim().is_empty() {
            return Err(CliError::Config("[orders] url must not be empty".into()));
        }
        if self.orders.timeout_secs == 0 {
            return Err(CliError::Config("[orders] timeout_secs must be greater than 0".into()));
        }
        if self.returns.top_k == 0 {
            return Err(CliError::Config("[returns] top_k must be at least 1".into()));
        }
        Ok(())
    }

    /// Policy passages as a searchable book.
    pub fn policy_book(&self) -> PolicyBook {
        PolicyBook::new(self.returns.policies.clone())
    }
}

impl Default for OrdersSettings {
    fn default() -> Self {
        Self {
            url: default_orders_url(),
            timeout_secs: default_orders_timeout(),
        }
    }
}

impl Default for ReturnsSettings {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            policies: default_policies(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

fn default_orders_url() -> String {
    DEFAULT_ORDERS_URL.to_string()
}

fn default_orders_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_policies() -> Vec<String> {
    STANDARD_POLICIES.iter().map(|p| p.to_string()).collect()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_llm::ProviderKind;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.gateway.provider, ProviderKind::Ollama);
        assert_eq!(config.orders.url, DEFAULT_ORDERS_URL);
        assert_eq!(config.returns.top_k, 2);
        assert_eq!(config.returns.policies.len(), STANDARD_POLICIES.len());
        assert!(config.settings.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[router]\nparallel = true\n\n[orders]\nurl = \"http://orders.internal:9000\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.router.parallel);
        assert!(config.router.fallback_enabled);
        assert_eq!(config.orders.url, "http://orders.internal:9000");
        assert_eq!(config.orders.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.gateway.model, "llama3");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.gateway = GatewayConfig::groq();
        config.settings.format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.gateway, GatewayConfig::groq());
        assert_eq!(loaded.settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[returns]\ntop_k = 0\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(CliError::Config(_))));

        fs::write(&path, "[gateway]\nprovider = \"openai\"\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("[gateway]"));
    }

    #[test]
    fn test_malformed_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[router\nparallel = true").unwrap();
        assert!(matches!(Config::load_from(&path), Err(CliError::Toml(_))));
    }

    #[test]
    fn test_router_section_rejects_bad_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[router]\nparallel = \"sometimes\"\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(CliError::Toml(_))));

        fs::write(&path, "[router]\nfallback_enabled = false\ncarry_context_identifier = true\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert!(!config.router.fallback_enabled);
        assert!(config.router.carry_context_identifier);
    }

    #[test]
    fn test_policy_book() {
        let mut config = Config::default();
        config.returns.policies = vec!["Gift cards cannot be returned.".to_string()];
        assert_eq!(config.policy_book().len(), 1);
    }
}
