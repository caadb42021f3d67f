//! Gateway configuration and runtime provider selection

use crate::chat::{ChatCompletionsGateway, GROQ_DEFAULT_MODEL, GROQ_ENDPOINT};
use crate::ollama::{OllamaGateway, DEFAULT_ENDPOINT as OLLAMA_ENDPOINT};
use crate::{BoxedGateway, GatewayError, MockGateway};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Backend family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Scripted in-process replies
    Mock,
    /// Local Ollama server
    #[default]
    Ollama,
    /// OpenAI-compatible chat completions (Groq, OpenAI, ...)
    OpenAi,
}

/// Configuration for the model gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Backend family
    #[serde(default)]
    pub provider: ProviderKind,

    /// Base URL; the provider's default is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key (openai only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per completion, including the first
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed reply for the mock provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_response: Option<String>,
}

fn default_model() -> String {
    "llama3".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    1
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Ollama,
            endpoint: None,
            model: default_model(),
            api_key_env: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            mock_response: None,
        }
    }
}

impl GatewayConfig {
    /// Groq preset reading its key from `GROQ_API_KEY`
    pub fn groq() -> Self {
        Self {
            provider: ProviderKind::OpenAi,
            endpoint: Some(GROQ_ENDPOINT.to_string()),
            model: GROQ_DEFAULT_MODEL.to_string(),
            api_key_env: Some("GROQ_API_KEY".to_string()),
            ..Self::default()
        }
    }

    /// Mock preset with a fixed reply
    pub fn mock(response: impl Into<String>) -> Self {
        Self {
            provider: ProviderKind::Mock,
            model: "mock".to_string(),
            mock_response: Some(response.into()),
            ..Self::default()
        }
    }

    /// Endpoint to use, falling back to the provider default
    pub fn resolved_endpoint(&self) -> &str {
        match (&self.endpoint, self.provider) {
            (Some(endpoint), _) => endpoint,
            (None, ProviderKind::OpenAi) => GROQ_ENDPOINT,
            (None, _) => OLLAMA_ENDPOINT,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_retries == 0 {
            return Err("max_retries must be at least 1".to_string());
        }
        if self.provider == ProviderKind::OpenAi && self.api_key_env.is_none() {
            return Err("api_key_env is required for the openai provider".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

/// Construct the gateway described by `config`
///
/// For the openai provider the API key is read from the environment variable
/// the configuration names, so credentials are always explicit.
pub fn build_gateway(config: &GatewayConfig) -> Result<BoxedGateway, GatewayError> {
    config.validate().map_err(GatewayError::Configuration)?;

    let endpoint = config.resolved_endpoint();
    info!(
        "Using {:?} gateway, model '{}' at {}",
        config.provider, config.model, endpoint
    );

    let gateway: BoxedGateway = match config.provider {
        ProviderKind::Mock => Box::new(MockGateway::new(
            config.mock_response.clone().unwrap_or_else(|| "null".to_string()),
        )),
        ProviderKind::Ollama => Box::new(
            OllamaGateway::with_timeout(endpoint, &config.model, config.timeout_secs)?
                .with_max_retries(config.max_retries),
        ),
        ProviderKind::OpenAi => {
            let api_key = read_api_key(config.api_key_env.as_deref())?;
            Box::new(
                ChatCompletionsGateway::new(endpoint, &config.model, api_key, config.timeout_secs)?
                    .with_max_retries(config.max_retries),
            )
        }
    };

    Ok(gateway)
}

fn read_api_key(var: Option<&str>) -> Result<String, GatewayError> {
    let var = var.ok_or_else(|| GatewayError::Configuration("api_key_env is not set".to_string()))?;
    std::env::var(var).map_err(|_| {
        GatewayError::Configuration(format!("environment variable {} is not set", var))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_defaults_to_ollama() {
        assert_eq!(ProviderKind::default(), ProviderKind::Ollama);
        let config = GatewayConfig::from_toml("model = \"mistral\"").unwrap();
        assert_eq!(config.provider, ProviderKind::Ollama);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(GatewayConfig::default().validate().is_ok());
        assert!(GatewayConfig::groq().validate().is_ok());
        assert!(GatewayConfig::mock("x").validate().is_ok());
    }

    #[test]
    fn test_openai_requires_key_env() {
        let config = GatewayConfig {
            provider: ProviderKind::OpenAi,
            ..GatewayConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_timeout() {
        let config = GatewayConfig {
            timeout_secs: 0,
            ..GatewayConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolved_endpoint() {
        assert_eq!(GatewayConfig::default().resolved_endpoint(), OLLAMA_ENDPOINT);
        assert_eq!(GatewayConfig::groq().resolved_endpoint(), GROQ_ENDPOINT);
        let custom = GatewayConfig {
            endpoint: Some("http://gpu-box:11434".to_string()),
            ..GatewayConfig::default()
        };
        assert_eq!(custom.resolved_endpoint(), "http://gpu-box:11434");
    }

    #[test]
    fn test_parse_toml() {
        let config = GatewayConfig::from_toml(
            r#"
            provider = "openai"
            model = "llama3-70b-8192"
            api_key_env = "MY_KEY"
            timeout_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.provider, ProviderKind::OpenAi);
        assert_eq!(config.api_key_env.as_deref(), Some("MY_KEY"));
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.max_retries, 1);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = GatewayConfig::groq();
        let parsed = GatewayConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_build_mock_gateway() {
        let gateway = build_gateway(&GatewayConfig::mock("scripted")).unwrap();
        assert_eq!(gateway.complete("anything").unwrap(), "scripted");
        assert_eq!(gateway.model_name(), "mock");
    }

    #[test]
    fn test_build_openai_without_env_var_fails() {
        let config = GatewayConfig {
            api_key_env: Some("CONCIERGE_TEST_KEY_THAT_IS_NEVER_SET".to_string()),
            ..GatewayConfig::groq()
        };
        match build_gateway(&config) {
            Err(GatewayError::Configuration(msg)) => {
                assert!(msg.contains("CONCIERGE_TEST_KEY_THAT_IS_NEVER_SET"))
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("expected a configuration error"),
        }
    }

    #[test]
    fn test_build_ollama_gateway() {
        let gateway = build_gateway(&GatewayConfig::default()).unwrap();
        assert_eq!(gateway.model_name(), "llama3");
    }
}
