//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model gateway could not be constructed
    #[error("Gateway error: {0}")]
    Gateway(#[from] concierge_llm::GatewayError),

    /// Order lookup client error
    #[error("Order service error: {0}")]
    Agent(#[from] concierge_agents::AgentError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_conversion() {
        let err: CliError =
            concierge_llm::GatewayError::Configuration("environment variable GROQ_API_KEY is not set".into())
                .into();
        assert_eq!(
            err.to_string(),
            "Gateway error: Configuration error: environment variable GROQ_API_KEY is not set"
        );
    }
}
