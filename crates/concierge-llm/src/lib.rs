//! Concierge Model Gateway Layer
//!
//! Pluggable text-completion backends behind the `ModelGateway` trait from
//! `concierge-domain`.
//!
//! # Gateways
//!
//! - `MockGateway`: Deterministic, scriptable backend for tests
//! - `OllamaGateway`: Local Ollama API integration
//! - `ChatCompletionsGateway`: OpenAI-compatible chat completions (Groq, etc.)
//!
//! Credentials are never read implicitly: a `GatewayConfig` names the
//! environment variable holding the API key and `build_gateway` injects it.
//!
//! # Examples
//!
//! ```
//! use concierge_llm::MockGateway;
//! use concierge_domain::traits::ModelGateway;
//!
//! let gateway = MockGateway::new("Hello from the model!");
//! let result = gateway.complete("test prompt").unwrap();
//! assert_eq!(result, "Hello from the model!");
//! ```

#![warn(missing_docs)]

pub mod chat;
pub mod config;
pub mod mock;
pub mod ollama;
mod retry;

use concierge_domain::traits::ModelGateway;
use thiserror::Error;

pub use chat::ChatCompletionsGateway;
pub use config::{build_gateway, GatewayConfig, ProviderKind};
pub use mock::MockGateway;
pub use ollama::OllamaGateway;

/// A gateway selected at runtime
pub type BoxedGateway = Box<dyn ModelGateway<Error = GatewayError> + Send + Sync>;

/// Errors that can occur while talking to a model backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The backend did not answer in time
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Invalid response body from the backend
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Credentials or settings rejected
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl GatewayError {
    /// Whether another attempt could succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GatewayError::Communication(_) | GatewayError::Timeout(_) | GatewayError::RateLimitExceeded
        )
    }

    pub(crate) fn from_transport(e: reqwest::Error, timeout_secs: u64) -> Self {
        if e.is_timeout() {
            GatewayError::Timeout(timeout_secs)
        } else {
            GatewayError::Communication(format!("Request failed: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(GatewayError::Communication("x".into()).is_transient());
        assert!(GatewayError::Timeout(5).is_transient());
        assert!(GatewayError::RateLimitExceeded.is_transient());
        assert!(!GatewayError::ModelNotAvailable("m".into()).is_transient());
        assert!(!GatewayError::InvalidResponse("x".into()).is_transient());
        assert!(!GatewayError::Configuration("x".into()).is_transient());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            GatewayError::Timeout(30).to_string(),
            "Request timed out after 30 seconds"
        );
        assert_eq!(
            GatewayError::ModelNotAvailable("llama3".into()).to_string(),
            "Model not available: llama3"
        );
    }

    #[test]
    fn test_boxed_gateway_is_usable() {
        let gateway: BoxedGateway = Box::new(MockGateway::new("boxed"));
        assert_eq!(gateway.complete("anything").unwrap(), "boxed");
    }
}
