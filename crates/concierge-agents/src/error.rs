//! Error types for the handlers.

use concierge_domain::TemplateError;
use thiserror::Error;

/// Handler and order-lookup errors
#[derive(Debug, Error)]
pub enum AgentError {
    /// Connection error (network, DNS, refused)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Non-success HTTP status from the order service
    #[error("HTTP error: {0}")]
    Http(String),

    /// Order service answered with an unreadable body
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Bad client settings, e.g. an unusable base URL
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Model gateway failure
    #[error("{0}")]
    Gateway(String),

    /// Instruction template could not be rendered
    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl From<reqwest::Error> for AgentError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            AgentError::Connection(e.to_string())
        } else if e.is_timeout() {
            AgentError::Connection(format!("Request timeout: {}", e))
        } else if e.is_status() {
            match e.status() {
                Some(status) if status.is_server_error() => {
                    AgentError::Http(format!("Server error (HTTP {})", status))
                }
                Some(status) => AgentError::Http(format!("HTTP {}: {}", status, e)),
                None => AgentError::Http(e.to_string()),
            }
        } else if e.is_decode() {
            AgentError::InvalidResponse(e.to_string())
        } else {
            AgentError::Connection(e.to_string())
        }
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(e: serde_json::Error) -> Self {
        AgentError::InvalidResponse(format!("JSON parsing error: {}", e))
    }
}
