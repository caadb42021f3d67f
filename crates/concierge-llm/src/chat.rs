//! OpenAI-compatible chat completions gateway
//!
//! Works with any backend exposing `POST {endpoint}/chat/completions` with
//! bearer authentication, Groq included. The prompt is sent as a single user
//! message with temperature 0.

use crate::retry::with_retries;
use crate::GatewayError;
use concierge_domain::traits::ModelGateway;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Groq's OpenAI-compatible endpoint
pub const GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1";

/// Default Groq model
pub const GROQ_DEFAULT_MODEL: &str = "llama3-70b-8192";

/// Default timeout for completion requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Chat completions gateway
pub struct ChatCompletionsGateway {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
    max_retries: u32,
    backoff: Duration,
}

impl fmt::Debug for ChatCompletionsGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCompletionsGateway")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsGateway {
    /// Create a gateway for an OpenAI-compatible endpoint
    ///
    /// The API key is injected by the caller; it is never read from the
    /// environment here.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, GatewayError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GatewayError::Configuration("API key is empty".to_string()));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GatewayError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            client,
            timeout_secs,
            max_retries: 1,
            backoff: Duration::from_secs(1),
        })
    }

    /// Gateway for Groq with its default model
    pub fn groq(api_key: impl Into<String>) -> Result<Self, GatewayError> {
        Self::new(GROQ_ENDPOINT, GROQ_DEFAULT_MODEL, api_key, DEFAULT_TIMEOUT_SECS)
    }

    /// Set the maximum number of attempts per completion
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the initial backoff delay between attempts
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    fn complete_once(&self, prompt: &str) -> Result<String, GatewayError> {
        let url = format!("{}/chat/completions", self.endpoint);
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.0,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| GatewayError::from_transport(e, self.timeout_secs))?;

        let status = response.status();
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                return Err(GatewayError::Configuration(format!(
                    "Credentials rejected (HTTP {})",
                    status
                )));
            }
            reqwest::StatusCode::NOT_FOUND => {
                return Err(GatewayError::ModelNotAvailable(self.model.clone()));
            }
            reqwest::StatusCode::TOO_MANY_REQUESTS => {
                return Err(GatewayError::RateLimitExceeded);
            }
            _ => {}
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GatewayError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: ChatResponse = response
            .json()
            .map_err(|e| GatewayError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
        extract_content(body)
    }
}

fn extract_content(body: ChatResponse) -> Result<String, GatewayError> {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| GatewayError::InvalidResponse("Response has no message content".to_string()))
}

impl ModelGateway for ChatCompletionsGateway {
    type Error = GatewayError;

    fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        debug!(model = %self.model, prompt_len = prompt.len(), "Chat completion");
        with_retries(self.max_retries, self.backoff, || self.complete_once(prompt))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
