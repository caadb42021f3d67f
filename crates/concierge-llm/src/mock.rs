//! Mock gateway for deterministic testing

use crate::GatewayError;
use concierge_domain::traits::ModelGateway;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq)]
enum MockReply {
    Text(String),
    Fail(String),
}

impl MockReply {
    fn produce(&self) -> Result<String, GatewayError> {
        match self {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Fail(message) => Err(GatewayError::Communication(message.clone())),
        }
    }
}

/// Mock gateway for deterministic testing
///
/// Returns pre-configured replies without making any network calls. Replies
/// are chosen by the first rule whose needle occurs in the prompt, falling
/// back to the default reply. Clones share call counts and recorded prompts.
///
/// # Examples
///
/// ```
/// use concierge_llm::MockGateway;
/// use concierge_domain::traits::ModelGateway;
///
/// // Simple fixed reply
/// let gateway = MockGateway::new("Fixed reply");
/// assert_eq!(gateway.complete("any prompt").unwrap(), "Fixed reply");
///
/// // Replies chosen by prompt content
/// let gateway = MockGateway::new("null")
///     .with_response("Strictly follow these categories", r#"{"Category":"GeneralAgent"}"#)
///     .with_error("Order ID (only the ID or null)");
/// assert!(gateway.complete("Extract... Order ID (only the ID or null):").is_err());
/// assert_eq!(gateway.call_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockGateway {
    default_reply: MockReply,
    rules: Arc<Mutex<Vec<(String, MockReply)>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockGateway {
    /// Create a MockGateway with a fixed reply for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(MockReply::Text(response.into()))
    }

    /// Create a MockGateway whose every call fails with a transport error
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_default(MockReply::Fail(message.into()))
    }

    fn with_default(default_reply: MockReply) -> Self {
        Self {
            default_reply,
            rules: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reply with `response` whenever the prompt contains `needle`
    pub fn add_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        lock(&self.rules).push((needle.into(), MockReply::Text(response.into())));
    }

    /// Fail whenever the prompt contains `needle`
    pub fn add_error(&mut self, needle: impl Into<String>) {
        lock(&self.rules).push((needle.into(), MockReply::Fail("Mock error".to_string())));
    }

    /// Builder form of [`MockGateway::add_response`]
    pub fn with_response(mut self, needle: impl Into<String>, response: impl Into<String>) -> Self {
        self.add_response(needle, response);
        self
    }

    /// Builder form of [`MockGateway::add_error`]
    pub fn with_error(mut self, needle: impl Into<String>) -> Self {
        self.add_error(needle);
        self
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }

    /// Number of calls whose prompt contained `needle`
    pub fn calls_containing(&self, needle: &str) -> usize {
        lock(&self.prompts)
            .iter()
            .filter(|prompt| prompt.contains(needle))
            .count()
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    /// Forget recorded prompts and reset the call count
    pub fn reset_call_count(&self) {
        lock(&self.prompts).clear();
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl ModelGateway for MockGateway {
    type Error = GatewayError;

    fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        lock(&self.prompts).push(prompt.to_string());

        let rules = lock(&self.rules);
        let reply = rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply)
            .unwrap_or(&self.default_reply);
        reply.produce()
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_gateway_default() {
        let gateway = MockGateway::new("Test response");
        let result = gateway.complete("any prompt");
        assert_eq!(result.unwrap(), "Test response");
    }

    #[test]
    fn test_mock_gateway_rules_by_substring() {
        let mut gateway = MockGateway::default();
        gateway.add_response("hello", "world");
        gateway.add_response("foo", "bar");

        assert_eq!(gateway.complete("say hello please").unwrap(), "world");
        assert_eq!(gateway.complete("foo").unwrap(), "bar");
        assert_eq!(gateway.complete("unknown").unwrap(), "Default mock response");
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let gateway = MockGateway::new("none")
            .with_response("a", "first")
            .with_response("ab", "second");
        assert_eq!(gateway.complete("ab").unwrap(), "first");
    }

    #[test]
    fn test_mock_gateway_call_count() {
        let gateway = MockGateway::new("test");

        assert_eq!(gateway.call_count(), 0);

        gateway.complete("prompt1").unwrap();
        assert_eq!(gateway.call_count(), 1);

        gateway.complete("prompt2").unwrap();
        assert_eq!(gateway.call_count(), 2);
        assert_eq!(gateway.calls_containing("prompt2"), 1);

        gateway.reset_call_count();
        assert_eq!(gateway.call_count(), 0);
    }

    #[test]
    fn test_mock_gateway_error() {
        let mut gateway = MockGateway::default();
        gateway.add_error("bad prompt");

        let result = gateway.complete("a bad prompt");
        assert!(matches!(result.unwrap_err(), GatewayError::Communication(_)));
    }

    #[test]
    fn test_failing_gateway_fails_every_call() {
        let gateway = MockGateway::failing("backend down");
        assert_eq!(
            gateway.complete("x").unwrap_err(),
            GatewayError::Communication("backend down".to_string())
        );
        assert_eq!(gateway.call_count(), 1);
    }

    #[test]
    fn test_mock_gateway_clone_shares_state() {
        let gateway1 = MockGateway::new("test");
        let gateway2 = gateway1.clone();

        gateway1.complete("recorded").unwrap();

        assert_eq!(gateway1.call_count(), 1);
        assert_eq!(gateway2.call_count(), 1);
        assert_eq!(gateway2.prompts(), vec!["recorded".to_string()]);
    }
}
