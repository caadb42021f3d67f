//! Order-status lookup over HTTP.

use crate::error::AgentError;
use concierge_domain::traits::OrderLookup;
use concierge_domain::OrderStatus;
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default order service address
pub const DEFAULT_ORDERS_URL: &str = "http://localhost:8000";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Order record as served by `GET /order/{id}`
#[derive(Debug, Clone, Deserialize)]
struct OrderPayload {
    order_id: String,
    status: String,
    #[serde(default)]
    customer_email: Option<String>,
    #[serde(default)]
    items: Vec<String>,
    #[serde(default)]
    days_shipped: u32,
}

impl From<OrderPayload> for OrderStatus {
    fn from(payload: OrderPayload) -> Self {
        OrderStatus {
            order_id: payload.order_id,
            status: payload.status,
            days_shipped: payload.days_shipped,
            customer_email: payload.customer_email,
            items: payload.items,
        }
    }
}

/// Blocking client for the order-status service
#[derive(Debug, Clone)]
pub struct HttpOrderLookup {
    base_url: Url,
    client: Client,
}

impl HttpOrderLookup {
    /// Create a lookup client with the default timeout
    pub fn new(base_url: &str) -> Result<Self, AgentError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a lookup client with a custom timeout
    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Result<Self, AgentError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AgentError::Configuration(format!("Invalid orders URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AgentError::Configuration(format!(
                "Invalid orders URL '{}': not a base URL",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { base_url, client })
    }

    /// Base URL of the order service
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// URL of one order; the id is a single escaped path segment
    fn order_url(&self, order_id: &str) -> Result<Url, AgentError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AgentError::Configuration("orders URL cannot take a path".to_string()))?
            .pop_if_empty()
            .push("order")
            .push(order_id);
        Ok(url)
    }
}

impl OrderLookup for HttpOrderLookup {
    type Error = AgentError;

    fn lookup(&self, order_id: &str) -> Result<Option<OrderStatus>, Self::Error> {
        let url = self.order_url(order_id)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send()?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = response.error_for_status()?;
        let body = response.text()?;
        let payload: OrderPayload = serde_json::from_str(&body)?;

        Ok(Some(payload.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_url() {
        let lookup = HttpOrderLookup::new("http://localhost:8000").unwrap();
        assert_eq!(
            lookup.order_url("123456").unwrap().as_str(),
            "http://localhost:8000/order/123456"
        );
    }

    #[test]
    fn test_order_url_with_base_path_and_trailing_slash() {
        let lookup = HttpOrderLookup::new("http://example.com/api/").unwrap();
        assert_eq!(
            lookup.order_url("42").unwrap().as_str(),
            "http://example.com/api/order/42"
        );
    }

    #[test]
    fn test_order_id_is_escaped() {
        let lookup = HttpOrderLookup::new(DEFAULT_ORDERS_URL).unwrap();
        let url = lookup.order_url("a b/c").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/order/a%20b%2Fc");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpOrderLookup::new("not a url"),
            Err(AgentError::Configuration(_))
        ));
        assert!(matches!(
            HttpOrderLookup::new("mailto:orders@example.com"),
            Err(AgentError::Configuration(_))
        ));
    }

    #[test]
    fn test_payload_conversion() {
        let payload: OrderPayload = serde_json::from_str(
            r#"{"order_id":"123458","status":"Returned","customer_email":"r@example.com","items":["Item4"],"days_shipped":45}"#,
        )
        .unwrap();
        let status: OrderStatus = payload.into();
        assert_eq!(status.order_id, "123458");
        assert_eq!(status.days_shipped, 45);
        assert!(!status.is_returnable());
        assert_eq!(status.items, vec!["Item4"]);
    }

    #[test]
    fn test_connection_refused_is_error() {
        // Port 9 (discard) is not expected to run an HTTP server
        let lookup = HttpOrderLookup::with_timeout("http://127.0.0.1:9", 2).unwrap();
        assert!(lookup.lookup("123456").is_err());
    }
}
