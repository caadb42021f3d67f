//! Configuration file parsing for the order-status service.
//!
//! Loads the bind address and the order records the service is seeded with.

use crate::book::OrderRecord;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Orders service configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A seed record is unusable
    #[error("Invalid order record: {0}")]
    InvalidRecord(String),
}

/// Orders service configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 8000)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Seed records
    #[serde(default)]
    pub orders: Vec<OrderRecord>,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8000
}

impl OrdersConfig {
    /// Parse and validate configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: OrdersConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Reject empty or duplicate order ids
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for record in &self.orders {
            let id = record.order_id.trim();
            if id.is_empty() {
                return Err(ConfigError::InvalidRecord("order_id must not be empty".to_string()));
            }
            if !seen.insert(id) {
                return Err(ConfigError::InvalidRecord(format!("duplicate order_id '{}'", id)));
            }
        }
        Ok(())
    }

    /// Create a default configuration for testing, with three sample orders
    pub fn default_test_config() -> Self {
        OrdersConfig {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            orders: vec![
                OrderRecord {
                    order_id: "123456".to_string(),
                    status: "Shipped".to_string(),
                    customer_email: Some("user@example.com".to_string()),
                    items: vec!["Item1".to_string(), "Item2".to_string()],
                    days_shipped: 3,
                },
                OrderRecord {
                    order_id: "123457".to_string(),
                    status: "Processing".to_string(),
                    customer_email: Some("user2@example.com".to_string()),
                    items: vec!["Item3".to_string()],
                    days_shipped: 0,
                },
                OrderRecord {
                    order_id: "123458".to_string(),
                    status: "Returned".to_string(),
                    customer_email: Some("return@example.com".to_string()),
                    items: vec!["Item4".to_string()],
                    days_shipped: 45,
                },
            ],
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OrdersConfig::default_test_config();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.bind_port, 8000);
        assert_eq!(config.orders.len(), 3);
        assert_eq!(config.orders[2].days_shipped, 45);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bind_addr() {
        let config = OrdersConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000

            [[orders]]
            order_id = "555001"
            status = "Shipped"
            customer_email = "a@example.com"
            items = ["Lamp"]
            days_shipped = 12

            [[orders]]
            order_id = "555002"
            status = "Processing"
        "#;

        let config = OrdersConfig::from_toml(toml).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.orders.len(), 2);
        assert_eq!(config.orders[0].items, vec!["Lamp"]);
        assert_eq!(config.orders[1].days_shipped, 0);
        assert!(config.orders[1].customer_email.is_none());
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let config = OrdersConfig::from_toml("").unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
        assert!(config.orders.is_empty());
    }

    #[test]
    fn test_duplicate_order_id() {
        let toml = r#"
            [[orders]]
            order_id = "1"
            status = "Shipped"

            [[orders]]
            order_id = "1"
            status = "Returned"
        "#;
        let result = OrdersConfig::from_toml(toml);
        assert!(matches!(result, Err(ConfigError::InvalidRecord(_))));
    }

    #[test]
    fn test_empty_order_id() {
        let toml = r#"
            [[orders]]
            order_id = "  "
            status = "Shipped"
        "#;
        assert!(OrdersConfig::from_toml(toml).is_err());
    }
}
