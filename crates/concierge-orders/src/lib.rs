//! Concierge Orders
//!
//! Order-status lookup service: `GET /order/:order_id` over an in-memory
//! order book seeded from configuration.

#![warn(missing_docs)]

pub mod book;
pub mod config;
pub mod handlers;

use book::OrderBook;
use config::OrdersConfig;
use handlers::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Orders service error
#[derive(Debug, thiserror::Error)]
pub enum OrdersError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the order-status HTTP server
///
/// Seeds the order book from configuration, binds and serves until the
/// process exits.
pub async fn start_server(config: OrdersConfig) -> Result<(), OrdersError> {
    info!("Starting Concierge order service");
    info!("Bind address: {}", config.bind_addr());

    let book = Arc::new(OrderBook::from_records(config.orders.clone()));
    info!("Seeded {} orders: {}", book.len(), book.ids().join(", "));

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Order service listening on {}", config.bind_addr());

    serve(listener, book).await
}

/// Serve the order routes on an already-bound listener
pub async fn serve(listener: TcpListener, book: Arc<OrderBook>) -> Result<(), OrdersError> {
    let app = create_router(AppState { book });

    axum::serve(listener, app)
        .await
        .map_err(|e| OrdersError::Server(e.to_string()))
}
