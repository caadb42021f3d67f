//! HTTP request handlers for the order-status service.
//!
//! Implements order lookup and health check endpoints using axum.

use crate::book::{OrderBook, OrderRecord};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router as AxumRouter,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Orders served by the lookup endpoint
    pub book: Arc<OrderBook>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Number of orders in the book
    pub order_count: usize,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// No order with the requested id
    OrderNotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::OrderNotFound(order_id) => {
                debug!("Order '{}' not found", order_id);
                (StatusCode::NOT_FOUND, "Order not found".to_string())
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

/// GET /order/:order_id - Look up one order
async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderRecord>, AppError> {
    debug!("Order lookup for '{}'", order_id);
    state
        .book
        .get(&order_id)
        .map(Json)
        .ok_or(AppError::OrderNotFound(order_id))
}

/// GET /health - Liveness plus book size
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        order_count: state.book.len(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/order/:order_id", get(get_order))
        .route("/health", get(health_check))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrdersConfig;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt; // for oneshot

    fn create_test_state() -> AppState {
        let config = OrdersConfig::default_test_config();
        AppState {
            book: Arc::new(OrderBook::from_records(config.orders)),
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(create_test_state());

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_known_order() {
        let app = create_router(create_test_state());

        let request = Request::builder()
            .uri("/order/123456")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_unknown_order() {
        let app = create_router(create_test_state());

        let request = Request::builder()
            .uri("/order/999999")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
