//! In-memory order book backing the lookup endpoint

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// One order as stored and served
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Order identifier
    pub order_id: String,

    /// Fulfilment status, e.g. "Shipped"
    pub status: String,

    /// Customer contact
    #[serde(default)]
    pub customer_email: Option<String>,

    /// Item names
    #[serde(default)]
    pub items: Vec<String>,

    /// Days since the order shipped
    #[serde(default)]
    pub days_shipped: u32,
}

/// Thread-safe map of orders keyed by id
pub struct OrderBook {
    orders: RwLock<HashMap<String, OrderRecord>>,
}

impl OrderBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(HashMap::new()),
        }
    }

    /// Create a book from seed records; a later duplicate replaces an earlier one
    pub fn from_records(records: Vec<OrderRecord>) -> Self {
        let book = Self::new();
        for record in records {
            book.insert(record);
        }
        book
    }

    /// Insert or replace an order
    pub fn insert(&self, record: OrderRecord) {
        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        orders.insert(record.order_id.trim().to_string(), record);
    }

    /// Look up an order by exact id
    pub fn get(&self, order_id: &str) -> Option<OrderRecord> {
        let orders = self.orders.read().unwrap_or_else(PoisonError::into_inner);
        orders.get(order_id).cloned()
    }

    /// Order ids, sorted
    pub fn ids(&self) -> Vec<String> {
        let orders = self.orders.read().unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<String> = orders.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of orders
    pub fn len(&self) -> usize {
        self.orders.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the book is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
