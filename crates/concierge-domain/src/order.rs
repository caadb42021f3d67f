//! Order status as seen by downstream handlers

/// Days after shipping beyond which an order can no longer be returned
pub const RETURN_WINDOW_DAYS: u32 = 30;

/// Status of a single order, as reported by the order-status lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderStatus {
    /// Order identifier
    pub order_id: String,

    /// Free-form status, e.g. "Shipped"
    pub status: String,

    /// Days since the order shipped (0 if not shipped yet)
    pub days_shipped: u32,

    /// Contact email, when the lookup exposes it
    pub customer_email: Option<String>,

    /// Line items
    pub items: Vec<String>,
}

impl OrderStatus {
    /// Whether the order is still inside the return window
    pub fn is_returnable(&self) -> bool {
        self.days_shipped < RETURN_WINDOW_DAYS
    }
}
