//! Trait definitions for external interactions
//!
//! These traits define the boundaries between routing logic and
//! infrastructure. Implementations live in other crates.

use crate::OrderStatus;
use std::sync::Arc;

/// Trait for text-completion backends
///
/// Implemented by the infrastructure layer (concierge-llm). A call is a single
/// attempt from the caller's point of view: any retry or timeout policy
/// belongs to the implementation.
pub trait ModelGateway {
    /// Error type for backend failures
    type Error;

    /// Complete a fully rendered prompt
    fn complete(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Name of the model behind this gateway, for logs
    fn model_name(&self) -> &str {
        "model"
    }
}

impl<G: ModelGateway + ?Sized> ModelGateway for Box<G> {
    type Error = G::Error;

    fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        (**self).complete(prompt)
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

impl<G: ModelGateway + ?Sized> ModelGateway for Arc<G> {
    type Error = G::Error;

    fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        (**self).complete(prompt)
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Trait for looking up order status
///
/// Implemented by the application layer (concierge-agents). An unknown order
/// is `Ok(None)`, not an error.
pub trait OrderLookup {
    /// Error type for lookup failures
    type Error;

    /// Fetch the status of an order
    fn lookup(&self, order_id: &str) -> Result<Option<OrderStatus>, Self::Error>;
}

impl<L: OrderLookup + ?Sized> OrderLookup for Box<L> {
    type Error = L::Error;

    fn lookup(&self, order_id: &str) -> Result<Option<OrderStatus>, Self::Error> {
        (**self).lookup(order_id)
    }
}

impl<L: OrderLookup + ?Sized> OrderLookup for Arc<L> {
    type Error = L::Error;

    fn lookup(&self, order_id: &str) -> Result<Option<OrderStatus>, Self::Error> {
        (**self).lookup(order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl ModelGateway for Echo {
        type Error = String;

        fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
            Ok(prompt.to_uppercase())
        }
    }

    #[test]
    fn test_boxed_gateway_delegates() {
        let gateway: Box<dyn ModelGateway<Error = String>> = Box::new(Echo);
        assert_eq!(gateway.complete("abc").unwrap(), "ABC");
        assert_eq!(gateway.model_name(), "model");
    }

    #[test]
    fn test_arc_gateway_delegates() {
        let gateway = Arc::new(Echo);
        assert_eq!(gateway.complete("x").unwrap(), "X");
    }
}
