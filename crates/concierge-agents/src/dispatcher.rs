//! Hand a routed query to the handler for its intent

use crate::handlers::{GeneralHandler, OrdersHandler, ReturnsHandler};
use crate::policy::PolicyBook;
use concierge_domain::traits::{ModelGateway, OrderLookup};
use concierge_domain::{Intent, Query};
use concierge_router::RouteOutcome;
use std::fmt::Display;
use std::sync::Arc;
use tracing::info;

/// What a handler answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerReply {
    /// Intent whose handler produced the reply
    pub intent: Intent,

    /// Customer-facing text
    pub response: String,

    /// Identifier the handler acted on, if any
    pub identifier: Option<String>,
}

/// Maps a routing outcome to the matching handler
pub struct Dispatcher<G, L> {
    orders: OrdersHandler<Arc<L>>,
    returns: ReturnsHandler<G>,
    general: GeneralHandler,
    lookup: Arc<L>,
}

impl<G, L> Dispatcher<G, L>
where
    G: ModelGateway,
    G::Error: Display,
    L: OrderLookup,
    L::Error: Display,
{
    /// Create a dispatcher; `gateway` serves the returns handler
    pub fn new(gateway: G, lookup: L) -> Self {
        let lookup = Arc::new(lookup);
        Self {
            orders: OrdersHandler::new(Arc::clone(&lookup)),
            returns: ReturnsHandler::new(gateway),
            general: GeneralHandler,
            lookup,
        }
    }

    /// Replace the return-policy passages
    pub fn with_policies(self, policies: PolicyBook) -> Self {
        Self {
            returns: self.returns.with_policies(policies),
            ..self
        }
    }

    /// Number of policy passages retrieved per returns question
    pub fn with_top_k(self, top_k: usize) -> Self {
        Self {
            returns: self.returns.with_top_k(top_k),
            ..self
        }
    }

    /// Run the handler for `outcome`'s intent and mark the outcome dispatched
    pub fn dispatch(&self, query: &Query, outcome: &mut RouteOutcome) -> HandlerReply {
        let identifier = outcome.identifier_value().map(str::to_string);
        let intent = outcome.intent();

        let (response, identifier) = match intent {
            Intent::Orders => (self.orders.respond(identifier.as_deref()), identifier),
            Intent::Returns => (
                self.returns
                    .respond_with_order(query.text(), identifier.as_deref(), &*self.lookup),
                identifier,
            ),
            Intent::General => (self.general.respond().to_string(), None),
        };

        outcome.mark_dispatched();
        info!("Query {} dispatched to {}", query.id(), intent);

        HandlerReply {
            intent,
            response,
            identifier,
        }
    }
}
