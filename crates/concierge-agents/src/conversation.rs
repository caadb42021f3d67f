//! Multi-turn conversation: routing, dispatch and identifier carry-over

use crate::dispatcher::{Dispatcher, HandlerReply};
use concierge_domain::traits::{ModelGateway, OrderLookup};
use concierge_domain::Query;
use concierge_router::{RouteOutcome, Router, RouterConfig};
use std::fmt::Display;
use tracing::debug;

/// One answered turn
#[derive(Debug, Clone)]
pub struct Turn {
    /// Routing decision and identifier resolution
    pub outcome: RouteOutcome,

    /// Handler reply
    pub reply: HandlerReply,
}

/// A conversation with one customer
///
/// The last resolved identifier is offered to the router as context on the
/// next turn, so "and when will it arrive?" still refers to the same order.
pub struct Conversation<G, L> {
    router: Router<G>,
    dispatcher: Dispatcher<G, L>,
    last_identifier: Option<String>,
}

impl<G, L> Conversation<G, L>
where
    G: ModelGateway + Clone + Send + Sync,
    G::Error: Display,
    L: OrderLookup,
    L::Error: Display,
{
    /// Start a conversation; the gateway is shared by routing and handlers
    pub fn new(gateway: G, lookup: L, config: RouterConfig) -> Self {
        Self {
            router: Router::new(gateway.clone(), config),
            dispatcher: Dispatcher::new(gateway, lookup),
            last_identifier: None,
        }
    }

    /// Replace the dispatcher, e.g. to use custom policies
    pub fn with_dispatcher(mut self, dispatcher: Dispatcher<G, L>) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// The router used for each turn
    pub fn router(&self) -> &Router<G> {
        &self.router
    }

    /// Identifier carried into the next turn
    pub fn last_identifier(&self) -> Option<&str> {
        self.last_identifier.as_deref()
    }

    /// Set the identifier carried into the next turn
    pub fn set_identifier(&mut self, identifier: impl Into<String>) {
        let identifier = identifier.into();
        let identifier = identifier.trim();
        self.last_identifier = (!identifier.is_empty()).then(|| identifier.to_string());
    }

    /// Forget the carried identifier
    pub fn reset(&mut self) {
        self.last_identifier = None;
    }

    /// Route and answer one user message
    pub fn turn(&mut self, text: &str) -> Turn {
        let mut query = Query::new(text);
        if let Some(known) = &self.last_identifier {
            query = query.with_known_identifier(known.clone());
        }

        let mut outcome = self.router.route(&query);
        let reply = self.dispatcher.dispatch(&query, &mut outcome);

        // Identifiers seen in out-of-scope turns are not carried
        let carried = outcome
            .identifier_value()
            .filter(|_| outcome.intent().uses_identifier());
        if let Some(identifier) = carried {
            if self.last_identifier.as_deref() != Some(identifier) {
                debug!("Carrying identifier {} into next turn", identifier);
            }
            self.last_identifier = Some(identifier.to_string());
        }

        Turn { outcome, reply }
    }
}
