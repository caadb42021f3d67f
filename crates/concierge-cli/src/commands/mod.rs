//! Command implementations.

mod ask;
mod config;
mod route;

pub use ask::execute_ask;
pub use config::execute_config;
pub use route::{execute_extract, execute_route};

use crate::config::Config;
use crate::error::Result;
use concierge_agents::{Conversation, Dispatcher, HttpOrderLookup};
use concierge_domain::traits::ModelGateway;
use concierge_llm::{build_gateway, BoxedGateway};
use concierge_router::Router;
use std::sync::Arc;
use tracing::debug;

/// Gateway shared by routing and the handlers.
pub type SharedGateway = Arc<BoxedGateway>;

/// Build the configured model gateway.
pub fn shared_gateway(config: &Config) -> Result<SharedGateway> {
    let gateway = build_gateway(&config.gateway)?;
    debug!("Using model '{}'", gateway.model_name());
    Ok(Arc::new(gateway))
}

/// Build a router over the configured gateway.
pub fn build_router(config: &Config) -> Result<Router<SharedGateway>> {
    Ok(Router::new(shared_gateway(config)?, config.router.clone()))
}

/// Build a conversation wired to the configured gateway and order service.
pub fn build_conversation(config: &Config) -> Result<Conversation<SharedGateway, HttpOrderLookup>> {
    let gateway = shared_gateway(config)?;
    let lookup = HttpOrderLookup::with_timeout(&config.orders.url, config.orders.timeout_secs)?;
    let dispatcher = Dispatcher::new(Arc::clone(&gateway), lookup.clone())
        .with_policies(config.policy_book())
        .with_top_k(config.returns.top_k);

    Ok(Conversation::new(gateway, lookup, config.router.clone()).with_dispatcher(dispatcher))
}
