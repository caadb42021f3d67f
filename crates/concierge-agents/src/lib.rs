//! Concierge Agents
//!
//! Downstream handlers for routed queries and the order-status client they
//! use.
//!
//! - [`OrdersHandler`]: order status via an [`OrderLookup`](concierge_domain::traits::OrderLookup)
//! - [`ReturnsHandler`]: policy answers from retrieved passages, plus eligibility
//! - [`GeneralHandler`]: fixed out-of-scope reply
//! - [`Dispatcher`]: picks the handler for a [`RouteOutcome`](concierge_router::RouteOutcome)
//! - [`Conversation`]: routing + dispatch across turns
//!
//! # Example
//!
//! ```no_run
//! use concierge_agents::{Conversation, HttpOrderLookup, DEFAULT_ORDERS_URL};
//! use concierge_llm::OllamaGateway;
//! use concierge_router::RouterConfig;
//! use std::sync::Arc;
//!
//! let gateway = Arc::new(OllamaGateway::default_endpoint("llama3").expect("gateway"));
//! let lookup = HttpOrderLookup::new(DEFAULT_ORDERS_URL).expect("lookup");
//! let mut conversation = Conversation::new(gateway, lookup, RouterConfig::default());
//!
//! let turn = conversation.turn("Where is my order ORDER-123456?");
//! println!("{}", turn.reply.response);
//! ```

#![warn(missing_docs)]

mod conversation;
mod dispatcher;
mod error;
mod handlers;
mod lookup;
mod policy;

pub use conversation::{Conversation, Turn};
pub use dispatcher::{Dispatcher, HandlerReply};
pub use error::AgentError;
pub use handlers::{
    status_text, GeneralHandler, OrdersHandler, ReturnsHandler, DEFAULT_TOP_K, GENERAL_REPLY,
    MIN_ORDER_ID_LEN, MISSING_ORDER_ID_REPLY, NOT_RETURNABLE_MESSAGE, RETURNS_TEMPLATE,
};
pub use lookup::{HttpOrderLookup, DEFAULT_ORDERS_URL, DEFAULT_TIMEOUT_SECS};
pub use policy::{PolicyBook, STANDARD_POLICIES};
