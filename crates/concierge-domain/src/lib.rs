//! Concierge Domain Layer
//!
//! This crate contains the domain model for Concierge, the customer-service
//! query router. Apart from UUIDv7 generation it has no external dependencies
//! and defines the value objects and trait interfaces that every other layer
//! depends upon.
//!
//! ## Key Concepts
//!
//! - **Query**: one user turn, immutable, consumed once by the router
//! - **Intent**: the closed set of handlers a query can be routed to
//! - **RoutingDecision**: a validated intent plus a reasoning string
//! - **Identifier**: an order/transaction token and where it was found
//! - **InstructionTemplate**: fixed prompt text with named slots
//!
//! ## Architecture
//!
//! - Pure domain logic only
//! - Infrastructure (model backends, HTTP) lives in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod identifier;
pub mod intent;
pub mod order;
pub mod query;
pub mod template;
pub mod traits;

// Re-exports for convenience
pub use identifier::{Identifier, IdentifierSource, PatternKind};
pub use intent::{Intent, RoutingDecision};
pub use order::OrderStatus;
pub use query::{Query, QueryId};
pub use template::{InstructionTemplate, TemplateError, TemplateVars};
