//! Concierge Router
//!
//! Turns one free-form customer-service query into a routing decision plus
//! an optional order identifier.
//!
//! # Overview
//!
//! Two independent decisions are made per query:
//!
//! - **Intent classification**: one model call with a strict JSON contract.
//!   Any failure is coerced to the general intent, so the result is always
//!   one of the three known intents.
//! - **Identifier resolution**: deterministic patterns first, then a single
//!   model call when nothing matched, then the identifier carried over from
//!   the previous turn.
//!
//! # Architecture
//!
//! ```text
//! Query → normalize → PatternSet ─┬─ match ────────────┐
//!                                 └─ FallbackExtractor ┴→ Identifier?
//! Query → IntentClassifier → RoutingDecision
//! ```
//!
//! # Example Usage
//!
//! ```
//! use concierge_domain::{Intent, Query};
//! use concierge_llm::MockGateway;
//! use concierge_router::{Router, RouterConfig};
//!
//! let gateway = MockGateway::new("null").with_response(
//!     "Strictly follow these categories",
//!     r#"{"Category":"OrdersAgent","Reasoning":"order status question"}"#,
//! );
//! let router = Router::new(gateway, RouterConfig::default());
//!
//! let outcome = router.route(&Query::new("Where is my order ORDER-123456?"));
//! assert_eq!(outcome.decision.intent, Intent::Orders);
//! assert_eq!(outcome.identifier_value(), Some("123456"));
//! assert!(!outcome.fallback_invoked);
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod fallback;
mod normalize;
mod parser;
mod patterns;
mod prompt;
mod router;
mod types;


pub use classifier::IntentClassifier;
pub use config::RouterConfig;
pub use error::{ClassificationError, ConfigError, PatternError};
pub use fallback::{interpret_fallback_output, FallbackExtractor, NULL_SENTINEL};
pub use normalize::normalize;
pub use parser::{parse_routing_output, strip_code_fence};
pub use patterns::{IdentifierPattern, PatternSet, STANDARD_PATTERNS};
pub use prompt::{EXTRACTION_TEMPLATE, ROUTING_TEMPLATE};
pub use router::Router;
pub use types::{IdentifierResolution, RouteOutcome, RouteStage};
