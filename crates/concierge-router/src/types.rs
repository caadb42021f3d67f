//! Routing outcome types

use concierge_domain::{Identifier, Intent, QueryId, RoutingDecision};
use std::fmt;

/// States a query passes through during one routing turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteStage {
    /// Query received
    Start,
    /// Text normalized for extraction
    Normalized,
    /// A structural pattern produced the identifier
    Matched,
    /// No structural pattern matched
    Unmatched,
    /// Identifier resolution finished (identifier may be absent)
    IdentifierResolved,
    /// Intent decided
    Classified,
    /// Handed to a downstream handler
    Dispatched,
}

impl RouteStage {
    /// Short name for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStage::Start => "start",
            RouteStage::Normalized => "normalized",
            RouteStage::Matched => "matched",
            RouteStage::Unmatched => "unmatched",
            RouteStage::IdentifierResolved => "identifier-resolved",
            RouteStage::Classified => "classified",
            RouteStage::Dispatched => "dispatched",
        }
    }
}

impl fmt::Display for RouteStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of resolving the identifier for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierResolution {
    /// Resolved identifier, if any
    pub identifier: Option<Identifier>,

    /// Text the patterns and the fallback saw
    pub normalized_text: String,

    /// Whether a structural pattern matched
    pub pattern_matched: bool,

    /// Whether the fallback extractor was called
    pub fallback_invoked: bool,
}

impl IdentifierResolution {
    /// Stages this resolution passed through, in order
    pub fn stages(&self) -> Vec<RouteStage> {
        let matched = if self.pattern_matched {
            RouteStage::Matched
        } else {
            RouteStage::Unmatched
        };
        vec![RouteStage::Normalized, matched, RouteStage::IdentifierResolved]
    }
}

/// Everything the router decided about one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOutcome {
    /// Correlation id of the routed query
    pub query_id: QueryId,

    /// Validated intent and reasoning
    pub decision: RoutingDecision,

    /// Resolved identifier; absence is a valid outcome for every intent
    pub identifier: Option<Identifier>,

    /// Whether the fallback extractor was called
    pub fallback_invoked: bool,

    /// Stage trail, `Start` first
    pub stages: Vec<RouteStage>,
}

impl RouteOutcome {
    /// Routed intent
    pub fn intent(&self) -> Intent {
        self.decision.intent
    }

    /// Identifier value, if any
    pub fn identifier_value(&self) -> Option<&str> {
        self.identifier.as_ref().map(Identifier::as_str)
    }

    /// Last stage reached
    pub fn stage(&self) -> RouteStage {
        self.stages.last().copied().unwrap_or(RouteStage::Start)
    }

    /// Record hand-off to a handler
    pub fn mark_dispatched(&mut self) {
        if self.stage() != RouteStage::Dispatched {
            self.stages.push(RouteStage::Dispatched);
        }
    }
}
