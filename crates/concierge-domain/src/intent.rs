//! Intent module - the closed set of routing targets

use std::fmt;

/// Reasoning used when the model returns a valid category but no explanation
pub const DEFAULT_REASONING: &str = "Automatic routing";

/// Prefix of every reasoning string produced by a failed classification
pub const ROUTING_FAILED_PREFIX: &str = "Routing failed: ";

/// Handler category a query is routed to
///
/// The wire labels (`OrdersAgent`, `ReturnsAgent`, `GeneralAgent`) are the
/// exact strings the routing prompt asks the model to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Order status and shipping questions
    Orders,

    /// Returns, refunds and exchanges
    Returns,

    /// Everything else
    General,
}

impl Intent {
    /// All intents, in the order the routing prompt enumerates them
    pub const ALL: [Intent; 3] = [Intent::Orders, Intent::Returns, Intent::General];

    /// Wire label of the intent
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Orders => "OrdersAgent",
            Intent::Returns => "ReturnsAgent",
            Intent::General => "GeneralAgent",
        }
    }

    /// Parse a wire label
    ///
    /// Matching is exact: a misspelled or differently-cased label is not an
    /// intent.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "OrdersAgent" => Some(Intent::Orders),
            "ReturnsAgent" => Some(Intent::Returns),
            "GeneralAgent" => Some(Intent::General),
            _ => None,
        }
    }

    /// Whether handlers for this intent act on an order identifier
    pub fn uses_identifier(&self) -> bool {
        matches!(self, Intent::Orders | Intent::Returns)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unexpected category: {}", s))
    }
}

/// Result of classifying a query
///
/// The intent is always one of the three [`Intent`] values; a reasoning string
/// is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingDecision {
    /// Validated routing target
    pub intent: Intent,

    /// Human-readable explanation, for diagnostics
    pub reasoning: String,
}

impl RoutingDecision {
    /// Create a decision from a validated intent
    ///
    /// A blank reasoning is replaced by [`DEFAULT_REASONING`].
    pub fn new(intent: Intent, reasoning: impl Into<String>) -> Self {
        let reasoning = reasoning.into();
        let reasoning = if reasoning.trim().is_empty() {
            DEFAULT_REASONING.to_string()
        } else {
            reasoning
        };
        Self { intent, reasoning }
    }

    /// Safe default for a failed classification
    ///
    /// # Examples
    ///
    /// ```
    /// use concierge_domain::{Intent, RoutingDecision};
    ///
    /// let decision = RoutingDecision::failed("backend unreachable");
    /// assert_eq!(decision.intent, Intent::General);
    /// assert_eq!(decision.reasoning, "Routing failed: backend unreachable");
    /// ```
    pub fn failed(cause: impl fmt::Display) -> Self {
        Self {
            intent: Intent::General,
            reasoning: format!("{}{}", ROUTING_FAILED_PREFIX, cause),
        }
    }

    /// Whether this decision came from a failed classification
    pub fn is_failure(&self) -> bool {
        self.intent == Intent::General && self.reasoning.starts_with(ROUTING_FAILED_PREFIX)
    }
}
