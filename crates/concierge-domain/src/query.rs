//! Query module - a single user turn entering the router

use std::fmt;

/// Identifier for a query turn based on UUIDv7
///
/// Only used to correlate log lines belonging to one turn; it carries no
/// routing semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryId(u128);

impl QueryId {
    /// Generate a new UUIDv7-based QueryId
    ///
    /// # Examples
    ///
    /// ```
    /// use concierge_domain::QueryId;
    ///
    /// let id = QueryId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a QueryId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for QueryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// An immutable user turn
///
/// Holds the raw query text and, optionally, an identifier already known from
/// earlier turns of the conversation. The router never mutates a query.
///
/// # Examples
///
/// ```
/// use concierge_domain::Query;
///
/// let query = Query::new("Where is my order?").with_known_identifier("123456");
/// assert_eq!(query.text(), "Where is my order?");
/// assert_eq!(query.known_identifier(), Some("123456"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    id: QueryId,
    text: String,
    known_identifier: Option<String>,
}

impl Query {
    /// Create a new query from raw text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: QueryId::new(),
            text: text.into(),
            known_identifier: None,
        }
    }

    /// Attach an identifier supplied by conversation context
    ///
    /// Blank identifiers are ignored.
    pub fn with_known_identifier(mut self, identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        let trimmed = identifier.trim();
        self.known_identifier = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Turn identifier
    pub fn id(&self) -> QueryId {
        self.id
    }

    /// Raw query text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Identifier carried over from the conversation, if any
    pub fn known_identifier(&self) -> Option<&str> {
        self.known_identifier.as_deref()
    }
}
