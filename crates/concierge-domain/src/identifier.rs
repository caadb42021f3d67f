//! Identifier module - order/transaction tokens recovered from a query

use std::fmt;

/// Structural pattern class that produced an identifier
///
/// Declared in priority order: when several classes could match the same
/// text, the earliest one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatternKind {
    /// `ORD`/`ORDER` prefix with optional separator, e.g. `ORDER-456`
    OrderPrefix,

    /// `ID` prefix with optional separator, e.g. `ID-789`
    IdPrefix,

    /// Three letters immediately followed by digits, e.g. `ABC123`
    LetterCode,

    /// Digits following the standalone word "order"
    AfterOrderWord,

    /// Digits following the standalone word "tracking"
    AfterTrackingWord,
}

impl PatternKind {
    /// Short name for logs and output
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::OrderPrefix => "order-prefix",
            PatternKind::IdPrefix => "id-prefix",
            PatternKind::LetterCode => "letter-code",
            PatternKind::AfterOrderWord => "after-order-word",
            PatternKind::AfterTrackingWord => "after-tracking-word",
        }
    }
}

/// Where an identifier came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierSource {
    /// Deterministic structural match
    Pattern(PatternKind),

    /// Model-backed fallback extraction
    Fallback,

    /// Carried over from an earlier conversation turn
    Context,
}

impl fmt::Display for IdentifierSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierSource::Pattern(kind) => write!(f, "pattern:{}", kind.as_str()),
            IdentifierSource::Fallback => f.write_str("fallback"),
            IdentifierSource::Context => f.write_str("context"),
        }
    }
}

/// A resolved identifier
///
/// Pattern-sourced values are uppercase. Fallback-sourced values are whatever
/// the model returned, trimmed. Absence is modelled as `Option<Identifier>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// The token itself
    pub value: String,

    /// How it was found
    pub source: IdentifierSource,
}

impl Identifier {
    /// Create an identifier from a structural match (value is uppercased)
    pub fn from_pattern(kind: PatternKind, value: &str) -> Self {
        Self {
            value: value.to_uppercase(),
            source: IdentifierSource::Pattern(kind),
        }
    }

    /// Create an identifier from model output (value kept verbatim)
    pub fn from_fallback(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            source: IdentifierSource::Fallback,
        }
    }

    /// Create an identifier carried over from conversation context
    pub fn from_context(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            source: IdentifierSource::Context,
        }
    }

    /// Borrow the token
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
