//! Return-policy passages and keyword retrieval

use std::collections::HashSet;

/// Passages the returns handler answers from
pub const STANDARD_POLICIES: [&str; 5] = [
    "Returns accepted within 30 days",
    "Electronics must be unopened",
    "Broken items are not eligible for return",
    "Used items are not eligible for return",
    "Free returns for premium members",
];

/// Ordered collection of policy passages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyBook {
    passages: Vec<String>,
}

impl PolicyBook {
    /// Create a book from passages in declaration order
    pub fn new(passages: Vec<String>) -> Self {
        Self { passages }
    }

    /// The built-in return policies
    pub fn standard() -> Self {
        Self::new(STANDARD_POLICIES.iter().map(|p| p.to_string()).collect())
    }

    /// All passages
    pub fn passages(&self) -> &[String] {
        &self.passages
    }

    /// Number of passages
    pub fn len(&self) -> usize {
        self.passages.len()
    }

    /// Whether the book has no passages
    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// The `k` passages sharing the most words with `query`
    ///
    /// Words are lowercase alphanumeric runs; each distinct shared word counts
    /// once. Ties keep declaration order, so a query with no shared words gets
    /// the first `k` passages.
    pub fn top_k(&self, query: &str, k: usize) -> Vec<&str> {
        let query_words = words(query);

        let mut scored: Vec<(usize, &str)> = self
            .passages
            .iter()
            .map(|passage| {
                let overlap = words(passage).intersection(&query_words).count();
                (overlap, passage.as_str())
            })
            .collect();

        // Stable sort keeps declaration order among equal scores
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().take(k).map(|(_, passage)| passage).collect()
    }
}

impl Default for PolicyBook {
    fn default() -> Self {
        Self::standard()
    }
}

fn words(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}
