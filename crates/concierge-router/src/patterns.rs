//! Structural identifier patterns
//!
//! A [`PatternSet`] is an ordered priority list: patterns are tried in order
//! against the whole text and the first pattern that matches anywhere wins.
//! Later patterns are not evaluated, even if they would match a token that
//! occurs earlier in the text. Ambiguous text therefore resolves by pattern
//! class, never by token position.

use crate::error::PatternError;
use concierge_domain::{Identifier, PatternKind};
use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

/// Built-in patterns in priority order
///
/// Each pattern captures the identifier in group 1. Matching is
/// case-insensitive.
pub const STANDARD_PATTERNS: [(PatternKind, &str); 5] = [
    // ORD123, ORDER-456, order_789
    (PatternKind::OrderPrefix, r"\b(?:ORD|ORDER)[-_ ]?([0-9]{3,})\b"),
    // ID-789
    (PatternKind::IdPrefix, r"\bID[-_ ]?([0-9]{3,})\b"),
    // ABC123
    (PatternKind::LetterCode, r"\b([A-Z]{3}[0-9]{3,})\b"),
    (PatternKind::AfterOrderWord, r"\border\s([0-9]{3,})\b"),
    (PatternKind::AfterTrackingWord, r"\btracking\s([0-9]{3,})\b"),
];

/// A single structural matcher
#[derive(Debug, Clone)]
pub struct IdentifierPattern {
    kind: PatternKind,
    regex: Regex,
}

impl IdentifierPattern {
    /// Compile a case-insensitive pattern
    ///
    /// The identifier is taken from capture group 1 when the pattern has one,
    /// otherwise from the whole match.
    pub fn new(kind: PatternKind, pattern: &str) -> Result<Self, PatternError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| PatternError::InvalidRegex {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self { kind, regex })
    }

    /// Pattern class
    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// First match in `text`, uppercased
    pub fn find(&self, text: &str) -> Option<Identifier> {
        let captures = self.regex.captures(text)?;
        let token = captures.get(1).or_else(|| captures.get(0))?;
        Some(Identifier::from_pattern(self.kind, token.as_str()))
    }
}

/// Ordered list of identifier patterns, first match wins
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<IdentifierPattern>,
}

impl PatternSet {
    /// Create a set from patterns in priority order
    pub fn new(patterns: Vec<IdentifierPattern>) -> Self {
        Self { patterns }
    }

    /// The built-in five-pattern set
    pub fn standard() -> Self {
        static STANDARD: OnceLock<PatternSet> = OnceLock::new();
        STANDARD
            .get_or_init(|| {
                let patterns = STANDARD_PATTERNS
                    .iter()
                    .map(|(kind, pattern)| {
                        IdentifierPattern::new(*kind, pattern)
                            .expect("standard identifier patterns are valid")
                    })
                    .collect();
                PatternSet::new(patterns)
            })
            .clone()
    }

    /// Pattern classes in evaluation order
    pub fn kinds(&self) -> Vec<PatternKind> {
        self.patterns.iter().map(IdentifierPattern::kind).collect()
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set has no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Try each pattern in order; `None` means no pattern matched
    ///
    /// # Examples
    ///
    /// ```
    /// use concierge_router::PatternSet;
    ///
    /// let patterns = PatternSet::standard();
    /// let id = patterns.extract("ORDER-12345 tracking 99999").unwrap();
    /// assert_eq!(id.value, "12345");
    ///
    /// assert!(patterns.extract("no identifier here").is_none());
    /// ```
    pub fn extract(&self, text: &str) -> Option<Identifier> {
        self.patterns.iter().find_map(|pattern| pattern.find(text))
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_domain::IdentifierSource;

    fn extract(text: &str) -> Option<(PatternKind, String)> {
        PatternSet::standard().extract(text).map(|id| match id.source {
            IdentifierSource::Pattern(kind) => (kind, id.value),
            other => panic!("unexpected source {:?}", other),
        })
    }

    #[test]
    fn test_standard_order() {
        assert_eq!(
            PatternSet::standard().kinds(),
            vec![
                PatternKind::OrderPrefix,
                PatternKind::IdPrefix,
                PatternKind::LetterCode,
                PatternKind::AfterOrderWord,
                PatternKind::AfterTrackingWord,
            ]
        );
    }

    #[test]
    fn test_order_prefix() {
        assert_eq!(extract("ORD123"), Some((PatternKind::OrderPrefix, "123".into())));
        assert_eq!(extract("ORDER-456"), Some((PatternKind::OrderPrefix, "456".into())));
        assert_eq!(extract("order_789 please"), Some((PatternKind::OrderPrefix, "789".into())));
        assert_eq!(extract("my ord 1234"), Some((PatternKind::OrderPrefix, "1234".into())));
    }

    #[test]
    fn test_id_prefix() {
        assert_eq!(extract("ID-789"), Some((PatternKind::IdPrefix, "789".into())));
        assert_eq!(extract("my id is id 55555"), Some((PatternKind::IdPrefix, "55555".into())));
    }

    #[test]
    fn test_letter_code_is_uppercased() {
        assert_eq!(extract("ref abc123"), Some((PatternKind::LetterCode, "ABC123".into())));
        assert_eq!(extract("XYZ98765!"), Some((PatternKind::LetterCode, "XYZ98765".into())));
    }

    #[test]
    fn test_after_order_word() {
        // A tab separator is outside the order-prefix separator set
        assert_eq!(
            extract("about my order\t5551234"),
            Some((PatternKind::AfterOrderWord, "5551234".into()))
        );
    }

    #[test]
    fn test_after_tracking_word() {
        assert_eq!(
            extract("tracking 99999 please"),
            Some((PatternKind::AfterTrackingWord, "99999".into()))
        );
    }

    #[test]
    fn test_priority_by_pattern_class_not_position() {
        assert_eq!(
            extract("ORDER-12345 tracking 99999"),
            Some((PatternKind::OrderPrefix, "12345".into()))
        );
        // The tracking number occurs first, but the letter code class ranks higher
        assert_eq!(
            extract("tracking 99999 for ABC12345"),
            Some((PatternKind::LetterCode, "ABC12345".into()))
        );
        assert_eq!(
            extract("ID-111 or ORD222"),
            Some((PatternKind::OrderPrefix, "222".into()))
        );
    }

    #[test]
    fn test_too_few_digits() {
        assert_eq!(extract("ORD12"), None);
        assert_eq!(extract("ID-7"), None);
        assert_eq!(extract("tracking 42"), None);
    }

    #[test]
    fn test_word_boundaries() {
        assert_eq!(extract("RECORD123"), None);
        assert_eq!(extract("ABCD1234"), None);
        assert_eq!(extract("ABC123X"), None);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(extract(""), None);
        assert_eq!(extract("asdracasd"), None);
        assert_eq!(extract("I want a refund"), None);
    }

    #[test]
    fn test_custom_set_respects_given_order() {
        let set = PatternSet::new(vec![
            IdentifierPattern::new(PatternKind::AfterTrackingWord, r"\btracking\s([0-9]{3,})\b").unwrap(),
            IdentifierPattern::new(PatternKind::OrderPrefix, r"\bORDER-([0-9]{3,})\b").unwrap(),
        ]);
        let id = set.extract("ORDER-12345 tracking 99999").unwrap();
        assert_eq!(id.value, "99999");
        assert_eq!(id.source, IdentifierSource::Pattern(PatternKind::AfterTrackingWord));
    }

    #[test]
    fn test_pattern_without_group_uses_whole_match() {
        let pattern = IdentifierPattern::new(PatternKind::LetterCode, r"\b[a-z]{2}-[0-9]{2}\b").unwrap();
        assert_eq!(pattern.find("code ab-12").unwrap().value, "AB-12");
    }

    #[test]
    fn test_invalid_pattern() {
        let result = IdentifierPattern::new(PatternKind::IdPrefix, r"(unclosed");
        assert!(matches!(result, Err(PatternError::InvalidRegex { .. })));
    }

    #[test]
    fn test_empty_set_never_matches() {
        let set = PatternSet::new(vec![]);
        assert!(set.is_empty());
        assert!(set.extract("ORDER-12345").is_none());
    }
}
