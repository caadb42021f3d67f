//! Text normalization ahead of identifier extraction

use regex::Regex;
use std::sync::OnceLock;

fn separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[,\s]+").expect("separator regex is valid"))
}

/// Collapse grouped numeric literals into contiguous digit runs
///
/// A run of commas and/or whitespace is removed when it sits between two
/// ASCII digits (`"12,345"`, `"12 345"`, `"1, 2 3"`); every other character is
/// kept as-is. Total over all input and idempotent.
///
/// # Examples
///
/// ```
/// use concierge_router::normalize;
///
/// assert_eq!(normalize("order 12,345 please"), "order 12345 please");
/// assert_eq!(normalize("ID 1 2 3"), "ID 123");
/// ```
pub fn normalize(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut last = 0;

    for separator in separator_regex().find_iter(text) {
        normalized.push_str(&text[last..separator.start()]);

        let before = text[..separator.start()].chars().next_back();
        let after = text[separator.end()..].chars().next();
        if !(is_digit(before) && is_digit(after)) {
            normalized.push_str(separator.as_str());
        }

        last = separator.end();
    }

    normalized.push_str(&text[last..]);
    normalized
}

fn is_digit(c: Option<char>) -> bool {
    c.is_some_and(|c| c.is_ascii_digit())
}
