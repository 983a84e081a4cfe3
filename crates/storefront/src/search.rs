//! Product search term handling.
//!
//! Suggestions come from a single `ILIKE` query ranked with a `CASE`
//! expression. This module turns raw user input into the escaped patterns
//! that query binds, and decides when no query should run at all.

/// Shortest trimmed query that triggers a database lookup.
pub const MIN_QUERY_CHARS: usize = 2;

/// Results returned when the client does not ask for a limit.
pub const DEFAULT_LIMIT: i64 = 8;

/// Upper bound on the number of results.
pub const MAX_LIMIT: i64 = 50;

/// Escape character used in the generated `LIKE` patterns.
pub const LIKE_ESCAPE: char = '\\';

/// A validated, escaped search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    escaped: String,
}

impl SearchTerm {
    /// Build a term from raw input.
    ///
    /// Returns `None` when the trimmed input is shorter than
    /// [`MIN_QUERY_CHARS`] characters.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            return None;
        }
        Some(Self {
            escaped: escape_like(trimmed),
        })
    }

    /// Pattern matching values that start with the term.
    #[must_use]
    pub fn prefix_pattern(&self) -> String {
        format!("{}%", self.escaped)
    }

    /// Pattern matching values that contain the term anywhere.
    #[must_use]
    pub fn contains_pattern(&self) -> String {
        format!("%{}%", self.escaped)
    }
}

/// Escape `LIKE` wildcards so user input only matches literally.
#[must_use]
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Clamp a requested limit to `1..=MAX_LIMIT`, defaulting when absent.
#[must_use]
pub fn clamp_limit(requested: Option<i64>) -> i64 {
    requested.map_or(DEFAULT_LIMIT, |limit| limit.clamp(1, MAX_LIMIT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_queries_are_rejected() {
        assert_eq!(SearchTerm::parse(""), None);
        assert_eq!(SearchTerm::parse("a"), None);
        assert_eq!(SearchTerm::parse("   v   "), None);
    }

    #[test]
    fn test_two_chars_after_trim_is_enough() {
        let term = SearchTerm::parse("  va ").unwrap_or_else(|| panic!("term"));
        assert_eq!(term.prefix_pattern(), "va%");
        assert_eq!(term.contains_pattern(), "%va%");
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // "é" is two bytes but one character
        assert_eq!(SearchTerm::parse("é"), None);
        assert!(SearchTerm::parse("çã").is_some());
    }

    #[test]
    fn test_wildcards_are_escaped() {
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\x"), "c:\\\\x");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_escaped_term_in_patterns() {
        let term = SearchTerm::parse("100%").unwrap_or_else(|| panic!("term"));
        assert_eq!(term.contains_pattern(), "%100\\%%");
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-3)), 1);
        assert_eq!(clamp_limit(Some(20)), 20);
        assert_eq!(clamp_limit(Some(500)), MAX_LIMIT);
    }
}
