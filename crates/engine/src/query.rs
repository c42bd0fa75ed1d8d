use std::fmt::{Display, Formatter, Result as FmtResult};

/// A trimmed, non-empty search string.
///
/// The original text is kept for display; case folding only ever happens on
/// copies made for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchQuery {
    text: String,
}
impl MatchQuery {
    /// Returns `None` for blank queries.
    pub fn new(text: impl AsRef<str>) -> Option<Self> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return None;
        }
        Some(Self { text: text.to_string() })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Lowercased query, shared by every user asking for the same card.
    pub fn cache_key(&self) -> String {
        self.text.to_lowercase()
    }

    /// Lowercased, whitespace-separated words of the query.
    pub(crate) fn words(&self) -> Vec<String> {
        words(&self.text)
    }
}
impl AsRef<str> for MatchQuery {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
impl Display for MatchQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.text)
    }
}

/// Lowercase and strip every non-word character (anything other than
/// letters, digits and underscores, whitespace included).
pub(crate) fn fold(text: &str) -> String {
    text.to_lowercase().chars().filter(|c| c.is_alphanumeric() || *c == '_').collect()
}

pub(crate) fn words(text: &str) -> Vec<String> {
    text.to_lowercase().split_whitespace().map(str::to_string).collect()
}
