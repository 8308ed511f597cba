use std::fmt;
use std::hash::{Hash, Hasher};

/// Normalized form of user input, used for dispatch and cache indexing.
///
/// Construction trims the raw text and collapses internal whitespace runs to
/// a single space. The original casing is preserved for dispatch; equality
/// and hashing use a case-folded copy, so "Salad" and "salad" share cache
/// entries and in-flight requests.
#[derive(Debug, Clone)]
pub struct QueryKey {
    text: String,
    folded: String,
}

impl QueryKey {
    /// Normalize raw input into a key.
    ///
    /// Whitespace-only input yields the empty key, the sentinel for
    /// "no query".
    pub fn normalize(raw: &str) -> Self {
        let mut text = String::with_capacity(raw.len());
        for word in raw.split_whitespace() {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(word);
        }
        let folded = text.to_lowercase();
        Self { text, folded }
    }

    /// The "no query" sentinel.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            folded: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Case-preserved text sent to the backend.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Case-folded form used for cache and dedup comparison.
    pub fn folded(&self) -> &str {
        &self.folded
    }
}

impl PartialEq for QueryKey {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for QueryKey {}

impl Hash for QueryKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod key_tests;
