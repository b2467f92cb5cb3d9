//! Word equality policies.
//!
//! A comparer decides which spellings count as the same word. It is applied
//! while grouping occurrences at build time and again at lookup, so changing
//! it changes what the index contains, not just how it is queried.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Maps a word to the key it is grouped under.
///
/// Two words are equal exactly when their keys are equal.
pub trait WordComparer: Send + Sync {
    fn key<'a>(&self, word: &'a str) -> Cow<'a, str>;
}

/// Built-in comparers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparer {
    /// Exact, byte-for-byte equality
    #[default]
    Ordinal,
    /// Equal after ASCII lowercasing; other characters must match exactly
    AsciiCaseInsensitive,
    /// Equal after full Unicode lowercasing
    CaseInsensitive,
}

impl WordComparer for Comparer {
    fn key<'a>(&self, word: &'a str) -> Cow<'a, str> {
        match self {
            Comparer::Ordinal => Cow::Borrowed(word),
            Comparer::AsciiCaseInsensitive => {
                if word.bytes().any(|b| b.is_ascii_uppercase()) {
                    Cow::Owned(word.to_ascii_lowercase())
                } else {
                    Cow::Borrowed(word)
                }
            }
            Comparer::CaseInsensitive => {
                // Titlecase letters fold too, so test the mapping itself
                if word.chars().any(|c| c.to_lowercase().ne(std::iter::once(c))) {
                    Cow::Owned(word.to_lowercase())
                } else {
                    Cow::Borrowed(word)
                }
            }
        }
    }
}
