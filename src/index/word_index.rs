use crate::index::comparer::WordComparer;
use crate::index::types::WordEntry;
use ahash::AHashMap;
use std::sync::Arc;

/// Read-only word lookup.
///
/// Implementations are frozen once built and may be shared across threads.
pub trait WordIndex: Send + Sync {
    /// Look up a word under the index's comparer.
    ///
    /// Never fails: words that were not indexed yield [`WordEntry::empty`].
    fn find(&self, word: &str) -> WordEntry;

    /// Number of distinct words
    fn word_count(&self) -> usize;

    /// Total number of occurrences across all words
    fn occurrence_count(&self) -> usize;

    /// Every distinct word with its entry, in no particular order
    fn words(&self) -> Box<dyn Iterator<Item = (&str, &WordEntry)> + '_>;
}

/// A distinct word as first spelled in the input, with its occurrences
#[derive(Debug, Clone)]
pub(crate) struct IndexedWord {
    pub word: String,
    pub entry: WordEntry,
}

/// Hash map backed index produced by [`HashIndexBuilder`](super::builder::HashIndexBuilder)
pub struct HashWordIndex {
    comparer: Arc<dyn WordComparer>,
    entries: AHashMap<String, IndexedWord>,
    occurrence_count: usize,
}

impl HashWordIndex {
    pub(crate) fn new(
        comparer: Arc<dyn WordComparer>,
        entries: AHashMap<String, IndexedWord>,
    ) -> Self {
        let occurrence_count = entries.values().map(|w| w.entry.count()).sum();
        Self {
            comparer,
            entries,
            occurrence_count,
        }
    }
}

impl WordIndex for HashWordIndex {
    fn find(&self, word: &str) -> WordEntry {
        let key = self.comparer.key(word);
        self.entries
            .get(key.as_ref())
            .map(|w| w.entry.clone())
            .unwrap_or_default()
    }

    fn word_count(&self) -> usize {
        self.entries.len()
    }

    fn occurrence_count(&self) -> usize {
        self.occurrence_count
    }

    fn words(&self) -> Box<dyn Iterator<Item = (&str, &WordEntry)> + '_> {
        Box::new(self.entries.values().map(|w| (w.word.as_str(), &w.entry)))
    }
}

impl std::fmt::Debug for HashWordIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashWordIndex")
            .field("words", &self.entries.len())
            .field("occurrences", &self.occurrence_count)
            .finish()
    }
}
