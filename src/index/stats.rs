use crate::index::word_index::WordIndex;
use serde::Serialize;
use std::cmp::Reverse;

/// Summary of an imported index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub files: usize,
    pub distinct_words: usize,
    pub occurrences: usize,
    /// Most frequent words, highest count first, ties broken by word
    pub top_words: Vec<(String, usize)>,
}

impl IndexStats {
    pub fn collect(index: &dyn WordIndex, files: usize, top: usize) -> Self {
        let mut counts: Vec<(&str, usize)> = index
            .words()
            .map(|(word, entry)| (word, entry.count()))
            .collect();
        counts.sort_unstable_by_key(|&(word, count)| (Reverse(count), word));

        Self {
            files,
            distinct_words: index.word_count(),
            occurrences: index.occurrence_count(),
            top_words: counts
                .into_iter()
                .take(top)
                .map(|(word, count)| (word.to_string(), count))
                .collect(),
        }
    }
}
