use crate::index::comparer::Comparer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 1-based line number within a file
pub type LineNumber = u32;

/// 1-based index of a word among the words of its line
pub type WordPosition = u32;

/// One appearance of a word in an indexed file.
///
/// The path is shared between every occurrence of the same file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Occurrence {
    pub file: Arc<Path>,
    pub line: LineNumber,
    pub position: WordPosition,
}

impl Occurrence {
    pub fn new(file: Arc<Path>, line: LineNumber, position: WordPosition) -> Self {
        Self {
            file,
            line,
            position,
        }
    }
}

/// All occurrences of one distinct word, in the order they were indexed.
///
/// Entries are frozen: cloning shares the underlying slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    occurrences: Arc<[Occurrence]>,
}

impl WordEntry {
    /// The entry returned for words that were never indexed
    pub fn empty() -> Self {
        Self {
            occurrences: Arc::from(Vec::new()),
        }
    }

    pub(crate) fn from_vec(occurrences: Vec<Occurrence>) -> Self {
        Self {
            occurrences: Arc::from(occurrences),
        }
    }

    /// Number of occurrences
    pub fn count(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Occurrence> {
        self.occurrences.iter()
    }
}

impl Default for WordEntry {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a WordEntry {
    type Item = &'a Occurrence;
    type IntoIter = std::slice::Iter<'a, Occurrence>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A query hit joined with the text of its line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub word: String,
    pub file: PathBuf,
    pub line: LineNumber,
    pub position: WordPosition,
    /// `None` when the line could no longer be read at query time
    pub line_text: Option<String>,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} was found in {}({}:{})\t\t{}",
            self.word,
            self.file.display(),
            self.line,
            self.position,
            self.line_text.as_deref().unwrap_or("")
        )
    }
}

/// Configuration for the indexer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Word equality used for grouping and lookup
    pub comparer: Comparer,
    /// Files larger than this are skipped
    pub max_file_size: u64,
    /// Skip files whose content looks binary
    pub skip_binary: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            comparer: Comparer::Ordinal,
            max_file_size: 100 * 1024 * 1024, // 100MB
            skip_binary: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_entry() {
        let entry = WordEntry::empty();
        assert_eq!(entry.count(), 0);
        assert!(entry.occurrences().is_empty());
        assert_eq!(entry, WordEntry::default());
    }

    #[test]
    fn test_search_result_display() {
        let result = SearchResult {
            word: "cat".to_string(),
            file: PathBuf::from("/tmp/a.txt"),
            line: 3,
            position: 2,
            line_text: Some("dog cat".to_string()),
        };
        assert_eq!(result.to_string(), "cat was found in /tmp/a.txt(3:2)\t\tdog cat");

        let missing = SearchResult {
            line_text: None,
            ..result
        };
        assert_eq!(missing.to_string(), "cat was found in /tmp/a.txt(3:2)\t\t");
    }
}
