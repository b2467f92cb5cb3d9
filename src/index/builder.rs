use crate::error::{Error, Result};
use crate::index::comparer::{Comparer, WordComparer};
use crate::index::types::{LineNumber, Occurrence, WordEntry, WordPosition};
use crate::index::word_index::{HashWordIndex, IndexedWord, WordIndex};
use ahash::AHashMap;
use std::path::Path;
use std::sync::Arc;

/// Accumulates occurrences and freezes them into a [`WordIndex`].
///
/// A builder is single-use: after [`build`](IndexBuilder::build) succeeds,
/// both methods return [`Error::InvalidState`].
pub trait IndexBuilder {
    fn add_occurrence(
        &mut self,
        word: &str,
        file: &Arc<Path>,
        line: LineNumber,
        position: WordPosition,
    ) -> Result<()>;

    fn build(&mut self) -> Result<Box<dyn WordIndex>>;
}

/// Occurrences collected so far for one word
struct Accumulator {
    word: String,
    occurrences: Vec<Occurrence>,
}

enum BuilderState {
    Accumulating(AHashMap<String, Accumulator>),
    Finalized,
}

/// Builds a [`HashWordIndex`], grouping words with a [`WordComparer`]
pub struct HashIndexBuilder {
    comparer: Arc<dyn WordComparer>,
    state: BuilderState,
}

impl HashIndexBuilder {
    /// Builder using exact ordinal word equality
    pub fn new() -> Self {
        Self::with_comparer(Arc::new(Comparer::Ordinal))
    }

    pub fn with_comparer(comparer: Arc<dyn WordComparer>) -> Self {
        Self {
            comparer,
            state: BuilderState::Accumulating(AHashMap::new()),
        }
    }

    /// Whether `build` has already been called
    pub fn is_finalized(&self) -> bool {
        matches!(self.state, BuilderState::Finalized)
    }
}

impl Default for HashIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexBuilder for HashIndexBuilder {
    fn add_occurrence(
        &mut self,
        word: &str,
        file: &Arc<Path>,
        line: LineNumber,
        position: WordPosition,
    ) -> Result<()> {
        let BuilderState::Accumulating(words) = &mut self.state else {
            return Err(Error::InvalidState("occurrence added after build"));
        };

        let occurrence = Occurrence::new(Arc::clone(file), line, position);
        let key = self.comparer.key(word);

        match words.get_mut(key.as_ref()) {
            Some(acc) => acc.occurrences.push(occurrence),
            None => {
                words.insert(
                    key.into_owned(),
                    Accumulator {
                        word: word.to_string(),
                        occurrences: vec![occurrence],
                    },
                );
            }
        }

        Ok(())
    }

    fn build(&mut self) -> Result<Box<dyn WordIndex>> {
        let BuilderState::Accumulating(words) =
            std::mem::replace(&mut self.state, BuilderState::Finalized)
        else {
            return Err(Error::InvalidState("index already built"));
        };

        let entries = words
            .into_iter()
            .map(|(key, acc)| {
                let indexed = IndexedWord {
                    word: acc.word,
                    entry: WordEntry::from_vec(acc.occurrences),
                };
                (key, indexed)
            })
            .collect();

        Ok(Box::new(HashWordIndex::new(
            Arc::clone(&self.comparer),
            entries,
        )))
    }
}
