//! In-memory inverted word index.
//!
//! - [`builder`] - Single-use occurrence accumulator
//! - [`word_index`] - Frozen lookup structure
//! - [`build`] - Feeds files through the tokenizer into a builder
//! - [`comparer`] - Word equality policies
//! - [`stats`] - Index summaries

pub mod build;
pub mod builder;
pub mod comparer;
pub mod stats;
pub mod types;
pub mod word_index;

pub use build::{index_files, BuildReport};
pub use builder::{HashIndexBuilder, IndexBuilder};
pub use comparer::{Comparer, WordComparer};
pub use stats::IndexStats;
pub use types::*;
pub use word_index::{HashWordIndex, WordIndex};
