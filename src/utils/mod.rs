//! Utility functions shared by the indexer and the CLI.
//!
//! - [`tokenizer`] - Splits a line into numbered words
//! - [`binary`] - Binary content sniffing
//! - [`progress`] - Progress spinner (no-op without the `progress` feature)
//!
//! ```
//! use wordscan::utils::tokenize;
//!
//! let words: Vec<_> = tokenize("cat dog, cat").collect();
//! assert_eq!(words, vec![("cat", 1), ("dog", 2), ("cat", 3)]);
//! ```

pub mod binary;
pub mod progress;
pub mod tokenizer;

pub use binary::*;
pub use tokenizer::*;
