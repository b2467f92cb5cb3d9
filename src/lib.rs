//! # wordscan - in-memory word index
//!
//! wordscan walks a file or directory, splits every line into words and
//! builds an inverted index from each word to the places it occurs. Lookups
//! are exact (under a configurable [`Comparer`](index::Comparer)) and return
//! the file, line and word position of every hit together with the line's
//! current text.
//!
//! ## Architecture
//!
//! - [`collect`] - Recursive file discovery
//! - [`utils`] - Tokenizer, binary sniffing, progress spinner
//! - [`index`] - Index builder and frozen word index
//! - [`searcher`] - Import and query orchestration
//! - [`output`] - Result formatting
//!
//! ## Quick Start
//!
//! ```no_run
//! use wordscan::index::IndexConfig;
//! use wordscan::Searcher;
//!
//! let mut searcher = Searcher::new(IndexConfig::default());
//! searcher.import_from("/path/to/documents").unwrap();
//!
//! for result in searcher.search("cat").unwrap() {
//!     println!("{}", result);
//! }
//! ```
//!
//! The index lives only in memory. Importing again replaces it entirely.

pub mod collect;
pub mod error;
pub mod index;
pub mod output;
pub mod searcher;
pub mod utils;

pub use collect::{collect, Collection};
pub use error::{Error, Result, Warning, WarningKind};
pub use searcher::{ImportReport, Searcher};
