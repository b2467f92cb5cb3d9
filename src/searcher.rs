//! Import and query orchestration.

use crate::collect::collect;
use crate::error::{Error, Result, Warning};
use crate::index::build::BOM;
use crate::index::{
    index_files, BuildReport, HashIndexBuilder, IndexBuilder, IndexConfig, IndexStats,
    LineNumber, SearchResult, WordIndex,
};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Creates a fresh builder for each import
pub type BuilderFactory = Box<dyn Fn(&IndexConfig) -> Box<dyn IndexBuilder> + Send + Sync>;

/// Number of entries shown in [`IndexStats::top_words`]
const TOP_WORDS: usize = 10;

/// What an import found
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub root: PathBuf,
    pub files: usize,
    /// Paths skipped while walking the root
    pub collect_warnings: Vec<Warning>,
    pub build: BuildReport,
}

impl ImportReport {
    /// All skipped paths, walk first then build
    pub fn warnings(&self) -> impl Iterator<Item = &Warning> {
        self.collect_warnings.iter().chain(self.build.warnings.iter())
    }
}

struct Imported {
    files: Vec<PathBuf>,
    index: Box<dyn WordIndex>,
}

/// Holds the files and index of the most recent import and answers queries.
pub struct Searcher {
    config: IndexConfig,
    new_builder: BuilderFactory,
    imported: Option<Imported>,
}

impl Searcher {
    pub fn new(config: IndexConfig) -> Self {
        Self::with_builder(
            config,
            Box::new(|config: &IndexConfig| {
                Box::new(HashIndexBuilder::with_comparer(Arc::new(config.comparer)))
                    as Box<dyn IndexBuilder>
            }),
        )
    }

    /// Use a different index implementation
    pub fn with_builder(config: IndexConfig, new_builder: BuilderFactory) -> Self {
        Self {
            config,
            new_builder,
            imported: None,
        }
    }

    /// Collect and index everything under `path`, replacing any previous import.
    ///
    /// On failure the searcher is left holding an empty import, so lookups
    /// keep working and return nothing.
    pub fn import_from(&mut self, path: impl AsRef<Path>) -> Result<ImportReport> {
        let path = path.as_ref();
        self.imported = None;

        let collection = match collect(path) {
            Ok(c) => c,
            Err(e) => {
                self.imported = Some(Imported {
                    files: Vec::new(),
                    index: (self.new_builder)(&self.config).build()?,
                });
                return Err(e);
            }
        };

        let mut builder = (self.new_builder)(&self.config);
        let (index, build) = index_files(builder.as_mut(), &collection.files, &self.config)?;

        log::info!(
            "imported {}: {} files, {} distinct words",
            path.display(),
            build.files_indexed,
            index.word_count()
        );

        let report = ImportReport {
            root: path.to_path_buf(),
            files: collection.files.len(),
            collect_warnings: collection.warnings,
            build,
        };

        self.imported = Some(Imported {
            files: collection.files,
            index,
        });

        Ok(report)
    }

    fn imported(&self) -> Result<&Imported> {
        self.imported
            .as_ref()
            .ok_or(Error::InvalidState("nothing has been imported"))
    }

    /// Files collected by the last import, in collection order
    pub fn files(&self) -> &[PathBuf] {
        self.imported
            .as_ref()
            .map(|i| i.files.as_slice())
            .unwrap_or_default()
    }

    pub fn file_names(&self) -> Vec<String> {
        self.files()
            .iter()
            .map(|p| p.display().to_string())
            .collect()
    }

    pub fn index(&self) -> Result<&dyn WordIndex> {
        Ok(self.imported()?.index.as_ref())
    }

    pub fn stats(&self) -> Result<IndexStats> {
        let imported = self.imported()?;
        Ok(IndexStats::collect(
            imported.index.as_ref(),
            imported.files.len(),
            TOP_WORDS,
        ))
    }

    /// Find every occurrence of `word` and attach the text of its line.
    ///
    /// Results follow index order: file collection order, then line, then
    /// position. Lines that can no longer be read come back with
    /// `line_text: None`.
    pub fn search(&self, word: &str) -> Result<Vec<SearchResult>> {
        let entry = self.imported()?.index.find(word);
        let mut lines = LineFetcher::default();

        Ok(entry
            .iter()
            .map(|occurrence| SearchResult {
                word: word.to_string(),
                file: occurrence.file.to_path_buf(),
                line: occurrence.line,
                position: occurrence.position,
                line_text: lines.fetch(&occurrence.file, occurrence.line),
            })
            .collect())
    }
}

/// Reads lines on demand, reusing the open file while requests move forward.
///
/// Occurrences of one file arrive in ascending line order, so a query scans
/// each file at most once.
#[derive(Default)]
struct LineFetcher {
    open: Option<OpenFile>,
}

struct OpenFile {
    path: Arc<Path>,
    lines: io::Lines<BufReader<File>>,
    /// Number of lines consumed so far
    consumed: LineNumber,
    last: Option<String>,
}

impl LineFetcher {
    fn fetch(&mut self, path: &Arc<Path>, line: LineNumber) -> Option<String> {
        let reusable = self
            .open
            .as_ref()
            .is_some_and(|f| f.path == *path && f.consumed <= line);
        if !reusable {
            self.open = None;
            match File::open(path) {
                Ok(file) => {
                    self.open = Some(OpenFile {
                        path: Arc::clone(path),
                        lines: BufReader::new(file).lines(),
                        consumed: 0,
                        last: None,
                    });
                }
                Err(e) => {
                    log::warn!("could not reopen {}: {}", path.display(), e);
                    return None;
                }
            }
        }

        let file = self.open.as_mut()?;
        if file.consumed == line {
            return file.last.clone();
        }

        while file.consumed < line {
            match file.lines.next() {
                Some(Ok(mut text)) => {
                    file.consumed += 1;
                    if file.consumed == 1 && text.starts_with(BOM) {
                        text.drain(..BOM.len_utf8());
                    }
                    file.last = Some(text);
                }
                Some(Err(e)) => {
                    log::warn!("error reading {}: {}", path.display(), e);
                    self.open = None;
                    return None;
                }
                None => {
                    log::warn!(
                        "{} has only {} lines, wanted line {}",
                        path.display(),
                        file.consumed,
                        line
                    );
                    self.open = None;
                    return None;
                }
            }
        }

        file.last.clone()
    }
}
