use crate::error::{Result, Warning, WarningKind};
use crate::index::builder::IndexBuilder;
use crate::index::types::{IndexConfig, LineNumber};
use crate::index::word_index::WordIndex;
use crate::utils::{is_binary, tokenize, word_count};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of indexing a file list
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub files_indexed: usize,
    pub lines: usize,
    pub tokens: usize,
    pub warnings: Vec<Warning>,
}

/// UTF-8 byte order mark, dropped from the start of a file
pub(crate) const BOM: char = '\u{feff}';

/// Whether every line number and word position of `text` stays within `limit`
fn numbering_fits(text: &str, limit: u64) -> bool {
    // Each line and each word takes at least one byte
    if text.len() as u64 <= limit {
        return true;
    }

    let mut lines = 0u64;
    for line in text.lines() {
        lines += 1;
        if lines > limit || word_count(line) as u64 > limit {
            return false;
        }
    }
    true
}

/// Read one file and feed its words to the builder.
///
/// Returns the number of lines and tokens seen. Read failures come back as a
/// warning; only builder misuse is a hard error.
fn index_file(
    builder: &mut dyn IndexBuilder,
    path: &Path,
    config: &IndexConfig,
) -> Result<std::result::Result<(usize, usize), Warning>> {
    let content = match fs::read(path) {
        Ok(c) => c,
        Err(e) => return Ok(Err(Warning::io(path, &e))),
    };

    // Check size limit
    if content.len() as u64 > config.max_file_size {
        log::warn!("skipping {}: larger than {} bytes", path.display(), config.max_file_size);
        return Ok(Err(Warning::new(
            path,
            WarningKind::TooLarge,
            format!("file is {} bytes", content.len()),
        )));
    }

    if config.skip_binary && is_binary(&content) {
        log::debug!("skipping binary file {}", path.display());
        return Ok(Err(Warning::new(path, WarningKind::Binary, "binary content")));
    }

    let text = match String::from_utf8(content) {
        Ok(t) => t,
        Err(e) => {
            log::warn!("skipping {}: {}", path.display(), e);
            return Ok(Err(Warning::new(path, WarningKind::InvalidUtf8, e.to_string())));
        }
    };

    let text = text.strip_prefix(BOM).unwrap_or(&text);

    if !numbering_fits(text, u64::from(LineNumber::MAX)) {
        log::warn!("skipping {}: too many lines or words to number", path.display());
        return Ok(Err(Warning::new(
            path,
            WarningKind::TooLarge,
            "line or word count exceeds u32",
        )));
    }

    let file: Arc<Path> = Arc::from(path);
    let mut lines = 0;
    let mut tokens = 0;

    for (line_number, line) in (1..=LineNumber::MAX).zip(text.lines()) {
        for (word, position) in tokenize(line) {
            builder.add_occurrence(word, &file, line_number, position)?;
            tokens += 1;
        }
        lines += 1;
    }

    Ok(Ok((lines, tokens)))
}

/// Index every file in order and finalize the builder.
///
/// Files are read one at a time and closed before the next is opened.
/// Unreadable, oversized, binary or non-UTF-8 files are skipped with a
/// warning.
pub fn index_files(
    builder: &mut dyn IndexBuilder,
    files: &[PathBuf],
    config: &IndexConfig,
) -> Result<(Box<dyn WordIndex>, BuildReport)> {
    let mut report = BuildReport::default();

    for path in files {
        match index_file(builder, path, config)? {
            Ok((lines, tokens)) => {
                report.files_indexed += 1;
                report.lines += lines;
                report.tokens += tokens;
            }
            Err(warning) => report.warnings.push(warning),
        }
    }

    log::debug!(
        "indexed {} files ({} lines, {} tokens, {} skipped)",
        report.files_indexed,
        report.lines,
        report.tokens,
        report.warnings.len()
    );

    let index = builder.build()?;
    Ok((index, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::index::builder::HashIndexBuilder;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_blank_lines_count_toward_numbering() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "c.txt", b"first line\n\nthird; line\n");

        let mut builder = HashIndexBuilder::new();
        let (index, report) = index_files(&mut builder, &[path], &IndexConfig::default()).unwrap();

        assert_eq!(report.files_indexed, 1);
        assert_eq!(report.lines, 3);
        assert_eq!(report.tokens, 4);

        let third = index.find("third");
        assert_eq!(third.count(), 1);
        assert_eq!(third.occurrences()[0].line, 3);
        assert_eq!(third.occurrences()[0].position, 1);

        let line = index.find("line");
        let positions: Vec<_> = line.iter().map(|o| (o.line, o.position)).collect();
        assert_eq!(positions, vec![(1, 2), (3, 2)]);
    }

    #[test]
    fn test_crlf_lines() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "crlf.txt", b"cat dog\r\nbird\r\n");

        let mut builder = HashIndexBuilder::new();
        let (index, _) = index_files(&mut builder, &[path], &IndexConfig::default()).unwrap();

        assert_eq!(index.find("dog").count(), 1);
        assert_eq!(index.find("bird").occurrences()[0].line, 2);
        assert_eq!(index.find("dog\r").count(), 0);
    }

    #[test]
    fn test_unreadable_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        let good = write(&dir, "good.txt", b"cat");
        let binary = write(&dir, "blob.bin", b"\x00\x01\x02cat\x00");
        let latin1 = write(&dir, "latin1.txt", b"caf\xe9 cat");
        let missing = dir.path().join("gone.txt");

        let mut builder = HashIndexBuilder::new();
        let files = vec![missing, binary, latin1, good.clone()];
        let (index, report) = index_files(&mut builder, &files, &IndexConfig::default()).unwrap();

        assert_eq!(report.files_indexed, 1);
        let kinds: Vec<_> = report.warnings.iter().map(|w| w.kind).collect();
        assert_eq!(
            kinds,
            vec![WarningKind::Io, WarningKind::Binary, WarningKind::InvalidUtf8]
        );

        let cat = index.find("cat");
        assert_eq!(cat.count(), 1);
        assert_eq!(&*cat.occurrences()[0].file, good.as_path());
    }

    #[test]
    fn test_size_limit() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "big.txt", b"one two three four");
        let config = IndexConfig {
            max_file_size: 4,
            ..IndexConfig::default()
        };

        let mut builder = HashIndexBuilder::new();
        let (index, report) = index_files(&mut builder, &[path], &config).unwrap();
        assert_eq!(index.word_count(), 0);
        assert_eq!(report.warnings[0].kind, WarningKind::TooLarge);
    }

    #[test]
    fn test_byte_order_mark_is_dropped() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bom.txt", b"\xef\xbb\xbfcat dog\ncat\n");

        let mut builder = HashIndexBuilder::new();
        let (index, _) = index_files(&mut builder, &[path], &IndexConfig::default()).unwrap();

        let positions: Vec<_> = index.find("cat").iter().map(|o| (o.line, o.position)).collect();
        assert_eq!(positions, vec![(1, 1), (2, 1)]);
        assert_eq!(index.find("\u{feff}cat").count(), 0);
    }

    #[test]
    fn test_numbering_limit() {
        assert!(numbering_fits("a\nb", 3));
        assert!(numbering_fits("aaaa bb", 2));
        assert!(!numbering_fits("a\nb\nc", 2));
        assert!(!numbering_fits("a b c", 2));
        assert!(numbering_fits("", 0));
    }

    #[cfg(unix)]
    #[test]
    fn test_access_denied_file_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let locked = write(&dir, "locked.txt", b"secret cat");
        let open = write(&dir, "open.txt", b"cat");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores permission bits
        if fs::read(&locked).is_ok() {
            return;
        }

        let mut builder = HashIndexBuilder::new();
        let files = vec![locked.clone(), open];
        let (index, report) = index_files(&mut builder, &files, &IndexConfig::default()).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

        assert_eq!(report.files_indexed, 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].kind, WarningKind::AccessDenied);
        assert_eq!(index.find("cat").count(), 1);
        assert_eq!(index.find("secret").count(), 0);
    }

    #[test]
    fn test_spent_builder_is_rejected() {
        let mut builder = HashIndexBuilder::new();
        builder.build().unwrap();

        let result = index_files(&mut builder, &[], &IndexConfig::default());
        assert!(matches!(result, Err(Error::InvalidState(_))));
    }
}
