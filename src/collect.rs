//! File discovery.
//!
//! Walks a root path and returns every regular file beneath it exactly once.
//! Within a directory, files come before subdirectories and both are sorted
//! by name; subdirectories are then walked depth first. The walk uses an
//! explicit stack, so deep trees do not grow the call stack.

use crate::error::{Error, Result, Warning};
use ahash::AHashSet;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Files found under a root, plus the paths that had to be skipped
#[derive(Debug, Clone, Default, Serialize)]
pub struct Collection {
    pub files: Vec<PathBuf>,
    pub warnings: Vec<Warning>,
}

/// Collect all regular files under `path`.
///
/// `path` may name a file or a directory. A missing path is
/// [`Error::NotFound`]; unreadable entries below it are skipped and reported
/// in [`Collection::warnings`].
pub fn collect(path: &Path) -> Result<Collection> {
    let root = std::path::absolute(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let metadata = match fs::metadata(&root) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::NotFound { path: root });
        }
        Err(source) => return Err(Error::Io { path: root, source }),
    };

    let mut collector = FileCollector::default();
    if metadata.is_file() {
        collector.add_file(&root);
    } else if metadata.is_dir() {
        collector.walk(root);
    } else {
        return Err(Error::NotFound { path: root });
    }

    log::debug!(
        "collected {} files ({} skipped)",
        collector.files.len(),
        collector.warnings.len()
    );

    Ok(Collection {
        files: collector.files,
        warnings: collector.warnings,
    })
}

#[derive(Default)]
struct FileCollector {
    files: Vec<PathBuf>,
    warnings: Vec<Warning>,
    /// Canonical paths of files already collected
    seen_files: AHashSet<PathBuf>,
    /// Canonical paths of directories already walked, so link cycles end
    seen_dirs: AHashSet<PathBuf>,
}

impl FileCollector {
    fn add_file(&mut self, path: &Path) {
        match fs::canonicalize(path) {
            Ok(canonical) => {
                if self.seen_files.insert(canonical) {
                    self.files.push(path.to_path_buf());
                }
            }
            Err(e) => self.warnings.push(Warning::io(path, &e)),
        }
    }

    fn walk(&mut self, root: PathBuf) {
        let mut pending = vec![root];

        while let Some(dir) = pending.pop() {
            match fs::canonicalize(&dir) {
                Ok(canonical) => {
                    if !self.seen_dirs.insert(canonical) {
                        continue;
                    }
                }
                Err(e) => {
                    self.warnings.push(Warning::io(&dir, &e));
                    continue;
                }
            }

            let (files, subdirs) = match self.read_children(&dir) {
                Ok(children) => children,
                Err(e) => {
                    self.warnings.push(Warning::io(&dir, &e));
                    continue;
                }
            };

            for file in &files {
                self.add_file(file);
            }

            // Reversed so the first subdirectory is popped first
            pending.extend(subdirs.into_iter().rev());
        }
    }

    /// List the direct file and directory children of `dir`, each sorted by name
    fn read_children(&mut self, dir: &Path) -> io::Result<(Vec<PathBuf>, Vec<PathBuf>)> {
        let mut files = Vec::new();
        let mut subdirs = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    self.warnings.push(Warning::io(dir, &e));
                    continue;
                }
            };
            let path = entry.path();

            // Follows symlinks
            match fs::metadata(&path) {
                Ok(m) if m.is_file() => files.push(path),
                Ok(m) if m.is_dir() => subdirs.push(path),
                Ok(_) => log::debug!("ignoring special file {}", path.display()),
                Err(e) => self.warnings.push(Warning::io(&path, &e)),
            }
        }

        files.sort_unstable_by(|a, b| a.file_name().cmp(&b.file_name()));
        subdirs.sort_unstable_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok((files, subdirs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(collection: &Collection, root: &Path) -> Vec<String> {
        collection
            .files
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_files_before_subdirectories() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a/nested")).unwrap();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::write(root.join("z.txt"), "z").unwrap();
        fs::write(root.join("m.txt"), "m").unwrap();
        fs::write(root.join("a/inner.txt"), "i").unwrap();
        fs::write(root.join("a/nested/deep.txt"), "d").unwrap();
        fs::write(root.join("b/other.txt"), "o").unwrap();

        let collection = collect(root).unwrap();
        let root = std::path::absolute(root).unwrap();
        assert_eq!(
            names(&collection, &root),
            vec!["m.txt", "z.txt", "a/inner.txt", "a/nested/deep.txt", "b/other.txt"]
        );
        assert!(collection.warnings.is_empty());
    }

    #[test]
    fn test_single_file_root() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("only.txt");
        fs::write(&file, "x").unwrap();

        let collection = collect(&file).unwrap();
        assert_eq!(collection.files.len(), 1);
        assert!(collection.files[0].ends_with("only.txt"));
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let collection = collect(dir.path()).unwrap();
        assert!(collection.files.is_empty());
    }

    #[test]
    fn test_missing_root_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = collect(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_relative_spellings_are_absolute() {
        let collection = collect(Path::new("src/./lib.rs")).unwrap();
        assert_eq!(collection.files.len(), 1);
        assert!(collection.files[0].is_absolute());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_deduplicated() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("data")).unwrap();
        fs::write(root.join("data/words.txt"), "cat").unwrap();
        symlink(root.join("data/words.txt"), root.join("alias.txt")).unwrap();
        // Cycle back to the root
        symlink(root, root.join("data/loop")).unwrap();

        let collection = collect(root).unwrap();
        let root = std::path::absolute(root).unwrap();
        assert_eq!(names(&collection, &root), vec!["alias.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_is_skipped() {
        use crate::error::WarningKind;
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("locked")).unwrap();
        fs::create_dir(root.join("open")).unwrap();
        fs::write(root.join("locked/hidden.txt"), "cat").unwrap();
        fs::write(root.join("open/visible.txt"), "cat").unwrap();
        fs::write(root.join("top.txt"), "cat").unwrap();
        fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores permission bits
        let readable = fs::read_dir(root.join("locked")).is_ok();
        let collection = collect(root);
        fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }

        let collection = collection.unwrap();
        let root = std::path::absolute(root).unwrap();
        assert_eq!(names(&collection, &root), vec!["top.txt", "open/visible.txt"]);
        assert_eq!(collection.warnings.len(), 1);
        assert_eq!(collection.warnings[0].kind, WarningKind::AccessDenied);
        assert!(collection.warnings[0].path.ends_with("locked"));
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_is_a_warning() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("real.txt"), "cat").unwrap();
        symlink(dir.path().join("nowhere"), dir.path().join("dangling.txt")).unwrap();

        let collection = collect(dir.path()).unwrap();
        assert_eq!(collection.files.len(), 1);
        assert_eq!(collection.warnings.len(), 1);
        assert!(collection.warnings[0].path.ends_with("dangling.txt"));
    }
}
