use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory populated with `(relative path, content)` pairs
pub fn fixture(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture dir");
        }
        fs::write(&path, content).expect("Failed to write fixture");
    }
    dir
}

/// Absolute path of a fixture file, as the collector reports it
#[allow(dead_code)]
pub fn abs(dir: &TempDir, name: &str) -> PathBuf {
    std::path::absolute(dir.path().join(name)).unwrap()
}

#[allow(dead_code)]
pub fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().to_string()
}
