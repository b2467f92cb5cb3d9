//! Error and warning types.
//!
//! Only two conditions are hard errors for a caller: a root path that does
//! not exist, and misuse of a builder or searcher. Per-file problems hit
//! while walking or reading are collected as [`Warning`]s instead so that one
//! unreadable file never blocks indexing of the rest.

use serde::Serialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The import root is neither a file nor a directory.
    #[error("path not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A builder or searcher was used outside its contract.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a file or directory was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    AccessDenied,
    Io,
    InvalidUtf8,
    TooLarge,
    Binary,
}

impl WarningKind {
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => WarningKind::AccessDenied,
            io::ErrorKind::InvalidData => WarningKind::InvalidUtf8,
            _ => WarningKind::Io,
        }
    }
}

/// A recoverable problem with a single path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub path: PathBuf,
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(path: impl Into<PathBuf>, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }

    /// Build a warning from an I/O error and log it
    pub fn io(path: &Path, err: &io::Error) -> Self {
        let warning = Self::new(path, WarningKind::from_io(err), err.to_string());
        log::warn!("skipping {}: {}", path.display(), err);
        warning
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}
