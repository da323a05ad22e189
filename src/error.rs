use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// An I/O failure met while walking, or a bad filter pattern.
///
/// Traversal errors are never returned by the walk itself. They are handed to
/// the visitor, which decides whether to abort, prune, or carry on.
#[derive(Error, Debug)]
pub enum WalkError {
    // Traversal
    #[error("failed to stat '{}': {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read directory '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // Config
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl WalkError {
    pub(crate) fn stat(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Stat { path: path.into(), source }
    }

    pub(crate) fn read_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReadDir { path: path.into(), source }
    }

    /// The path this error occurred at, if applicable.
    /// Callers use this to present "Skipped: <path>" without pattern matching on variants.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stat { path, .. } | Self::ReadDir { path, .. } => Some(path),
            Self::InvalidPattern { .. } => None,
        }
    }

    /// The underlying I/O error, for traversal failures.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Stat { source, .. } | Self::ReadDir { source, .. } => Some(source),
            Self::InvalidPattern { .. } => None,
        }
    }

    /// Whether the entry vanished (or never existed) before it could be read.
    ///
    /// Handy in visitors that want to tolerate files deleted mid-walk.
    pub fn is_not_found(&self) -> bool {
        self.io_error()
            .map(|e| e.kind() == io::ErrorKind::NotFound)
            .unwrap_or(false)
    }

    /// Whether this is a listing failure on a directory that was itself
    /// stat'd successfully.
    pub fn is_read_dir(&self) -> bool {
        matches!(self, Self::ReadDir { .. })
    }
}
