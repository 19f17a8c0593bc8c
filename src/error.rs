//! Error types for pubdiff
//!
//! Uses `thiserror` for library errors; the binary wraps them with
//! `anyhow` context at the boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pubdiff operations
pub type PubdiffResult<T> = Result<T, PubdiffError>;

/// Main error type for pubdiff operations
#[derive(Error, Debug)]
pub enum PubdiffError {
    /// Lock document that cannot be projected into a snapshot:
    /// unparseable YAML, a missing top-level `packages` mapping, or a
    /// tracked entry failing the shape check
    #[error("malformed lock document: {message}")]
    MalformedLockfile { message: String },

    /// `git show` failed for a revision/path pair
    #[error("cannot read '{path}' at revision '{revision}': {message}")]
    GitShow {
        revision: String,
        path: String,
        message: String,
    },

    /// Configuration file rejected
    #[error("invalid config {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PubdiffError {
    /// Shorthand used by the extractor's shape checks
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedLockfile {
            message: message.into(),
        }
    }
}
