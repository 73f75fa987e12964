//! Error types for wiki editing
//!
//! Scanning and classification never fail on content; only I/O and an
//! unusable clock offset can. Every variant here aborts the edit before the
//! original file is touched.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scanning, rebuilding or replacing a wiki document
#[derive(Error, Debug)]
pub enum TiddlerError {
    /// Reading from the input stream failed (includes invalid UTF-8)
    #[error("failed to read wiki input: {0}")]
    Read(#[source] std::io::Error),

    /// Writing to the output sink failed
    #[error("failed to write wiki output: {0}")]
    Write(#[source] std::io::Error),

    /// File-level I/O error with path information
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file being accessed
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },

    /// The atomic replace of the destination failed
    #[error("failed to replace {path}: {source}")]
    Persist {
        /// The destination that could not be replaced
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },

    /// The duplicate-title prompt could not be shown or answered
    #[error("duplicate prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    /// A path could not be used as a document or image location
    #[error("invalid path {path}: {reason}")]
    InvalidPath {
        /// The offending path
        path: PathBuf,
        /// Why it was rejected
        reason: String,
    },

    /// Shifting the clock by this many hours leaves the representable range
    #[error("UTC offset of {hours} hours is out of range")]
    InvalidOffset {
        /// The requested offset
        hours: i64,
    },
}

impl TiddlerError {
    /// Attach a path to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TiddlerError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for wiki editing operations
pub type Result<T> = std::result::Result<T, TiddlerError>;
