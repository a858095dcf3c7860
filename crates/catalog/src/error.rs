//! Error types for the catalog crate.
//!
//! Every variant here is fatal at startup: a catalog that cannot be
//! loaded leaves the similarity matrices without an index space.

use thiserror::Error;

/// Errors that can occur while loading the catalog tables
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Backing file is absent
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in a catalog file couldn't be parsed
    ///
    /// `line` is 1-based so it matches what an editor shows.
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// The parsed tables are unusable as a whole (empty, duplicate ids)
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
