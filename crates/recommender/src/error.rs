//! Errors raised while ranking recommendations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    /// Title is not an exact catalog title. Surfaced to the user, never retried.
    #[error("Unknown title: '{0}'")]
    UnknownTitle(String),

    /// The matrix handed to the engine was not built for this catalog
    #[error("Similarity matrix is {rows}x{cols} but the catalog holds {expected} movies")]
    MatrixShape {
        expected: usize,
        rows: usize,
        cols: usize,
    },
}

pub type Result<T> = std::result::Result<T, RecommendError>;
