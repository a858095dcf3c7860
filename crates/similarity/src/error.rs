//! Error types for the similarity crate.

use crate::facet::Facet;
use thiserror::Error;

/// Errors raised while loading or validating similarity matrices
#[derive(Error, Debug)]
pub enum SimilarityError {
    /// Facet file is missing or corrupt. Callers skip the facet.
    #[error("Failed to load facet '{facet}': {reason}")]
    FacetLoad { facet: Facet, reason: String },

    /// Matrix shape does not match the catalog. Detected at load time.
    #[error("Facet '{facet}' is {rows}x{cols} but the catalog holds {expected} movies")]
    DimensionMismatch {
        facet: Facet,
        expected: usize,
        rows: usize,
        cols: usize,
    },

    /// Matrix contents violate the score invariants
    #[error("Malformed similarity matrix: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, SimilarityError>;
