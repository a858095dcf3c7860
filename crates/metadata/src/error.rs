//! Errors for metadata lookups.

use catalog::MovieId;
use thiserror::Error;

/// Failures of the external metadata API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Invalid response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}

/// Failures of a movie detail lookup.
///
/// Per-person and per-poster failures never appear here: they are replaced
/// by placeholders.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// The title does not resolve to a catalog id
    #[error("No catalog entry for title '{0}'")]
    DetailNotFound(String),

    /// The detail request itself failed
    #[error("Failed to fetch details for movie {movie_id}: {source}")]
    Fetch {
        movie_id: MovieId,
        #[source]
        source: ApiError,
    },
}

pub type Result<T> = std::result::Result<T, MetadataError>;
