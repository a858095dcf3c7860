//! Movie metadata from an external catalog API.
//!
//! This crate turns catalog ids into display records. It handles:
//! - The `CatalogApi` boundary and its TMDB implementation
//! - Mapping raw payloads onto fixed-shape `MovieDetail` records
//! - Concurrent per-person and per-poster fetches with isolated failures

pub mod api;
pub mod assembler;
pub mod error;
pub mod tmdb;
pub mod types;

pub use api::{CatalogApi, InMemoryCatalogApi, PersonId, RawMovieDetails, RawPerson};
pub use assembler::{map_movie_detail, MetadataAssembler, DEFAULT_CAST_LIMIT};
pub use error::{ApiError, MetadataError, Result};
pub use tmdb::{TmdbClient, DEFAULT_API_URL};
pub use types::{AssemblerConfig, MovieDetail, PersonDetail, NOT_AVAILABLE};
