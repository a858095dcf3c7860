//! # Similarity Crate
//!
//! Holds the precomputed pairwise-similarity matrices, one per facet
//! (tags, genres, production companies, keywords, cast). Rows and columns
//! are catalog positions.
//!
//! ## Components
//!
//! - **facet**: the `Facet` enum, file names and display captions
//! - **matrix**: `SimilarityMatrix`, a validated row-major score table
//! - **source**: the `FacetSource` trait with file-backed and in-memory sources
//! - **index**: `SimilarityIndex`, loads each facet once and shares it read-only
//!
//! ## Example Usage
//!
//! ```ignore
//! use similarity::{Facet, FileFacetSource, SimilarityIndex};
//!
//! let index = SimilarityIndex::for_catalog(FileFacetSource::new("data/facets"), &catalog);
//! let genres = index.load_facet(Facet::Genres)?;
//! let row = genres.row(42).unwrap();
//! ```
//!
//! A facet whose file is missing or corrupt yields `SimilarityError::FacetLoad`;
//! callers skip that facet instead of failing the whole request.

pub mod error;
pub mod facet;
pub mod matrix;
pub mod source;
pub mod index;

pub use error::{Result, SimilarityError};
pub use facet::Facet;
pub use index::SimilarityIndex;
pub use matrix::SimilarityMatrix;
pub use source::{FacetSource, FileFacetSource, InMemoryFacetSource};
