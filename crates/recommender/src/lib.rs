//! Similarity-based recommendation and per-round deduplication.
//!
//! This crate provides:
//! - RecommendationEngine, which ranks catalog movies against one facet's matrix
//! - SessionSeenSet and filter_and_take, which keep one round free of repeats
//!
//! ## Architecture
//! A recommendation round processes each facet in stages:
//! 1. The engine ranks a candidate pool larger than the requested count
//! 2. The session filter drops titles already shown this round and keeps `n`
//! 3. The caller attaches posters to the survivors
//!
//! ## Example Usage
//! ```ignore
//! use recommender::{candidate_pool, filter_and_take, RecommendationEngine, SessionSeenSet};
//!
//! let engine = RecommendationEngine::new(catalog.clone());
//! let mut seen = SessionSeenSet::new();
//!
//! for facet in Facet::ALL {
//!     let matrix = index.load_facet(facet)?;
//!     let ranked = engine.candidates("Avatar", &matrix, candidate_pool(5))?;
//!     let shown = filter_and_take(ranked, &mut seen, 5);
//! }
//! ```

pub mod error;
pub mod types;
pub mod engine;
pub mod session;

// Re-export main types
pub use engine::{candidate_pool, RecommendationEngine, MIN_CANDIDATE_POOL};
pub use error::{RecommendError, Result};
pub use session::{filter_and_take, SessionSeenSet};
pub use types::{Recommendation, RecommendationResult, ScoredMovie, Titled};
