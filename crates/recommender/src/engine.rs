//! Similarity ranking.
//!
//! Given a title and one facet's matrix, ranks every other catalog movie
//! by its score in the query movie's row.
//!
//! ## Algorithm
//! 1. Resolve the title to a catalog position (exact match only)
//! 2. Read that row of the matrix
//! 3. Stable sort by descending score, so equal scores keep catalog order
//! 4. Keep the top `k`
//!
//! The output depends only on the catalog, the matrix and the title, so
//! repeated calls are identical.

use crate::error::{RecommendError, Result};
use crate::types::ScoredMovie;
use catalog::{Catalog, Movie};
use similarity::{Facet, SimilarityMatrix};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Smallest candidate pool fetched for a dedup round
pub const MIN_CANDIDATE_POOL: usize = 10;

/// Number of ranked candidates to fetch so that `n` unseen titles survive
/// deduplication against every facet visited earlier in the round.
pub fn candidate_pool(n: usize) -> usize {
    MIN_CANDIDATE_POOL.max(n.saturating_mul(Facet::COUNT + 1))
}

/// Ranks catalog movies against a similarity matrix
#[derive(Clone)]
pub struct RecommendationEngine {
    /// Shared, read-only catalog
    catalog: Arc<Catalog>,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Resolve an exact catalog title
    pub fn resolve(&self, title: &str) -> Result<&Movie> {
        self.catalog
            .find_by_title(title)
            .ok_or_else(|| RecommendError::UnknownTitle(title.to_string()))
    }

    /// Top `k` movies most similar to `title`, best first.
    ///
    /// The query movie itself is never returned.
    #[instrument(skip(self, matrix))]
    pub fn candidates(
        &self,
        title: &str,
        matrix: &SimilarityMatrix,
        k: usize,
    ) -> Result<Vec<ScoredMovie>> {
        let query = self.resolve(title)?;
        self.check_shape(matrix)?;

        let row = matrix
            .row(query.position)
            .ok_or(RecommendError::MatrixShape {
                expected: self.catalog.len(),
                rows: matrix.rows(),
                cols: matrix.cols(),
            })?;

        let mut ranked: Vec<(usize, f32)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|&(position, _)| position != query.position)
            .collect();

        // sort_by is stable: equal scores stay in catalog order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(k);

        let candidates: Vec<ScoredMovie> = ranked
            .into_iter()
            .filter_map(|(position, score)| {
                self.catalog
                    .get(position)
                    .map(|movie| ScoredMovie::new(movie, score))
            })
            .collect();

        debug!(
            "Ranked {} candidates for '{}' (position {})",
            candidates.len(),
            title,
            query.position
        );
        Ok(candidates)
    }

    /// The `n` movies most similar to `title`, best first
    pub fn recommend(
        &self,
        title: &str,
        matrix: &SimilarityMatrix,
        n: usize,
    ) -> Result<Vec<ScoredMovie>> {
        self.candidates(title, matrix, n)
    }

    fn check_shape(&self, matrix: &SimilarityMatrix) -> Result<()> {
        let expected = self.catalog.len();
        if matrix.rows() != expected || matrix.cols() != expected {
            return Err(RecommendError::MatrixShape {
                expected,
                rows: matrix.rows(),
                cols: matrix.cols(),
            });
        }
        Ok(())
    }
}
