//! Memoizing facet index.
//!
//! Each facet's matrix is loaded at most once per process and then shared
//! read-only. A load that fails is not cached, so a repaired file is
//! picked up by a later request.

use crate::error::{Result, SimilarityError};
use crate::facet::Facet;
use crate::matrix::SimilarityMatrix;
use crate::source::FacetSource;
use catalog::Catalog;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};

/// Lazily loaded similarity matrices, one slot per facet
pub struct SimilarityIndex {
    source: Box<dyn FacetSource>,
    /// Number of catalog movies; every matrix must be this size in both dimensions
    expected_dim: usize,
    slots: [OnceCell<Arc<SimilarityMatrix>>; Facet::COUNT],
}

impl SimilarityIndex {
    /// Create an index whose matrices must be `expected_dim x expected_dim`
    pub fn new(source: impl FacetSource + 'static, expected_dim: usize) -> Self {
        Self {
            source: Box::new(source),
            expected_dim,
            slots: Default::default(),
        }
    }

    /// Create an index sized for a catalog
    pub fn for_catalog(source: impl FacetSource + 'static, catalog: &Catalog) -> Self {
        Self::new(source, catalog.len())
    }

    pub fn expected_dim(&self) -> usize {
        self.expected_dim
    }

    /// Return the facet's matrix, loading and validating it on first use.
    ///
    /// Fails with `FacetLoad` when the source cannot produce the matrix and
    /// with `DimensionMismatch` when its shape differs from the catalog.
    #[instrument(skip(self))]
    pub fn load_facet(&self, facet: Facet) -> Result<Arc<SimilarityMatrix>> {
        self.slots[facet.index()]
            .get_or_try_init(|| {
                let start = Instant::now();
                let matrix = self.source.load(facet)?;
                self.check_dimensions(facet, &matrix)?;

                info!(
                    "Loaded facet '{}' ({}x{}) in {:.2?}",
                    facet,
                    matrix.rows(),
                    matrix.cols(),
                    start.elapsed()
                );
                Ok(Arc::new(matrix))
            })
            .cloned()
    }

    /// Whether the facet is already cached
    pub fn is_loaded(&self, facet: Facet) -> bool {
        self.slots[facet.index()].get().is_some()
    }

    /// Facets currently cached, in `Facet::ALL` order
    pub fn loaded_facets(&self) -> Vec<Facet> {
        Facet::ALL
            .into_iter()
            .filter(|&facet| self.is_loaded(facet))
            .collect()
    }

    fn check_dimensions(&self, facet: Facet, matrix: &SimilarityMatrix) -> Result<()> {
        if matrix.rows() != self.expected_dim || matrix.cols() != self.expected_dim {
            return Err(SimilarityError::DimensionMismatch {
                facet,
                expected: self.expected_dim,
                rows: matrix.rows(),
                cols: matrix.cols(),
            });
        }
        Ok(())
    }
}
