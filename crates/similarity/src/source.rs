//! Where similarity matrices come from.
//!
//! `FacetSource` is the seam between the index and its storage: the
//! application reads matrix files, tests hand in small synthetic matrices.

use crate::error::{Result, SimilarityError};
use crate::facet::Facet;
use crate::matrix::SimilarityMatrix;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Capability to produce the matrix of one facet.
///
/// Implementations report every failure as `SimilarityError::FacetLoad`
/// so callers can skip the facet without inspecting the cause.
pub trait FacetSource: Send + Sync {
    fn load(&self, facet: Facet) -> Result<SimilarityMatrix>;
}

/// Reads `similarity_<facet>.bin` files from a directory
#[derive(Debug, Clone)]
pub struct FileFacetSource {
    dir: PathBuf,
}

impl FileFacetSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the matrix file for a facet
    pub fn path_for(&self, facet: Facet) -> PathBuf {
        self.dir.join(facet.file_name())
    }
}

impl FacetSource for FileFacetSource {
    fn load(&self, facet: Facet) -> Result<SimilarityMatrix> {
        let path = self.path_for(facet);
        debug!("Reading facet '{}' from {:?}", facet, path);

        SimilarityMatrix::read_from_file(&path).map_err(|e| SimilarityError::FacetLoad {
            facet,
            reason: format!("{}: {}", path.display(), e),
        })
    }
}

/// Serves matrices held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryFacetSource {
    matrices: HashMap<Facet, SimilarityMatrix>,
}

impl InMemoryFacetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the matrix for a facet (builder pattern)
    pub fn with_facet(mut self, facet: Facet, matrix: SimilarityMatrix) -> Self {
        self.matrices.insert(facet, matrix);
        self
    }
}

impl FacetSource for InMemoryFacetSource {
    fn load(&self, facet: Facet) -> Result<SimilarityMatrix> {
        self.matrices
            .get(&facet)
            .cloned()
            .ok_or_else(|| SimilarityError::FacetLoad {
                facet,
                reason: "no matrix registered".to_string(),
            })
    }
}
