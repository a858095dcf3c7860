//! Catalog loading and validation.
//!
//! Builds a `Catalog` from the two data files and checks the invariants
//! the similarity matrices depend on.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// File holding the canonical movie table
pub const MOVIES_FILE: &str = "movies.dat";

/// File holding the browse table
pub const BROWSE_FILE: &str = "browse.dat";

impl Catalog {
    /// Load the catalog from a directory containing `movies.dat` and `browse.dat`.
    ///
    /// Steps:
    /// 1. Parse both files in parallel
    /// 2. Build the movie table and title index
    /// 3. Validate
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading catalog from {:?}", data_dir);

        let movies_path = data_dir.join(MOVIES_FILE);
        let browse_path = data_dir.join(BROWSE_FILE);

        let (movies, browse) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_browse(&browse_path),
        );
        let movies = movies?;
        let browse = browse?;

        info!(
            "Loaded {} movies and {} browse entries",
            movies.len(),
            browse.len()
        );

        let catalog = Catalog::from_tables(movies, browse);
        catalog.validate()?;

        Ok(catalog)
    }

    /// Validate catalog integrity
    ///
    /// Checks that:
    /// - the movie table is not empty
    /// - movie ids are unique within the movie table
    ///
    /// Duplicate titles are tolerated; they resolve to the first occurrence.
    pub fn validate(&self) -> Result<()> {
        if self.movies.is_empty() {
            return Err(DataLoadError::ValidationError(
                "movie table is empty".to_string(),
            ));
        }

        let mut seen_ids = HashSet::with_capacity(self.movies.len());
        for movie in &self.movies {
            if !seen_ids.insert(movie.id) {
                return Err(DataLoadError::ValidationError(format!(
                    "duplicate movie id {} at position {}",
                    movie.id, movie.position
                )));
            }
        }

        let shadowed = self.movies.len() - self.title_index.len();
        if shadowed > 0 {
            warn!(
                "{} movie titles are duplicated; lookups resolve to the first occurrence",
                shadowed
            );
        }

        Ok(())
    }
}
