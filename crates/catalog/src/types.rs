//! Core domain types for the movie catalog.
//!
//! The catalog holds two ordered tables:
//! - the movie table, whose row order is the index space of every
//!   similarity matrix
//! - the browse table, a secondary listing used for the paged poster grid

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a movie in the external metadata catalog
pub type MovieId = u32;

/// Row index of a movie within the loaded movie table
pub type Position = usize;

// =============================================================================
// Movie-related Types
// =============================================================================

/// A movie as recorded in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Row index into the catalog, stable for the process lifetime
    pub position: Position,
    /// Flattened descriptive attributes (overview, genres, keywords, cast, crew)
    pub tags: String,
}

/// One row of the browse table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseEntry {
    pub id: MovieId,
    pub title: String,
}

// =============================================================================
// Catalog - The In-Memory Movie Store
// =============================================================================

/// Canonical movie table plus the browse table.
///
/// Immutable once built; shared as `Arc<Catalog>` by every component
/// that needs to resolve titles or positions.
#[derive(Debug, Default)]
pub struct Catalog {
    pub(crate) movies: Vec<Movie>,
    pub(crate) browse: Vec<BrowseEntry>,

    /// Exact title -> position of its first occurrence
    pub(crate) title_index: HashMap<String, Position>,
    pub(crate) id_index: HashMap<MovieId, Position>,
}

impl Catalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from already-parsed tables.
    ///
    /// Movie positions are reassigned from the order of `movies`.
    pub fn from_tables(movies: Vec<Movie>, browse: Vec<BrowseEntry>) -> Self {
        let mut catalog = Self::new();
        for movie in movies {
            catalog.push_movie(movie.id, movie.title, movie.tags);
        }
        catalog.browse = browse;
        catalog
    }

    /// Appends a movie at the next position and returns that position
    pub fn push_movie(
        &mut self,
        id: MovieId,
        title: impl Into<String>,
        tags: impl Into<String>,
    ) -> Position {
        let position = self.movies.len();
        let title = title.into();

        self.title_index.entry(title.clone()).or_insert(position);
        self.id_index.entry(id).or_insert(position);
        self.movies.push(Movie {
            id,
            title,
            position,
            tags: tags.into(),
        });
        position
    }

    /// Appends a row to the browse table
    pub fn push_browse_entry(&mut self, id: MovieId, title: impl Into<String>) {
        self.browse.push(BrowseEntry {
            id,
            title: title.into(),
        });
    }

    /// All movies in catalog order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// All browse rows in file order
    pub fn browse_entries(&self) -> &[BrowseEntry] {
        &self.browse
    }

    /// Number of movies, which is also the required similarity matrix dimension
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Movie at a catalog position
    pub fn get(&self, position: Position) -> Option<&Movie> {
        self.movies.get(position)
    }

    /// Resolves an exact title to its position. No fuzzy matching.
    pub fn position_of(&self, title: &str) -> Option<Position> {
        self.title_index.get(title).copied()
    }

    /// Resolves an exact title to its movie
    pub fn find_by_title(&self, title: &str) -> Option<&Movie> {
        self.position_of(title).and_then(|p| self.movies.get(p))
    }

    /// Looks a movie up by its external id
    pub fn find_by_id(&self, id: MovieId) -> Option<&Movie> {
        self.id_index.get(&id).and_then(|&p| self.movies.get(p))
    }

    /// Case-insensitive substring search, exact matches first, then catalog order
    pub fn search(&self, query: &str) -> Vec<&Movie> {
        let query = query.to_lowercase();
        let mut matches: Vec<(bool, &Movie)> = self
            .movies
            .iter()
            .filter_map(|movie| {
                let title = movie.title.to_lowercase();
                if title == query {
                    Some((true, movie))
                } else if title.contains(&query) {
                    Some((false, movie))
                } else {
                    None
                }
            })
            .collect();

        // Stable: ties keep catalog order
        matches.sort_by_key(|(exact, _)| !exact);
        matches.into_iter().map(|(_, movie)| movie).collect()
    }
}
