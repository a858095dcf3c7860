//! # Catalog Crate
//!
//! Loads and indexes the movie catalog: the canonical movie table whose row
//! order defines the index space of every similarity matrix, and the
//! secondary browse table used for paging.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, BrowseEntry, Catalog)
//! - **parser**: Parse .dat files into Rust structs
//! - **index**: Load, index and validate the catalog
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_files(Path::new("data"))?;
//!
//! let movie = catalog.find_by_title("Avatar").unwrap();
//! println!("{} sits at position {}", movie.title, movie.position);
//! ```
//!
//! The row order must never be re-sorted after load: the precomputed
//! similarity matrices are keyed by position.

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

pub use error::{DataLoadError, Result};
pub use index::{BROWSE_FILE, MOVIES_FILE};
pub use types::{BrowseEntry, Catalog, Movie, MovieId, Position};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_creation() {
        let catalog = Catalog::new();
        assert_eq!(catalog.len(), 0);
        assert!(catalog.is_empty());
        assert!(catalog.browse_entries().is_empty());
    }

    #[test]
    fn test_push_movie_assigns_positions() {
        let mut catalog = Catalog::new();

        assert_eq!(catalog.push_movie(19995, "Avatar", ""), 0);
        assert_eq!(catalog.push_movie(155, "The Dark Knight", ""), 1);

        let retrieved = catalog.get(1).unwrap();
        assert_eq!(retrieved.id, 155);
        assert_eq!(retrieved.position, 1);
    }

    #[test]
    fn test_exact_title_lookup() {
        let mut catalog = Catalog::new();
        catalog.push_movie(155, "The Dark Knight", "");
        catalog.push_movie(49026, "The Dark Knight Rises", "");

        assert_eq!(catalog.position_of("The Dark Knight Rises"), Some(1));
        assert_eq!(catalog.position_of("the dark knight"), None);
        assert_eq!(catalog.position_of("Dark Knight"), None);
    }

    #[test]
    fn test_from_tables_reassigns_positions() {
        let movies = vec![
            Movie { id: 7, title: "B".into(), position: 42, tags: String::new() },
            Movie { id: 9, title: "A".into(), position: 3, tags: String::new() },
        ];
        let catalog = Catalog::from_tables(movies, vec![]);

        assert_eq!(catalog.get(0).unwrap().id, 7);
        assert_eq!(catalog.get(1).unwrap().position, 1);
    }

    #[test]
    fn test_search_puts_exact_match_first() {
        let mut catalog = Catalog::new();
        catalog.push_movie(1, "Batman Begins", "");
        catalog.push_movie(2, "Batman", "");
        catalog.push_movie(3, "Heat", "");
        catalog.push_movie(4, "Batman Returns", "");

        let titles: Vec<&str> = catalog
            .search("BATMAN")
            .iter()
            .map(|m| m.title.as_str())
            .collect();

        assert_eq!(titles, vec!["Batman", "Batman Begins", "Batman Returns"]);
    }

    #[test]
    fn test_empty_queries() {
        let catalog = Catalog::new();

        assert!(catalog.get(0).is_none());
        assert!(catalog.find_by_title("Avatar").is_none());
        assert!(catalog.find_by_id(19995).is_none());
        assert!(catalog.search("a").is_empty());
    }
}
