//! Service layer for the movie recommender.
//!
//! This crate wires the catalog, similarity index, ranking engine and
//! metadata assembler into the operations a user interface calls.

pub mod config;
pub mod favorites;
pub mod orchestrator;

pub use config::{AppConfig, DEFAULT_PAGE_SIZE, DEFAULT_RECOMMENDATION_COUNT};
pub use favorites::{FavoritesStore, InMemoryFavorites};
pub use orchestrator::{BrowsePage, BrowseTile, FacetRecommendations, RecommenderService};
