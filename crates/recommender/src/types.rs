//! Ranked candidates and the recommendation entries built from them.

use catalog::{BrowseEntry, Movie, MovieId, Position};

/// A catalog movie with its similarity to the query movie
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMovie {
    pub position: Position,
    pub id: MovieId,
    pub title: String,
    pub score: f32,
}

impl ScoredMovie {
    pub fn new(movie: &Movie, score: f32) -> Self {
        Self {
            position: movie.position,
            id: movie.id,
            title: movie.title.clone(),
            score,
        }
    }
}

/// One entry shown to the user: a ranked movie and its poster
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub movie: ScoredMovie,
    pub poster_url: String,
}

/// Ordered by descending score; ties keep catalog order
pub type RecommendationResult = Vec<Recommendation>;

/// Anything the session filter can deduplicate by title
pub trait Titled {
    fn title(&self) -> &str;
}

impl Titled for ScoredMovie {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Titled for Recommendation {
    fn title(&self) -> &str {
        &self.movie.title
    }
}

impl Titled for Movie {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Titled for BrowseEntry {
    fn title(&self) -> &str {
        &self.title
    }
}
