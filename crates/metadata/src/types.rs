//! Display records assembled from raw API payloads.

use crate::api::PersonId;
use catalog::MovieId;
use serde::Serialize;

/// Placeholder for absent text fields
pub const NOT_AVAILABLE: &str = "N/A";

/// Fixed-shape movie detail record.
///
/// Every field is always present; missing source data becomes `"N/A"`,
/// zero, an empty list, or the placeholder image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetail {
    pub movie_id: MovieId,
    pub title: String,
    pub poster_url: String,
    pub budget: u64,
    pub genres: Vec<String>,
    pub overview: String,
    pub release_date: String,
    pub revenue: u64,
    /// Minutes
    pub runtime: u32,
    pub tagline: String,
    pub vote_average: f64,
    pub vote_count: u64,
    pub directors: Vec<String>,
    pub languages: Vec<String>,
    /// In billing order
    pub cast_ids: Vec<PersonId>,
}

/// Image and biography of one cast member
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonDetail {
    pub person_id: PersonId,
    pub name: String,
    pub image_url: String,
    pub biography: String,
}

/// How images and placeholders are rendered
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblerConfig {
    /// Prefix joined onto API image paths
    pub image_base_url: String,
    /// Used for every missing or failed image
    pub placeholder_image_url: String,
    /// Used for every missing or failed biography
    pub placeholder_biography: String,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            placeholder_image_url: "https://via.placeholder.com/500x750?text=No+Image"
                .to_string(),
            placeholder_biography: "Biography not available.".to_string(),
        }
    }
}

impl AssemblerConfig {
    /// Full image URL for an API path such as `/kqjL17yufvn9OVLyXYpvtyrFfak.jpg`
    pub fn image_url(&self, path: Option<&str>) -> String {
        match path.map(str::trim).filter(|p| !p.is_empty()) {
            Some(path) if path.starts_with("http://") || path.starts_with("https://") => {
                path.to_string()
            }
            Some(path) => format!(
                "{}/{}",
                self.image_base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            None => self.placeholder_image_url.clone(),
        }
    }
}
