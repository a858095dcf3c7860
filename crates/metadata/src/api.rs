//! The external metadata API boundary.
//!
//! Payload structs mirror what the API sends, with every field optional:
//! the assembler decides defaults, the transport never rejects a record
//! for missing data.

use crate::error::ApiError;
use async_trait::async_trait;
use catalog::MovieId;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// Identifier of a person (cast or crew) in the external catalog
pub type PersonId = u32;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NamedItem {
    pub id: Option<u64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpokenLanguage {
    pub iso_639_1: Option<String>,
    pub english_name: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CastMember {
    pub id: Option<PersonId>,
    pub name: Option<String>,
    pub character: Option<String>,
    /// Billing order, 0 = top billed
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CrewMember {
    pub id: Option<PersonId>,
    pub name: Option<String>,
    pub job: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawCredits {
    pub cast: Option<Vec<CastMember>>,
    pub crew: Option<Vec<CrewMember>>,
}

/// Movie detail payload, credits appended
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawMovieDetails {
    pub id: Option<MovieId>,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub budget: Option<u64>,
    pub genres: Option<Vec<NamedItem>>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub revenue: Option<u64>,
    pub runtime: Option<u32>,
    pub tagline: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub spoken_languages: Option<Vec<SpokenLanguage>>,
    pub credits: Option<RawCredits>,
}

/// Person payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawPerson {
    pub id: Option<PersonId>,
    pub name: Option<String>,
    pub profile_path: Option<String>,
    pub biography: Option<String>,
}

/// Black-box lookups against the external metadata catalog.
///
/// Each call is independent; no call is retried.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Full detail record of a movie, including credits
    async fn movie_details(&self, movie_id: MovieId) -> Result<RawMovieDetails, ApiError>;

    /// Name, image and biography of a person
    async fn person(&self, person_id: PersonId) -> Result<RawPerson, ApiError>;

    /// Poster image path of a movie, `None` when it has no poster
    async fn poster_path(&self, movie_id: MovieId) -> Result<Option<String>, ApiError>;

    /// Name for logging
    fn name(&self) -> &str;
}

/// Serves canned payloads from memory.
///
/// Lookups of unknown ids fail with status 404; ids marked as failing fail
/// with status 500. Used offline and in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogApi {
    movies: HashMap<MovieId, RawMovieDetails>,
    people: HashMap<PersonId, RawPerson>,
    failing_movies: HashSet<MovieId>,
    failing_people: HashSet<PersonId>,
}

impl InMemoryCatalogApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movie(mut self, movie_id: MovieId, details: RawMovieDetails) -> Self {
        self.movies.insert(movie_id, details);
        self
    }

    pub fn with_person(mut self, person_id: PersonId, person: RawPerson) -> Self {
        self.people.insert(person_id, person);
        self
    }

    /// Make every lookup of this movie fail
    pub fn with_failing_movie(mut self, movie_id: MovieId) -> Self {
        self.failing_movies.insert(movie_id);
        self
    }

    /// Make every lookup of this person fail
    pub fn with_failing_person(mut self, person_id: PersonId) -> Self {
        self.failing_people.insert(person_id);
        self
    }

    fn movie(&self, endpoint: String, movie_id: MovieId) -> Result<RawMovieDetails, ApiError> {
        if self.failing_movies.contains(&movie_id) {
            return Err(ApiError::Status { endpoint, status: 500 });
        }
        self.movies
            .get(&movie_id)
            .cloned()
            .ok_or(ApiError::Status { endpoint, status: 404 })
    }
}

#[async_trait]
impl CatalogApi for InMemoryCatalogApi {
    async fn movie_details(&self, movie_id: MovieId) -> Result<RawMovieDetails, ApiError> {
        self.movie(format!("movie/{}", movie_id), movie_id)
    }

    async fn person(&self, person_id: PersonId) -> Result<RawPerson, ApiError> {
        let endpoint = format!("person/{}", person_id);
        if self.failing_people.contains(&person_id) {
            return Err(ApiError::Status { endpoint, status: 500 });
        }
        self.people
            .get(&person_id)
            .cloned()
            .ok_or(ApiError::Status { endpoint, status: 404 })
    }

    async fn poster_path(&self, movie_id: MovieId) -> Result<Option<String>, ApiError> {
        Ok(self.movie(format!("movie/{}", movie_id), movie_id)?.poster_path)
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_tolerates_missing_and_null_fields() {
        let raw: RawMovieDetails = serde_json::from_value(serde_json::json!({
            "id": 19995,
            "title": "Avatar",
            "budget": null,
            "genres": [{"id": 28, "name": "Action"}, {"id": 12}],
            "credits": {"cast": [{"id": 65731, "order": 0}]}
        }))
        .unwrap();

        assert_eq!(raw.id, Some(19995));
        assert_eq!(raw.budget, None);
        assert_eq!(raw.revenue, None);
        assert_eq!(raw.genres.as_ref().map(Vec::len), Some(2));
        assert_eq!(raw.genres.unwrap()[1].name, None);
        assert!(raw.credits.unwrap().crew.is_none());
    }

    #[test]
    fn test_person_payload_ignores_unknown_fields() {
        let raw: RawPerson = serde_json::from_value(serde_json::json!({
            "id": 65731,
            "name": "Sam Worthington",
            "known_for_department": "Acting",
            "popularity": 12.5
        }))
        .unwrap();

        assert_eq!(raw.name.as_deref(), Some("Sam Worthington"));
        assert_eq!(raw.biography, None);
    }

    #[tokio::test]
    async fn test_in_memory_api_reports_missing_and_failing_ids() {
        let api = InMemoryCatalogApi::new()
            .with_movie(1, RawMovieDetails::default())
            .with_failing_person(7);

        assert!(api.movie_details(1).await.is_ok());
        assert!(matches!(
            api.movie_details(2).await,
            Err(ApiError::Status { status: 404, .. })
        ));
        assert!(matches!(
            api.person(7).await,
            Err(ApiError::Status { status: 500, .. })
        ));
        assert_eq!(api.poster_path(1).await.unwrap(), None);
    }
}
