//! HTTP client for The Movie Database (TMDB) v3 API.
//!
//! API Flow:
//! 1. Movie details: /movie/{id}?append_to_response=credits
//! 2. Person: /person/{id}
//! 3. Poster: /movie/{id}, reading only `poster_path`
//!
//! The API key travels as the `api_key` query parameter.

use crate::api::{CatalogApi, PersonId, RawMovieDetails, RawPerson};
use crate::error::ApiError;
use async_trait::async_trait;
use catalog::MovieId;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default TMDB API root
pub const DEFAULT_API_URL: &str = "https://api.themoviedb.org/3";

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_url: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    /// Create a client with a per-request timeout
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            language: "en-US".to_string(),
        })
    }

    /// Response language (default: en-US)
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        extra_query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .query(extra_query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| ApiError::Decode {
            endpoint: path.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl CatalogApi for TmdbClient {
    async fn movie_details(&self, movie_id: MovieId) -> Result<RawMovieDetails, ApiError> {
        self.get_json(
            &format!("movie/{}", movie_id),
            &[("append_to_response", "credits")],
        )
        .await
    }

    async fn person(&self, person_id: PersonId) -> Result<RawPerson, ApiError> {
        self.get_json(&format!("person/{}", person_id), &[]).await
    }

    async fn poster_path(&self, movie_id: MovieId) -> Result<Option<String>, ApiError> {
        #[derive(Deserialize)]
        struct PosterOnly {
            #[serde(default)]
            poster_path: Option<String>,
        }

        let poster: PosterOnly = self.get_json(&format!("movie/{}", movie_id), &[]).await?;
        Ok(poster.poster_path)
    }

    fn name(&self) -> &str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = TmdbClient::new("https://api.example.test/3/", "key", Duration::from_secs(1))
            .unwrap();

        assert_eq!(client.api_url(), "https://api.example.test/3");
        assert_eq!(client.endpoint("movie/19995"), "https://api.example.test/3/movie/19995");
    }
}
