//! Builds display records out of catalog ids and external API lookups.
//!
//! Detail lookups fail loudly. Person and poster lookups never fail: each
//! item is fetched in its own task and a failed item is replaced by a
//! placeholder, so one bad id never hides the others.

use crate::api::{CatalogApi, PersonId, RawMovieDetails, RawPerson};
use crate::error::{MetadataError, Result};
use crate::types::{AssemblerConfig, MovieDetail, PersonDetail, NOT_AVAILABLE};
use catalog::{Catalog, MovieId};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Default number of cast members shown with a movie
pub const DEFAULT_CAST_LIMIT: usize = 5;

#[derive(Clone)]
pub struct MetadataAssembler {
    api: Arc<dyn CatalogApi>,
    catalog: Arc<Catalog>,
    config: AssemblerConfig,
}

impl MetadataAssembler {
    pub fn new(api: Arc<dyn CatalogApi>, catalog: Arc<Catalog>, config: AssemblerConfig) -> Self {
        Self {
            api,
            catalog,
            config,
        }
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Full detail record for a catalog title
    #[instrument(skip(self), fields(api = self.api.name()))]
    pub async fn get_movie_detail(&self, title: &str) -> Result<MovieDetail> {
        let movie = self
            .catalog
            .find_by_title(title)
            .ok_or_else(|| MetadataError::DetailNotFound(title.to_string()))?;

        let raw = self
            .api
            .movie_details(movie.id)
            .await
            .map_err(|source| MetadataError::Fetch {
                movie_id: movie.id,
                source,
            })?;

        debug!("Fetched details for movie {}", movie.id);
        Ok(map_movie_detail(movie.id, &movie.title, raw, &self.config))
    }

    /// Image and biography of one person, placeholders on any failure
    pub async fn get_person_detail(&self, person_id: PersonId) -> PersonDetail {
        match self.api.person(person_id).await {
            Ok(raw) => map_person_detail(person_id, raw, &self.config),
            Err(e) => {
                warn!("Person {} unavailable: {}", person_id, e);
                self.placeholder_person(person_id)
            }
        }
    }

    /// Poster URL of one movie, placeholder on any failure
    pub async fn get_poster(&self, movie_id: MovieId) -> String {
        match self.api.poster_path(movie_id).await {
            Ok(path) => self.config.image_url(path.as_deref()),
            Err(e) => {
                warn!("Poster for movie {} unavailable: {}", movie_id, e);
                self.config.placeholder_image_url.clone()
            }
        }
    }

    /// Person details in input order
    #[instrument(skip(self, person_ids), fields(count = person_ids.len()))]
    pub async fn get_people(&self, person_ids: &[PersonId]) -> Vec<PersonDetail> {
        let people = fan_out(
            self,
            person_ids,
            |assembler, id| async move { assembler.get_person_detail(id).await },
            |assembler, id| assembler.placeholder_person(id),
        )
        .await;

        info!("Assembled {} cast entries", people.len());
        people
    }

    /// The first `limit` billed cast members of a movie
    pub async fn get_cast(&self, detail: &MovieDetail, limit: usize) -> Vec<PersonDetail> {
        let ids = &detail.cast_ids[..detail.cast_ids.len().min(limit)];
        self.get_people(ids).await
    }

    /// Poster URLs in input order
    #[instrument(skip(self, movie_ids), fields(count = movie_ids.len()))]
    pub async fn get_posters(&self, movie_ids: &[MovieId]) -> Vec<String> {
        fan_out(
            self,
            movie_ids,
            |assembler, id| async move { assembler.get_poster(id).await },
            |assembler, _| assembler.config.placeholder_image_url.clone(),
        )
        .await
    }

    fn placeholder_person(&self, person_id: PersonId) -> PersonDetail {
        PersonDetail {
            person_id,
            name: NOT_AVAILABLE.to_string(),
            image_url: self.config.placeholder_image_url.clone(),
            biography: self.config.placeholder_biography.clone(),
        }
    }
}

/// Spawn one task per id and join them in input order.
///
/// A task that panics or is cancelled yields `fallback` for its id.
async fn fan_out<T, F, Fut>(
    assembler: &MetadataAssembler,
    ids: &[u32],
    fetch: F,
    fallback: impl Fn(&MetadataAssembler, u32) -> T,
) -> Vec<T>
where
    T: Send + 'static,
    F: Fn(MetadataAssembler, u32) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
{
    let tasks: Vec<_> = ids
        .iter()
        .map(|&id| (id, tokio::spawn(fetch(assembler.clone(), id))))
        .collect();

    let mut results = Vec::with_capacity(tasks.len());
    for (id, task) in tasks {
        match task.await {
            Ok(value) => results.push(value),
            Err(e) => {
                warn!("Fetch task for id {} failed: {}", id, e);
                results.push(fallback(assembler, id));
            }
        }
    }
    results
}

fn text_or_na(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Map a raw detail payload onto the fixed-shape record
pub fn map_movie_detail(
    movie_id: MovieId,
    catalog_title: &str,
    raw: RawMovieDetails,
    config: &AssemblerConfig,
) -> MovieDetail {
    let credits = raw.credits.unwrap_or_default();

    let directors = credits
        .crew
        .unwrap_or_default()
        .into_iter()
        .filter(|member| member.job.as_deref() == Some("Director"))
        .filter_map(|member| member.name)
        .filter(|name| !name.trim().is_empty())
        .collect();

    let mut cast = credits.cast.unwrap_or_default();
    // Missing order sorts last; stable sort keeps payload order among equals
    cast.sort_by_key(|member| member.order.unwrap_or(u32::MAX));
    let cast_ids = cast.into_iter().filter_map(|member| member.id).collect();

    let genres = raw
        .genres
        .unwrap_or_default()
        .into_iter()
        .filter_map(|genre| genre.name)
        .filter(|name| !name.trim().is_empty())
        .collect();

    let languages = raw
        .spoken_languages
        .unwrap_or_default()
        .into_iter()
        .filter_map(|lang| {
            lang.english_name
                .filter(|name| !name.trim().is_empty())
                .or(lang.name)
        })
        .filter(|name| !name.trim().is_empty())
        .collect();

    let title = raw
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| catalog_title.to_string());

    MovieDetail {
        movie_id,
        title,
        poster_url: config.image_url(raw.poster_path.as_deref()),
        budget: raw.budget.unwrap_or(0),
        genres,
        overview: text_or_na(raw.overview),
        release_date: text_or_na(raw.release_date),
        revenue: raw.revenue.unwrap_or(0),
        runtime: raw.runtime.unwrap_or(0),
        tagline: text_or_na(raw.tagline),
        vote_average: raw.vote_average.unwrap_or(0.0),
        vote_count: raw.vote_count.unwrap_or(0),
        directors,
        languages,
        cast_ids,
    }
}

fn map_person_detail(person_id: PersonId, raw: RawPerson, config: &AssemblerConfig) -> PersonDetail {
    PersonDetail {
        person_id,
        name: text_or_na(raw.name),
        image_url: config.image_url(raw.profile_path.as_deref()),
        biography: raw
            .biography
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| config.placeholder_biography.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CastMember, CrewMember, InMemoryCatalogApi, NamedItem, RawCredits, SpokenLanguage};

    fn create_catalog() -> Arc<Catalog> {
        let mut catalog = Catalog::new();
        catalog.push_movie(19995, "Avatar", "");
        catalog.push_movie(285, "Pirates of the Caribbean: At World's End", "");
        catalog.push_movie(206647, "Spectre", "");
        Arc::new(catalog)
    }

    fn avatar_payload() -> RawMovieDetails {
        RawMovieDetails {
            id: Some(19995),
            title: Some("Avatar".to_string()),
            poster_path: Some("/avatar.jpg".to_string()),
            budget: Some(237_000_000),
            genres: Some(vec![
                NamedItem { id: Some(28), name: Some("Action".to_string()) },
                NamedItem { id: Some(12), name: Some("Adventure".to_string()) },
            ]),
            overview: Some("In the 22nd century...".to_string()),
            release_date: Some("2009-12-10".to_string()),
            revenue: Some(2_787_965_087),
            runtime: Some(162),
            tagline: Some("Enter the World of Pandora.".to_string()),
            vote_average: Some(7.2),
            vote_count: Some(11800),
            spoken_languages: Some(vec![
                SpokenLanguage {
                    iso_639_1: Some("en".to_string()),
                    english_name: Some("English".to_string()),
                    name: Some("English".to_string()),
                },
                SpokenLanguage {
                    iso_639_1: Some("es".to_string()),
                    english_name: None,
                    name: Some("Español".to_string()),
                },
            ]),
            credits: Some(RawCredits {
                cast: Some(
                    [(3, 2), (1, 0), (5, 4), (2, 1), (4, 3), (6, 5)]
                        .into_iter()
                        .map(|(id, order)| CastMember {
                            id: Some(id),
                            name: Some(format!("Actor {}", id)),
                            character: None,
                            order: Some(order),
                        })
                        .collect(),
                ),
                crew: Some(vec![
                    CrewMember {
                        id: Some(2710),
                        name: Some("James Cameron".to_string()),
                        job: Some("Director".to_string()),
                        department: Some("Directing".to_string()),
                    },
                    CrewMember {
                        id: Some(2711),
                        name: Some("Someone Else".to_string()),
                        job: Some("Producer".to_string()),
                        department: Some("Production".to_string()),
                    },
                ]),
            }),
        }
    }

    fn person(id: PersonId) -> RawPerson {
        RawPerson {
            id: Some(id),
            name: Some(format!("Actor {}", id)),
            profile_path: Some(format!("/p{}.jpg", id)),
            biography: Some(format!("Bio of {}", id)),
        }
    }

    fn create_assembler(api: InMemoryCatalogApi) -> MetadataAssembler {
        MetadataAssembler::new(Arc::new(api), create_catalog(), AssemblerConfig::default())
    }

    #[tokio::test]
    async fn test_movie_detail_maps_every_field() {
        let assembler = create_assembler(InMemoryCatalogApi::new().with_movie(19995, avatar_payload()));

        let detail = assembler.get_movie_detail("Avatar").await.unwrap();

        assert_eq!(detail.movie_id, 19995);
        assert_eq!(detail.poster_url, "https://image.tmdb.org/t/p/w500/avatar.jpg");
        assert_eq!(detail.budget, 237_000_000);
        assert_eq!(detail.genres, vec!["Action", "Adventure"]);
        assert_eq!(detail.runtime, 162);
        assert_eq!(detail.directors, vec!["James Cameron"]);
        assert_eq!(detail.languages, vec!["English", "Español"]);
        assert_eq!(detail.cast_ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn test_missing_fields_use_defaults() {
        let raw = RawMovieDetails {
            id: Some(285),
            tagline: Some("".to_string()),
            ..Default::default()
        };
        let assembler = create_assembler(InMemoryCatalogApi::new().with_movie(285, raw));

        let detail = assembler
            .get_movie_detail("Pirates of the Caribbean: At World's End")
            .await
            .unwrap();

        assert_eq!(detail.title, "Pirates of the Caribbean: At World's End");
        assert_eq!(detail.budget, 0);
        assert_eq!(detail.revenue, 0);
        assert_eq!(detail.overview, NOT_AVAILABLE);
        assert_eq!(detail.tagline, NOT_AVAILABLE);
        assert_eq!(detail.poster_url, AssemblerConfig::default().placeholder_image_url);
        assert!(detail.genres.is_empty());
        assert!(detail.cast_ids.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_title_and_failed_fetch() {
        let assembler = create_assembler(InMemoryCatalogApi::new().with_failing_movie(206647));

        assert!(matches!(
            assembler.get_movie_detail("Nope").await,
            Err(MetadataError::DetailNotFound(_))
        ));
        assert!(matches!(
            assembler.get_movie_detail("Spectre").await,
            Err(MetadataError::Fetch { movie_id: 206647, .. })
        ));
    }

    #[tokio::test]
    async fn test_failed_person_is_isolated_and_order_kept() {
        let mut api = InMemoryCatalogApi::new().with_movie(19995, avatar_payload());
        for id in [1, 2, 4, 5] {
            api = api.with_person(id, person(id));
        }
        let assembler = create_assembler(api.with_failing_person(3));

        let detail = assembler.get_movie_detail("Avatar").await.unwrap();
        let cast = assembler.get_cast(&detail, DEFAULT_CAST_LIMIT).await;

        assert_eq!(cast.len(), 5);
        let ids: Vec<PersonId> = cast.iter().map(|p| p.person_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        assert_eq!(cast[2].biography, "Biography not available.");
        assert_eq!(cast[2].image_url, assembler.config().placeholder_image_url);
        assert_eq!(cast[3].biography, "Bio of 4");
        assert_eq!(cast[4].image_url, "https://image.tmdb.org/t/p/w500/p5.jpg");
    }

    #[tokio::test]
    async fn test_posters_fall_back_per_item() {
        let api = InMemoryCatalogApi::new()
            .with_movie(19995, avatar_payload())
            .with_failing_movie(285);
        let assembler = create_assembler(api);

        let posters = assembler.get_posters(&[285, 19995, 42]).await;

        let placeholder = assembler.config().placeholder_image_url.clone();
        assert_eq!(
            posters,
            vec![
                placeholder.clone(),
                "https://image.tmdb.org/t/p/w500/avatar.jpg".to_string(),
                placeholder,
            ]
        );
    }
}
