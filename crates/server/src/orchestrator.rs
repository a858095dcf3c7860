//! # Recommender Service
//!
//! Coordinates the catalog, the similarity index, the ranking engine and
//! the metadata assembler behind the operations the user interface calls:
//! 1. Recommend by one facet, or a full round across every facet
//! 2. Describe a movie and its cast
//! 3. Browse the catalog a page at a time
//! 4. Keep favorites per user
//!
//! Matrix loads and ranking are blocking work and run on the blocking
//! pool; metadata lookups are async and fanned out per item.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, instrument, warn};

use catalog::{BrowseEntry, Catalog, Movie};
use metadata::{
    CatalogApi, InMemoryCatalogApi, MetadataAssembler, MovieDetail, PersonDetail, TmdbClient,
    DEFAULT_CAST_LIMIT,
};
use recommender::{
    candidate_pool, filter_and_take, Recommendation, RecommendationEngine, RecommendationResult,
    ScoredMovie, SessionSeenSet,
};
use similarity::{Facet, FileFacetSource, SimilarityIndex};

use crate::config::{AppConfig, DEFAULT_PAGE_SIZE};
use crate::favorites::{FavoritesStore, InMemoryFavorites};

/// One facet's share of a recommendation round
#[derive(Debug, Clone, PartialEq)]
pub struct FacetRecommendations {
    pub facet: Facet,
    pub caption: &'static str,
    pub entries: RecommendationResult,
    /// Why the facet produced nothing, if it could not be loaded
    pub skipped: Option<String>,
}

/// One browse grid tile
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseTile {
    pub entry: BrowseEntry,
    pub poster_url: String,
}

/// One page of the browse grid. Pages are 0-based.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowsePage {
    pub page: usize,
    pub max_page: usize,
    pub tiles: Vec<BrowseTile>,
}

#[derive(Clone)]
pub struct RecommenderService {
    catalog: Arc<Catalog>,
    index: Arc<SimilarityIndex>,
    engine: RecommendationEngine,
    assembler: MetadataAssembler,
    favorites: Arc<dyn FavoritesStore>,
    page_size: usize,
}

impl RecommenderService {
    pub fn new(catalog: Arc<Catalog>, index: SimilarityIndex, assembler: MetadataAssembler) -> Self {
        Self {
            engine: RecommendationEngine::new(catalog.clone()),
            catalog,
            index: Arc::new(index),
            assembler,
            favorites: Arc::new(InMemoryFavorites::new()),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_favorites(mut self, favorites: Arc<dyn FavoritesStore>) -> Self {
        self.favorites = favorites;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Load the catalog from disk and wire every component.
    ///
    /// Facet files are not read here; each loads on first use. Without an
    /// API key, metadata lookups serve placeholders.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let start = Instant::now();
        let catalog = Catalog::load_from_files(&config.data_dir).with_context(|| {
            format!("Failed to load catalog from {}", config.data_dir.display())
        })?;
        info!(
            "Loaded {} movies and {} browse entries in {:.2?}",
            catalog.len(),
            catalog.browse_entries().len(),
            start.elapsed()
        );

        let api: Arc<dyn CatalogApi> = match config.api_key() {
            Some(key) => Arc::new(
                TmdbClient::new(config.api_url.as_str(), key, config.request_timeout)
                    .context("Failed to build metadata client")?,
            ),
            None => {
                warn!("No metadata API key configured, posters and details use placeholders");
                Arc::new(InMemoryCatalogApi::new())
            }
        };

        let index = SimilarityIndex::for_catalog(FileFacetSource::new(&config.facet_dir), &catalog);
        let catalog = Arc::new(catalog);
        let assembler = MetadataAssembler::new(api, catalog.clone(), config.assembler_config());

        Ok(Self::new(catalog, index, assembler).with_page_size(config.page_size))
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    /// Top `k` candidates for one facet, without posters. Blocking.
    pub fn rank(&self, title: &str, facet: Facet, k: usize) -> Result<Vec<ScoredMovie>> {
        let matrix = self.index.load_facet(facet)?;
        Ok(self.engine.candidates(title, &matrix, k)?)
    }

    /// The `n` movies most similar to `title` by one facet, with posters
    #[instrument(skip(self))]
    pub async fn recommend(&self, title: &str, facet: Facet, n: usize) -> Result<RecommendationResult> {
        let ranked = tokio::task::spawn_blocking({
            let service = self.clone();
            let title = title.to_string();
            move || service.rank(&title, facet, n)
        })
        .await
        .context("Ranking task panicked")??;

        Ok(self.attach_posters(ranked).await)
    }

    /// A full round over every facet with a fresh seen set
    pub async fn recommend_round(&self, title: &str, n: usize) -> Result<Vec<FacetRecommendations>> {
        let mut seen = SessionSeenSet::new();
        self.recommend_round_with(title, n, &mut seen).await
    }

    /// A round over every facet, in display order.
    ///
    /// No title appears twice across the round or in `seen`. A facet that
    /// cannot be loaded is reported as skipped; an unknown title fails the
    /// whole round.
    #[instrument(skip(self, seen))]
    pub async fn recommend_round_with(
        &self,
        title: &str,
        n: usize,
        seen: &mut SessionSeenSet,
    ) -> Result<Vec<FacetRecommendations>> {
        let start = Instant::now();
        self.engine.resolve(title)?;

        let pool = candidate_pool(n);
        let mut round = Vec::with_capacity(Facet::COUNT);

        for facet in Facet::ALL {
            let ranked = match self.rank_facet(title, facet, pool).await? {
                Ok(ranked) => ranked,
                Err(e) => {
                    warn!("Skipping facet {}: {}", facet, e);
                    round.push(FacetRecommendations {
                        facet,
                        caption: facet.caption(),
                        entries: Vec::new(),
                        skipped: Some(e.to_string()),
                    });
                    continue;
                }
            };

            let accepted = filter_and_take(ranked, seen, n);
            let entries = self.attach_posters(accepted).await;

            round.push(FacetRecommendations {
                facet,
                caption: facet.caption(),
                entries,
                skipped: None,
            });
        }

        info!(
            "Recommendation round for '{}' surfaced {} titles in {:.2?}",
            title,
            seen.len(),
            start.elapsed()
        );
        Ok(round)
    }

    /// Detail record of a catalog title
    pub async fn describe(&self, title: &str) -> Result<MovieDetail> {
        Ok(self.assembler.get_movie_detail(title).await?)
    }

    /// Top-billed cast of a movie, placeholders for failed lookups
    pub async fn cast(&self, detail: &MovieDetail) -> Vec<PersonDetail> {
        self.assembler.get_cast(detail, DEFAULT_CAST_LIMIT).await
    }

    /// Case-insensitive title search, exact matches first
    pub fn search(&self, query: &str) -> Vec<Movie> {
        self.catalog.search(query).into_iter().cloned().collect()
    }

    /// Last non-empty browse page
    pub fn max_page(&self) -> usize {
        self.catalog.browse_entries().len().saturating_sub(1) / self.page_size
    }

    /// One page of the browse grid, clamped to the last page
    #[instrument(skip(self))]
    pub async fn browse_page(&self, page: usize) -> BrowsePage {
        let max_page = self.max_page();
        let page = page.min(max_page);

        let entries: Vec<BrowseEntry> = self
            .catalog
            .browse_entries()
            .iter()
            .skip(page * self.page_size)
            .take(self.page_size)
            .cloned()
            .collect();

        let ids: Vec<_> = entries.iter().map(|e| e.id).collect();
        let posters = self.assembler.get_posters(&ids).await;

        let tiles = entries
            .into_iter()
            .zip(posters)
            .map(|(entry, poster_url)| BrowseTile { entry, poster_url })
            .collect();

        BrowsePage { page, max_page, tiles }
    }

    /// Add a catalog title to a user's favorites. Returns false if it was
    /// already there.
    pub fn add_favorite(&self, user: &str, title: &str) -> Result<bool> {
        let movie = self.engine.resolve(title)?;
        Ok(self.favorites.put(user, &movie.title))
    }

    pub fn favorites(&self, user: &str) -> BTreeSet<String> {
        self.favorites.get(user)
    }

    /// Load and rank one facet on the blocking pool. The inner error is a
    /// facet that could not be loaded; ranking errors fail the outer result.
    async fn rank_facet(
        &self,
        title: &str,
        facet: Facet,
        k: usize,
    ) -> Result<similarity::Result<Vec<ScoredMovie>>> {
        let index = self.index.clone();
        let engine = self.engine.clone();
        let title = title.to_string();

        let ranked = tokio::task::spawn_blocking(move || match index.load_facet(facet) {
            Ok(matrix) => engine.candidates(&title, &matrix, k).map(Ok),
            Err(e) => Ok(Err(e)),
        })
        .await
        .context("Ranking task panicked")??;

        Ok(ranked)
    }

    async fn attach_posters(&self, ranked: Vec<ScoredMovie>) -> RecommendationResult {
        let ids: Vec<_> = ranked.iter().map(|m| m.id).collect();
        let posters = self.assembler.get_posters(&ids).await;

        ranked
            .into_iter()
            .zip(posters)
            .map(|(movie, poster_url)| Recommendation { movie, poster_url })
            .collect()
    }
}
