use std::sync::Arc;

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::AppResult,
    models::{CandidateStub, MovieId, MovieMetadata, PopularMovie},
    services::catalog::CatalogProvider,
};

const DETAILS_CACHE_TTL: u64 = 86400; // 1 day
const RECS_CACHE_TTL: u64 = 21600; // 6 hours
const POPULAR_CACHE_TTL: u64 = 3600; // 1 hour

/// Redis read-through decorator for any catalog provider
///
/// Caching lives here, outside the recommendation core, which stays a pure
/// function of history and catalog responses.
#[derive(Clone)]
pub struct CachedCatalog {
    inner: Arc<dyn CatalogProvider>,
    cache: Cache,
    language: String,
}

impl CachedCatalog {
    pub fn new(inner: Arc<dyn CatalogProvider>, cache: Cache, language: String) -> Self {
        Self {
            inner,
            cache,
            language,
        }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for CachedCatalog {
    async fn get_movie(&self, id: MovieId) -> AppResult<MovieMetadata> {
        cached!(
            self.cache,
            CacheKey::MovieDetails(id),
            DETAILS_CACHE_TTL,
            async move { self.inner.get_movie(id).await }
        )
    }

    async fn get_recommendations(&self, id: MovieId) -> AppResult<Vec<CandidateStub>> {
        cached!(
            self.cache,
            CacheKey::Recommendations(id, self.language.clone()),
            RECS_CACHE_TTL,
            async move { self.inner.get_recommendations(id).await }
        )
    }

    async fn get_popular(&self) -> AppResult<Vec<PopularMovie>> {
        cached!(
            self.cache,
            CacheKey::Popular(self.language.clone()),
            POPULAR_CACHE_TTL,
            async move { self.inner.get_popular().await }
        )
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
