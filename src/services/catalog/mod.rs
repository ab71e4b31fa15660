/// Movie catalog abstraction
///
/// The recommendation core only ever reads from the catalog: movie details with
/// credits, a page of "recommended for" stubs per seed movie, and the global
/// popularity list. Implementations may be swapped or decorated (see
/// `CachedCatalog`) without touching the core.
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::{
    error::AppResult,
    models::{CandidateStub, MovieId, MovieMetadata, PopularMovie},
};

pub mod cached;
pub mod tmdb;

pub use cached::CachedCatalog;
pub use tmdb::TmdbCatalog;

/// Read-only access to the upstream movie catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch full details for a movie, including director and cast credits
    async fn get_movie(&self, id: MovieId) -> AppResult<MovieMetadata>;

    /// Fetch the first page of catalog recommendations seeded by a movie
    async fn get_recommendations(&self, id: MovieId) -> AppResult<Vec<CandidateStub>>;

    /// Fetch the first page of globally popular movies, in popularity order
    async fn get_popular(&self) -> AppResult<Vec<PopularMovie>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Fetches details for every id in parallel, keeping only the successes
///
/// Results come back in the order the ids were given.
pub async fn fetch_movie_batch(
    catalog: &Arc<dyn CatalogProvider>,
    ids: impl IntoIterator<Item = MovieId>,
) -> Vec<MovieMetadata> {
    let tasks = ids
        .into_iter()
        .map(|id| {
            let catalog = Arc::clone(catalog);
            (id, tokio::spawn(async move { catalog.get_movie(id).await }))
        })
        .collect();

    collect_settled("movie_details", tasks).await
}

/// Fetches the recommendation page of every seed in parallel
///
/// A seed whose fetch fails contributes no page.
pub async fn fetch_recommendation_batch(
    catalog: &Arc<dyn CatalogProvider>,
    seeds: impl IntoIterator<Item = MovieId>,
) -> Vec<Vec<CandidateStub>> {
    let tasks = seeds
        .into_iter()
        .map(|id| {
            let catalog = Arc::clone(catalog);
            (
                id,
                tokio::spawn(async move { catalog.get_recommendations(id).await }),
            )
        })
        .collect();

    collect_settled("recommendations", tasks).await
}

/// Awaits every task and partitions the outcomes, never short-circuiting
async fn collect_settled<T>(
    stage: &'static str,
    tasks: Vec<(MovieId, JoinHandle<AppResult<T>>)>,
) -> Vec<T> {
    let mut results = Vec::with_capacity(tasks.len());
    let mut error_count = 0usize;

    for (movie_id, task) in tasks {
        match task.await {
            Ok(Ok(value)) => results.push(value),
            Ok(Err(e)) => {
                tracing::warn!(stage, movie_id = %movie_id, error = %e, "Catalog fetch failed, skipping");
                error_count += 1;
            }
            Err(e) => {
                tracing::error!(stage, movie_id = %movie_id, error = %e, "Task join error");
                error_count += 1;
            }
        }
    }

    if error_count > 0 {
        tracing::warn!(
            stage,
            success_count = results.len(),
            error_count,
            "Partial catalog fetch failure"
        );
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn movie(id: u64) -> MovieMetadata {
        MovieMetadata {
            id: MovieId(id),
            title: Some(format!("Movie {}", id)),
            poster_path: None,
            release_date: None,
            runtime: Some(100),
            vote_average: Some(7.0),
            genres: vec![],
            crew: vec![],
            cast: vec![],
            adult: false,
        }
    }

    #[tokio::test]
    async fn test_fetch_movie_batch_skips_failures() {
        let mut mock = MockCatalogProvider::new();
        mock.expect_get_movie().times(4).returning(|id| {
            if id.0 % 2 == 0 {
                Err(AppError::ExternalApi(format!("404 for {}", id)))
            } else {
                Ok(movie(id.0))
            }
        });

        let catalog: Arc<dyn CatalogProvider> = Arc::new(mock);
        let movies =
            fetch_movie_batch(&catalog, [MovieId(1), MovieId(2), MovieId(3), MovieId(4)]).await;

        let ids: Vec<MovieId> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![MovieId(1), MovieId(3)]);
    }

    #[tokio::test]
    async fn test_fetch_movie_batch_all_failed_is_empty() {
        let mut mock = MockCatalogProvider::new();
        mock.expect_get_movie()
            .returning(|_| Err(AppError::ExternalApi("unavailable".to_string())));

        let catalog: Arc<dyn CatalogProvider> = Arc::new(mock);
        let movies = fetch_movie_batch(&catalog, [MovieId(1), MovieId(2)]).await;

        assert!(movies.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_recommendation_batch_drops_failed_seed() {
        let mut mock = MockCatalogProvider::new();
        mock.expect_get_recommendations().returning(|id| match id.0 {
            1 => Ok(vec![CandidateStub {
                id: MovieId(10),
                adult: false,
            }]),
            _ => Err(AppError::ExternalApi("timeout".to_string())),
        });

        let catalog: Arc<dyn CatalogProvider> = Arc::new(mock);
        let pages = fetch_recommendation_batch(&catalog, [MovieId(1), MovieId(2)]).await;

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0][0].id, MovieId(10));
    }

    #[tokio::test]
    async fn test_empty_batch_makes_no_calls() {
        let mut mock = MockCatalogProvider::new();
        mock.expect_get_movie().never();

        let catalog: Arc<dyn CatalogProvider> = Arc::new(mock);
        let movies = fetch_movie_batch(&catalog, Vec::<MovieId>::new()).await;

        assert!(movies.is_empty());
    }
}
