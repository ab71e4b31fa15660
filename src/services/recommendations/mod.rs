//! Personalized movie recommendations
//!
//! Stages run one after another, each fanning out its catalog calls in
//! parallel and continuing with whatever succeeded:
//!
//! 1. `profile`: watched ids → movie details → affinity profile
//! 2. `candidates`: watched ids → recommendation pages → candidate ids
//! 3. `ranking`: candidate ids → movie details → scored, ordered list
//!
//! Users without history get `fallback`'s popularity list instead.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{MovieId, RecommendationResult},
    services::{
        catalog::{fetch_movie_batch, CatalogProvider},
        history::HistoryStore,
    },
};

pub mod candidates;
pub mod fallback;
pub mod profile;
pub mod ranking;

/// Maximum number of recommendations returned on either path
pub const RESULT_LIMIT: usize = 15;
/// Minimum vote average (0-10) a recommended movie needs
pub const MIN_VOTE_AVERAGE: f64 = 6.5;
/// Minimum runtime in minutes; filters out shorts
pub const MIN_RUNTIME_MINUTES: u32 = 70;

#[derive(Debug, Clone, Copy)]
pub struct RecommendationSettings {
    pub limit: usize,
    /// Serve the popularity list when a user with history gets no personalized hits
    pub fallback_when_empty: bool,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            limit: RESULT_LIMIT,
            fallback_when_empty: false,
        }
    }
}

/// Computes recommendations from a user's history and the catalog
///
/// Holds no state between requests; every call reads history and the
/// catalog afresh.
pub struct RecommendationService {
    catalog: Arc<dyn CatalogProvider>,
    history: Arc<dyn HistoryStore>,
    settings: RecommendationSettings,
}

impl RecommendationService {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        history: Arc<dyn HistoryStore>,
        settings: RecommendationSettings,
    ) -> Self {
        Self {
            catalog,
            history,
            settings,
        }
    }

    /// Produces the ranked (or fallback) recommendation list for a user
    ///
    /// Only an unknown user (or a failing history store) is an error; catalog
    /// failures shrink the result instead.
    #[instrument(skip(self))]
    pub async fn recommend(&self, username: &str) -> AppResult<RecommendationResult> {
        if username.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Username cannot be empty".to_string(),
            ));
        }

        let watched = self.history.watched_ids(username).await?;
        let watchlist = self.history.watchlist_ids(username).await?;

        if watched.is_empty() {
            tracing::info!(username = %username, "No watch history, using popularity fallback");
            return Ok(self.popular(&watchlist).await);
        }

        let start = Instant::now();

        let profile = profile::build_profile(&self.catalog, &watched).await;

        let ranked = if profile.is_empty() {
            // Every lookup would miss, so nothing can score above 0
            tracing::warn!(username = %username, "Affinity profile is empty, skipping candidate search");
            Vec::new()
        } else {
            let candidate_ids =
                candidates::collect_candidates(&self.catalog, &watched, &watchlist).await;
            let candidates = fetch_movie_batch(&self.catalog, candidate_ids).await;
            ranking::rank_candidates(candidates, &profile, self.settings.limit)
        };

        tracing::info!(
            username = %username,
            recommendations = ranked.len(),
            processing_time_ms = start.elapsed().as_millis(),
            "Personalized recommendations computed"
        );

        if ranked.is_empty() && self.settings.fallback_when_empty {
            let exclude: BTreeSet<MovieId> = watched.union(&watchlist).copied().collect();
            return Ok(self.popular(&exclude).await);
        }

        Ok(RecommendationResult::personalized(ranked))
    }

    async fn popular(&self, exclude: &BTreeSet<MovieId>) -> RecommendationResult {
        let movies = fallback::popular_fallback(&self.catalog, exclude, self.settings.limit).await;
        RecommendationResult::popular(movies)
    }
}
