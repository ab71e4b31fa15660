use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::{
    models::{MovieId, PopularMovie, ScoredCandidate},
    services::catalog::CatalogProvider,
};

use super::{MIN_RUNTIME_MINUTES, MIN_VOTE_AVERAGE};

/// Popularity-ordered list for users without usable history
///
/// A failed popularity fetch yields an empty list rather than an error.
pub async fn popular_fallback(
    catalog: &Arc<dyn CatalogProvider>,
    exclude: &BTreeSet<MovieId>,
    limit: usize,
) -> Vec<ScoredCandidate> {
    let popular = match catalog.get_popular().await {
        Ok(popular) => popular,
        Err(e) => {
            tracing::warn!(
                error = %e,
                provider = catalog.name(),
                "Popular list unavailable, returning no recommendations"
            );
            return Vec::new();
        }
    };

    let selected = select_popular(popular, exclude, limit);
    tracing::info!(count = selected.len(), "Serving popularity fallback");
    selected
}

/// Applies the fallback filters while keeping upstream order
///
/// Unlike the personalized path, a missing runtime counts as passing: list
/// entries rarely carry one.
pub fn select_popular(
    popular: Vec<PopularMovie>,
    exclude: &BTreeSet<MovieId>,
    limit: usize,
) -> Vec<ScoredCandidate> {
    let mut seen = HashSet::new();

    popular
        .into_iter()
        .filter(|movie| {
            !movie.adult
                && movie.vote_average.unwrap_or(0.0) >= MIN_VOTE_AVERAGE
                && movie.runtime.unwrap_or(MIN_RUNTIME_MINUTES) >= MIN_RUNTIME_MINUTES
        })
        .filter(|movie| !exclude.contains(&movie.id))
        .filter(|movie| seen.insert(movie.id))
        .take(limit)
        .map(ScoredCandidate::from)
        .collect()
}
