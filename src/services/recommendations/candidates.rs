use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{
    models::{CandidateStub, MovieId},
    services::catalog::{fetch_recommendation_batch, CatalogProvider},
};

/// Gathers catalog recommendations seeded by every watched movie
///
/// Seeds whose page fails to load contribute nothing.
pub async fn collect_candidates(
    catalog: &Arc<dyn CatalogProvider>,
    watched: &BTreeSet<MovieId>,
    watchlist: &BTreeSet<MovieId>,
) -> BTreeSet<MovieId> {
    let pages = fetch_recommendation_batch(catalog, watched.iter().copied()).await;
    let candidates = merge_candidates(pages, watched, watchlist);

    tracing::info!(
        seeds = watched.len(),
        candidates = candidates.len(),
        "Candidates collected"
    );

    candidates
}

/// Unions candidate pages, dropping adult titles and anything already
/// watched or watchlisted
pub fn merge_candidates(
    pages: impl IntoIterator<Item = Vec<CandidateStub>>,
    watched: &BTreeSet<MovieId>,
    watchlist: &BTreeSet<MovieId>,
) -> BTreeSet<MovieId> {
    pages
        .into_iter()
        .flatten()
        .filter(|stub| !stub.adult)
        .map(|stub| stub.id)
        .filter(|id| !watched.contains(id) && !watchlist.contains(id))
        .collect()
}
