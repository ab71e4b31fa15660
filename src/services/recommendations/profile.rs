use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{
    models::{AffinityProfile, MovieId},
    services::catalog::{fetch_movie_batch, CatalogProvider},
};

/// Builds the user's affinity profile from their watched movies
///
/// Details for every watched id are fetched in parallel. Movies whose fetch
/// fails are left out of the profile; this never fails and returns an empty
/// profile when nothing resolves.
pub async fn build_profile(
    catalog: &Arc<dyn CatalogProvider>,
    watched: &BTreeSet<MovieId>,
) -> AffinityProfile {
    if watched.is_empty() {
        return AffinityProfile::new();
    }

    let movies = fetch_movie_batch(catalog, watched.iter().copied()).await;
    let profile: AffinityProfile = movies.iter().collect();

    tracing::info!(
        watched = watched.len(),
        resolved = movies.len(),
        genres = profile.genres.len(),
        directors = profile.directors.len(),
        actors = profile.actors.len(),
        "Affinity profile built"
    );

    profile
}
