use std::collections::HashSet;

use crate::models::{
    AffinityProfile, MovieMetadata, ScoredCandidate, BILLED_CAST_DEPTH, UNKNOWN_DIRECTOR,
};

use super::{MIN_RUNTIME_MINUTES, MIN_VOTE_AVERAGE};

/// A shared director counts double compared to a shared genre or actor
const DIRECTOR_MULTIPLIER: u32 = 2;

/// Hard filters applied before scoring
///
/// A missing runtime counts as 0 here and therefore fails.
pub fn passes_quality_filters(movie: &MovieMetadata) -> bool {
    !movie.adult
        && movie.runtime.unwrap_or(0) >= MIN_RUNTIME_MINUTES
        && movie.vote_average.unwrap_or(0.0) >= MIN_VOTE_AVERAGE
}

/// Affinity score of a candidate against the profile
///
/// ```text
/// score = Σ genre-weight[g]
///       + 2 × director-weight[director]
///       + Σ actor-weight[a] over the top five billed cast
/// ```
pub fn score_movie(movie: &MovieMetadata, profile: &AffinityProfile) -> u32 {
    let genre_score: u32 = movie
        .genres
        .iter()
        .map(|genre| profile.genre_weight(genre.id))
        .sum();

    let director = movie.director().unwrap_or(UNKNOWN_DIRECTOR);
    let director_score = DIRECTOR_MULTIPLIER * profile.director_weight(director);

    let cast_score: u32 = movie
        .billed_cast(BILLED_CAST_DEPTH)
        .iter()
        .map(|member| profile.actor_weight(&member.name))
        .sum();

    genre_score + director_score + cast_score
}

/// Filters, scores and orders candidates, keeping at most `limit`
///
/// Candidates scoring 0 are dropped. Order is score descending, then vote
/// average descending; the sort is stable so remaining ties keep input order.
/// Duplicate ids keep their highest ranked entry.
pub fn rank_candidates(
    candidates: Vec<MovieMetadata>,
    profile: &AffinityProfile,
    limit: usize,
) -> Vec<ScoredCandidate> {
    let total = candidates.len();

    let mut scored: Vec<ScoredCandidate> = candidates
        .iter()
        .filter(|movie| passes_quality_filters(movie))
        .filter_map(|movie| {
            let score = score_movie(movie, profile);
            (score > 0).then(|| ScoredCandidate::from_metadata(movie, score))
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.vote_average.total_cmp(&a.vote_average))
    });

    let mut seen = HashSet::new();
    scored.retain(|candidate| seen.insert(candidate.id));
    scored.truncate(limit);

    tracing::debug!(
        candidates = total,
        ranked = scored.len(),
        "Candidates ranked"
    );

    scored
}
