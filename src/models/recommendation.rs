use serde::{Deserialize, Serialize};

use super::{MovieId, MovieMetadata, PopularMovie};

const UNTITLED: &str = "Untitled";
const UNKNOWN_DATE: &str = "N/A";
pub const UNKNOWN_DIRECTOR: &str = "Unknown";

/// A recommended movie together with its affinity score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredCandidate {
    pub id: MovieId,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: String,
    pub director: String,
    pub vote_average: f64,
    pub score: u32,
}

impl ScoredCandidate {
    pub fn from_metadata(movie: &MovieMetadata, score: u32) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone().unwrap_or_else(|| UNTITLED.to_string()),
            poster_path: movie.poster_path.clone(),
            release_date: movie
                .release_date
                .clone()
                .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
            director: movie.director().unwrap_or(UNKNOWN_DIRECTOR).to_string(),
            vote_average: movie.vote_average.unwrap_or(0.0),
            score,
        }
    }
}

/// Popular titles carry no affinity basis, so they always score 0
impl From<PopularMovie> for ScoredCandidate {
    fn from(movie: PopularMovie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.unwrap_or_else(|| UNTITLED.to_string()),
            poster_path: movie.poster_path,
            release_date: movie.release_date.unwrap_or_else(|| UNKNOWN_DATE.to_string()),
            director: UNKNOWN_DIRECTOR.to_string(),
            vote_average: movie.vote_average.unwrap_or(0.0),
            score: 0,
        }
    }
}

/// Which path produced a recommendation list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    /// Ranked against the user's affinity profile
    Personalized,
    /// Global popularity list
    Popular,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    pub source: RecommendationSource,
    pub recommendations: Vec<ScoredCandidate>,
}

impl RecommendationResult {
    pub fn personalized(recommendations: Vec<ScoredCandidate>) -> Self {
        Self {
            source: RecommendationSource::Personalized,
            recommendations,
        }
    }

    pub fn popular(recommendations: Vec<ScoredCandidate>) -> Self {
        Self {
            source: RecommendationSource::Popular,
            recommendations,
        }
    }
}
