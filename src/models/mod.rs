mod affinity;
mod history;
mod movie;
mod recommendation;

pub use affinity::{AffinityProfile, BILLED_CAST_DEPTH};
pub use history::WatchedMovie;
pub use movie::{
    CandidateStub, CastMember, CrewMember, Genre, MovieId, MovieMetadata, PopularMovie,
    DIRECTOR_JOB,
};
pub use recommendation::{
    RecommendationResult, RecommendationSource, ScoredCandidate, UNKNOWN_DIRECTOR,
};
