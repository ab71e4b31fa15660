use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Job title TMDB uses for directors in the crew list
pub const DIRECTOR_JOB: &str = "Director";

/// Identifier of a movie in the upstream catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MovieId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrewMember {
    pub name: String,
    pub job: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
}

/// Full movie details including credits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieMetadata {
    pub id: MovieId,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    /// Runtime in minutes
    pub runtime: Option<u32>,
    /// Average user vote on a 0-10 scale
    pub vote_average: Option<f64>,
    pub genres: Vec<Genre>,
    pub crew: Vec<CrewMember>,
    /// Billing order as returned by the catalog
    pub cast: Vec<CastMember>,
    pub adult: bool,
}

impl MovieMetadata {
    /// First crew member credited as director, if any
    ///
    /// Co-directed films only contribute their first listed director.
    pub fn director(&self) -> Option<&str> {
        self.crew
            .iter()
            .find(|member| member.job == DIRECTOR_JOB)
            .map(|member| member.name.as_str())
    }

    /// Top `depth` billed cast members, in source order
    pub fn billed_cast(&self, depth: usize) -> &[CastMember] {
        &self.cast[..self.cast.len().min(depth)]
    }
}

/// Entry of a "recommended for this movie" page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CandidateStub {
    pub id: MovieId,
    pub adult: bool,
}

/// Entry of the global popularity list
///
/// The list endpoint does not carry credits, and usually not a runtime either.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopularMovie {
    pub id: MovieId,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub runtime: Option<u32>,
    pub adult: bool,
}
