use std::collections::HashMap;

use super::MovieMetadata;

/// How many billed cast members count towards actor affinity
pub const BILLED_CAST_DEPTH: usize = 5;

/// Weighted preferences derived from a user's watch history
///
/// Each weight is the number of watched movies that carried the genre,
/// were directed by the person, or billed the actor in the top five.
/// Keys missing from a map weigh 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffinityProfile {
    pub genres: HashMap<u32, u32>,
    pub directors: HashMap<String, u32>,
    pub actors: HashMap<String, u32>,
}

impl AffinityProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one watched movie into the profile
    pub fn record(&mut self, movie: &MovieMetadata) {
        for genre in &movie.genres {
            *self.genres.entry(genre.id).or_insert(0) += 1;
        }

        if let Some(director) = movie.director() {
            *self.directors.entry(director.to_string()).or_insert(0) += 1;
        }

        for member in movie.billed_cast(BILLED_CAST_DEPTH) {
            *self.actors.entry(member.name.clone()).or_insert(0) += 1;
        }
    }

    pub fn genre_weight(&self, genre_id: u32) -> u32 {
        self.genres.get(&genre_id).copied().unwrap_or(0)
    }

    pub fn director_weight(&self, name: &str) -> u32 {
        self.directors.get(name).copied().unwrap_or(0)
    }

    pub fn actor_weight(&self, name: &str) -> u32 {
        self.actors.get(name).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.directors.is_empty() && self.actors.is_empty()
    }
}

impl<'a> FromIterator<&'a MovieMetadata> for AffinityProfile {
    fn from_iter<I: IntoIterator<Item = &'a MovieMetadata>>(iter: I) -> Self {
        let mut profile = Self::new();
        for movie in iter {
            profile.record(movie);
        }
        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CastMember, CrewMember, Genre, MovieId};

    fn movie(id: u64, genres: &[u32], director: Option<&str>, cast: &[&str]) -> MovieMetadata {
        MovieMetadata {
            id: MovieId(id),
            title: None,
            poster_path: None,
            release_date: None,
            runtime: Some(100),
            vote_average: Some(7.0),
            genres: genres
                .iter()
                .map(|g| Genre {
                    id: *g,
                    name: format!("genre-{}", g),
                })
                .collect(),
            crew: director
                .map(|name| CrewMember {
                    name: name.to_string(),
                    job: "Director".to_string(),
                })
                .into_iter()
                .collect(),
            cast: cast
                .iter()
                .map(|name| CastMember {
                    name: name.to_string(),
                    character: None,
                })
                .collect(),
            adult: false,
        }
    }

    #[test]
    fn test_weights_count_contributing_movies() {
        let movies = vec![
            movie(1, &[28, 12], Some("Nolan"), &["Bale"]),
            movie(2, &[28], Some("Nolan"), &["Bale", "Caine"]),
            movie(3, &[28, 18], None, &["Caine"]),
        ];

        let profile: AffinityProfile = movies.iter().collect();

        assert_eq!(profile.genre_weight(28), 3);
        assert_eq!(profile.genre_weight(12), 1);
        assert_eq!(profile.genre_weight(18), 1);
        assert_eq!(profile.director_weight("Nolan"), 2);
        assert_eq!(profile.actor_weight("Bale"), 2);
        assert_eq!(profile.actor_weight("Caine"), 2);
    }

    #[test]
    fn test_missing_keys_weigh_zero() {
        let profile = AffinityProfile::new();
        assert!(profile.is_empty());
        assert_eq!(profile.genre_weight(99), 0);
        assert_eq!(profile.director_weight("Nobody"), 0);
        assert_eq!(profile.actor_weight("Nobody"), 0);
    }

    #[test]
    fn test_only_top_five_cast_counted() {
        let m = movie(1, &[], None, &["A", "B", "C", "D", "E", "F"]);
        let mut profile = AffinityProfile::new();
        profile.record(&m);

        assert_eq!(profile.actors.len(), 5);
        assert_eq!(profile.actor_weight("E"), 1);
        assert_eq!(profile.actor_weight("F"), 0);
    }
}
