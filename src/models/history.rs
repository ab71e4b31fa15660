use chrono::{DateTime, Utc};
use serde::Serialize;

use super::MovieId;

/// A title the user has logged as watched
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WatchedMovie {
    pub username: String,
    pub movie_id: MovieId,
    /// Star rating, if the user gave one
    pub rating: Option<f32>,
    pub review: Option<String>,
    pub watched_date: DateTime<Utc>,
}

impl WatchedMovie {
    /// Creates an unrated entry watched now
    pub fn new(username: impl Into<String>, movie_id: MovieId) -> Self {
        Self {
            username: username.into(),
            movie_id,
            rating: None,
            review: None,
            watched_date: Utc::now(),
        }
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_review(mut self, review: impl Into<String>) -> Self {
        self.review = Some(review.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let entry = WatchedMovie::new("ana", MovieId(603))
            .with_rating(4.5)
            .with_review("Still holds up");

        assert_eq!(entry.username, "ana");
        assert_eq!(entry.movie_id, MovieId(603));
        assert_eq!(entry.rating, Some(4.5));
        assert_eq!(entry.review.as_deref(), Some("Still holds up"));
    }
}
