use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{MovieId, WatchedMovie},
    services::history::HistoryStore,
};

#[derive(Debug, Default)]
struct UserHistory {
    watched: BTreeMap<MovieId, WatchedMovie>,
    watchlist: BTreeSet<MovieId>,
}

/// History store kept entirely in process memory
///
/// Backs local development and tests. Cloning shares the same underlying data.
#[derive(Clone, Default)]
pub struct InMemoryHistoryStore {
    users: Arc<RwLock<HashMap<String, UserHistory>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user with an empty history; no-op if already present
    pub async fn add_user(&self, username: &str) {
        let mut users = self.users.write().await;
        users.entry(username.to_string()).or_default();
    }

    /// Logs a watched movie and drops it from the user's watchlist
    ///
    /// Logging an already logged movie keeps the existing entry.
    pub async fn record_watched(&self, entry: WatchedMovie) -> AppResult<()> {
        let mut users = self.users.write().await;
        let history = users
            .get_mut(&entry.username)
            .ok_or_else(|| AppError::UserNotFound(entry.username.clone()))?;

        history.watchlist.remove(&entry.movie_id);
        if history.watched.contains_key(&entry.movie_id) {
            tracing::debug!(username = %entry.username, movie_id = %entry.movie_id, "Movie already logged");
            return Ok(());
        }

        tracing::debug!(username = %entry.username, movie_id = %entry.movie_id, "Watched movie recorded");
        history.watched.insert(entry.movie_id, entry);

        Ok(())
    }

    /// Edits the rating and/or review of a logged movie
    pub async fn update_watched(
        &self,
        username: &str,
        movie_id: MovieId,
        rating: Option<f32>,
        review: Option<String>,
    ) -> AppResult<WatchedMovie> {
        let mut users = self.users.write().await;
        let entry = users
            .get_mut(username)
            .ok_or_else(|| AppError::UserNotFound(username.to_string()))?
            .watched
            .get_mut(&movie_id)
            .ok_or_else(|| AppError::NotFound(format!("No watch entry for movie {}", movie_id)))?;

        if let Some(rating) = rating {
            entry.rating = Some(rating);
        }
        if let Some(review) = review {
            entry.review = Some(review);
        }

        Ok(entry.clone())
    }

    /// Deletes a logged movie, removing it from future affinity computation
    pub async fn remove_watched(&self, username: &str, movie_id: MovieId) -> AppResult<()> {
        let mut users = self.users.write().await;
        users
            .get_mut(username)
            .ok_or_else(|| AppError::UserNotFound(username.to_string()))?
            .watched
            .remove(&movie_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("No watch entry for movie {}", movie_id)))
    }

    /// Queues a movie to watch, moving it out of the watch log if present
    pub async fn add_to_watchlist(&self, username: &str, movie_id: MovieId) -> AppResult<()> {
        let mut users = self.users.write().await;
        let history = users
            .get_mut(username)
            .ok_or_else(|| AppError::UserNotFound(username.to_string()))?;

        history.watched.remove(&movie_id);
        history.watchlist.insert(movie_id);
        Ok(())
    }

    pub async fn remove_from_watchlist(&self, username: &str, movie_id: MovieId) -> AppResult<()> {
        let mut users = self.users.write().await;
        let removed = users
            .get_mut(username)
            .ok_or_else(|| AppError::UserNotFound(username.to_string()))?
            .watchlist
            .remove(&movie_id);

        if !removed {
            return Err(AppError::InvalidInput(format!(
                "Movie {} is not in the watchlist",
                movie_id
            )));
        }
        Ok(())
    }

    /// Full watch entries, most recently watched first
    pub async fn watched_movies(&self, username: &str) -> AppResult<Vec<WatchedMovie>> {
        let users = self.users.read().await;
        let history = users
            .get(username)
            .ok_or_else(|| AppError::UserNotFound(username.to_string()))?;

        let mut entries: Vec<WatchedMovie> = history.watched.values().cloned().collect();
        entries.sort_by(|a, b| b.watched_date.cmp(&a.watched_date));
        Ok(entries)
    }
}

#[async_trait::async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn watched_ids(&self, username: &str) -> AppResult<BTreeSet<MovieId>> {
        let users = self.users.read().await;
        users
            .get(username)
            .map(|history| history.watched.keys().copied().collect())
            .ok_or_else(|| AppError::UserNotFound(username.to_string()))
    }

    async fn watchlist_ids(&self, username: &str) -> AppResult<BTreeSet<MovieId>> {
        let users = self.users.read().await;
        users
            .get(username)
            .map(|history| history.watchlist.clone())
            .ok_or_else(|| AppError::UserNotFound(username.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_unknown_user() {
        let store = InMemoryHistoryStore::new();

        let result = store.watched_ids("ghost").await;
        assert!(matches!(result, Err(AppError::UserNotFound(name)) if name == "ghost"));

        let result = store.watchlist_ids("ghost").await;
        assert!(matches!(result, Err(AppError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_known_user_without_history() {
        let store = InMemoryHistoryStore::new();
        store.add_user("ana").await;

        assert!(store.watched_ids("ana").await.unwrap().is_empty());
        assert!(store.watchlist_ids("ana").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_watched_removes_from_watchlist() {
        let store = InMemoryHistoryStore::new();
        store.add_user("ana").await;
        store.add_to_watchlist("ana", MovieId(603)).await.unwrap();
        store.add_to_watchlist("ana", MovieId(604)).await.unwrap();

        store
            .record_watched(WatchedMovie::new("ana", MovieId(603)).with_rating(5.0))
            .await
            .unwrap();

        let watched = store.watched_ids("ana").await.unwrap();
        let watchlist = store.watchlist_ids("ana").await.unwrap();
        assert!(watched.contains(&MovieId(603)));
        assert!(!watchlist.contains(&MovieId(603)));
        assert!(watchlist.contains(&MovieId(604)));
    }

    #[tokio::test]
    async fn test_record_watched_repeat_keeps_first_entry() {
        let store = InMemoryHistoryStore::new();
        store.add_user("ana").await;
        tokio_test::assert_ok!(
            store
                .record_watched(WatchedMovie::new("ana", MovieId(603)).with_rating(4.5))
                .await
        );

        tokio_test::assert_ok!(
            store
                .record_watched(WatchedMovie::new("ana", MovieId(603)))
                .await
        );

        let entries = store.watched_movies("ana").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].rating, Some(4.5));
    }

    #[tokio::test]
    async fn test_add_to_watchlist_moves_out_of_watch_log() {
        let store = InMemoryHistoryStore::new();
        store.add_user("ana").await;
        store
            .record_watched(WatchedMovie::new("ana", MovieId(603)))
            .await
            .unwrap();
        store
            .record_watched(WatchedMovie::new("ana", MovieId(604)))
            .await
            .unwrap();

        tokio_test::assert_ok!(store.add_to_watchlist("ana", MovieId(603)).await);

        let watched = store.watched_ids("ana").await.unwrap();
        let watchlist = store.watchlist_ids("ana").await.unwrap();
        assert_eq!(watched, BTreeSet::from([MovieId(604)]));
        assert_eq!(watchlist, BTreeSet::from([MovieId(603)]));
    }

    #[tokio::test]
    async fn test_update_watched_keeps_unset_fields() {
        let store = InMemoryHistoryStore::new();
        store.add_user("ana").await;
        store
            .record_watched(WatchedMovie::new("ana", MovieId(603)).with_review("Great"))
            .await
            .unwrap();

        let updated = store
            .update_watched("ana", MovieId(603), Some(3.5), None)
            .await
            .unwrap();

        assert_eq!(updated.rating, Some(3.5));
        assert_eq!(updated.review.as_deref(), Some("Great"));
    }

    #[tokio::test]
    async fn test_update_missing_entry() {
        let store = InMemoryHistoryStore::new();
        store.add_user("ana").await;

        let result = store.update_watched("ana", MovieId(1), Some(1.0), None).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_watched() {
        let store = InMemoryHistoryStore::new();
        store.add_user("ana").await;
        store
            .record_watched(WatchedMovie::new("ana", MovieId(603)))
            .await
            .unwrap();

        tokio_test::assert_ok!(store.remove_watched("ana", MovieId(603)).await);
        assert!(store.watched_ids("ana").await.unwrap().is_empty());

        tokio_test::assert_err!(store.remove_watched("ana", MovieId(603)).await);
    }

    #[tokio::test]
    async fn test_remove_from_watchlist_not_present() {
        let store = InMemoryHistoryStore::new();
        store.add_user("ana").await;

        let result = store.remove_from_watchlist("ana", MovieId(1)).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_watched_movies_most_recent_first() {
        let store = InMemoryHistoryStore::new();
        store.add_user("ana").await;

        let mut older = WatchedMovie::new("ana", MovieId(1));
        older.watched_date = Utc::now() - Duration::days(3);
        let newer = WatchedMovie::new("ana", MovieId(2));

        store.record_watched(older).await.unwrap();
        store.record_watched(newer).await.unwrap();

        let entries = store.watched_movies("ana").await.unwrap();
        assert_eq!(entries[0].movie_id, MovieId(2));
        assert_eq!(entries[1].movie_id, MovieId(1));
    }
}
