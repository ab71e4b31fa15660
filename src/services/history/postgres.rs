use std::collections::BTreeSet;

use sqlx::PgPool;

use crate::{
    error::{AppError, AppResult},
    models::MovieId,
    services::history::HistoryStore,
};

/// Read-only history lookups against the Postgres schema in `migrations/`
#[derive(Clone)]
pub struct PgHistoryStore {
    db_pool: PgPool,
}

impl PgHistoryStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    async fn ensure_user(&self, username: &str) -> AppResult<()> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.db_pool)
                .await?;

        if !exists {
            return Err(AppError::UserNotFound(username.to_string()));
        }
        Ok(())
    }

    async fn movie_ids(&self, query: &str, username: &str) -> AppResult<BTreeSet<MovieId>> {
        let rows: Vec<i64> = sqlx::query_scalar(query)
            .bind(username)
            .fetch_all(&self.db_pool)
            .await?;

        rows.into_iter()
            .map(|id| {
                u64::try_from(id)
                    .map(MovieId)
                    .map_err(|_| AppError::Internal(format!("Invalid movie id in database: {}", id)))
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl HistoryStore for PgHistoryStore {
    async fn watched_ids(&self, username: &str) -> AppResult<BTreeSet<MovieId>> {
        self.ensure_user(username).await?;
        let ids = self
            .movie_ids(
                "SELECT movie_id FROM watched_movies WHERE username = $1",
                username,
            )
            .await?;

        tracing::debug!(username = %username, count = ids.len(), "Loaded watched ids");
        Ok(ids)
    }

    async fn watchlist_ids(&self, username: &str) -> AppResult<BTreeSet<MovieId>> {
        self.ensure_user(username).await?;
        self.movie_ids(
            "SELECT movie_id FROM watchlist_entries WHERE username = $1",
            username,
        )
        .await
    }
}
