use std::collections::BTreeSet;

use crate::{error::AppResult, models::MovieId};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryHistoryStore;
pub use postgres::PgHistoryStore;

/// Per-user watch history and watchlist lookups
///
/// Both reads return `AppError::UserNotFound` for unknown users, which callers
/// must keep distinct from a known user with an empty history.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    /// Ids of every movie the user has logged as watched
    async fn watched_ids(&self, username: &str) -> AppResult<BTreeSet<MovieId>>;

    /// Ids of every movie on the user's watchlist
    async fn watchlist_ids(&self, username: &str) -> AppResult<BTreeSet<MovieId>>;
}
