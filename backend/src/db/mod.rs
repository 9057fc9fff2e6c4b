//! Storage collaborators. Services see only these traits; `PgStore` is the
//! production backend and `MemoryStore` backs the tests.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::sleep_log::{NewSleepLog, SleepLog};
use crate::models::user::{User, UserPatch};
use crate::models::weight_log::{NewWeightLog, WeightLog};
use crate::models::LogKind;

#[cfg(test)]
pub mod memory;
pub mod pool;
pub mod postgres;

pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Unavailable(e.to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Users keyed by their chat-platform id.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_user(&self, telegram_id: i64) -> StoreResult<Option<User>>;

    /// Creates the user, or returns the existing row untouched.
    async fn create_user(&self, telegram_id: i64, username: Option<&str>) -> StoreResult<User>;

    /// Applies only the fields set in `patch`. `None` if the user does not exist.
    async fn update_user(&self, telegram_id: i64, patch: &UserPatch) -> StoreResult<Option<User>>;
}

/// Per-day logs. Every write is keyed by (user, date) and must be atomic
/// against that key.
#[async_trait]
pub trait LogStore: Send + Sync {
    async fn upsert_sleep(&self, log: &NewSleepLog) -> StoreResult<SleepLog>;

    async fn upsert_weight(&self, log: &NewWeightLog) -> StoreResult<WeightLog>;

    /// Returns whether a row was removed. Deleting an absent row is not an error.
    async fn delete_log(&self, kind: LogKind, telegram_id: i64, date: NaiveDate)
        -> StoreResult<bool>;

    /// Newest first, at most `limit` rows.
    async fn recent_sleep(&self, telegram_id: i64, limit: i64) -> StoreResult<Vec<SleepLog>>;

    /// Newest first, at most `limit` rows.
    async fn recent_weight(&self, telegram_id: i64, limit: i64) -> StoreResult<Vec<WeightLog>>;

    /// Every sleep log for the user, newest first. Unbounded.
    async fn all_sleep(&self, telegram_id: i64) -> StoreResult<Vec<SleepLog>>;
}

#[async_trait]
pub trait Store: UserDirectory + LogStore {
    async fn health_check(&self) -> StoreResult<()>;
}
