//! Profile store interface

use async_trait::async_trait;
use shared::models::{RestaurantPatch, RestaurantProfile};
use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Corrupt record {id}: {reason}")]
    Corrupt { id: String, reason: String },
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound("row".into()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Duplicate(db.message().to_string())
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD access to restaurant profiles
///
/// `update_partial` writes only the fields present in the patch and
/// refreshes `updated_at`; it fails with [`StoreError::NotFound`] when the
/// id is unknown.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<RestaurantProfile>>;

    async fn update_partial(
        &self,
        id: &str,
        patch: RestaurantPatch,
    ) -> StoreResult<RestaurantProfile>;

    async fn insert(&self, profile: RestaurantProfile) -> StoreResult<RestaurantProfile>;

    /// Remove a profile, returning it when it existed
    async fn delete(&self, id: &str) -> StoreResult<Option<RestaurantProfile>>;
}
