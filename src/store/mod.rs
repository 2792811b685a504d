//! Durable cart headers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::AppResult;

pub mod orm;

pub use orm::OrmCartHeaderStore;

/// Durable, non-item part of a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartHeader {
    pub user_id: u64,
    pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait CartHeaderStore: Send + Sync {
    /// Return the header for `user_id`, inserting a fresh one if none exists.
    /// Concurrent callers for the same user all observe the same row.
    async fn fetch_or_create(&self, user_id: u64) -> AppResult<CartHeader>;

    async fn save(&self, header: &CartHeader) -> AppResult<()>;
}
