//! Fast lookup store for live cart entries.
//!
//! The store is a plain byte map keyed by [`cart_key`]. Serialization of the
//! value is owned by [`entry::CartEntry`]; backends never look inside it.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::CacheBackend;

pub mod entry;
pub mod memory;
pub mod redis_backend;

pub use entry::{CART_ENTRY_VERSION, CartEntry};
pub use memory::InMemoryCartCache;
pub use redis_backend::RedisCartCache;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(#[from] redis::RedisError),

    #[error("corrupt cart entry at {key}: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("failed to encode cart entry: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Key-value byte store holding one entry per cart. Entries never expire;
/// they live until overwritten or deleted.
#[async_trait]
pub trait CartCache: Send + Sync {
    /// `Ok(None)` when the key is absent. Backend failures are errors.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Unconditional overwrite.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError>;

    /// Deleting an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

pub fn cart_key(user_id: u64) -> String {
    format!("cart:{user_id}")
}

/// Build the configured backend.
pub async fn connect(backend: &CacheBackend) -> anyhow::Result<Arc<dyn CartCache>> {
    match backend {
        CacheBackend::Redis { url } => {
            let cache = RedisCartCache::connect(url).await?;
            tracing::info!(url = %url, "connected to redis cart cache");
            Ok(Arc::new(cache))
        }
        CacheBackend::Memory => {
            tracing::warn!("using in-process cart cache; carts will not survive a restart");
            Ok(Arc::new(InMemoryCartCache::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_uses_decimal_user_id() {
        assert_eq!(cart_key(42), "cart:42");
        assert_eq!(cart_key(u64::MAX), "cart:18446744073709551615");
    }
}
