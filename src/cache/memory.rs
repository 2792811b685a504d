use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use super::{CacheError, CartCache};

/// In-process cart cache. Shares its map across clones.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCartCache {
    entries: Arc<DashMap<String, Vec<u8>>>,
}

impl InMemoryCartCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CartCache for InMemoryCartCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_entries() {
        let cache = InMemoryCartCache::new();
        let other = cache.clone();

        cache.set("cart:1", b"[]".to_vec()).await.unwrap();
        assert_eq!(other.get("cart:1").await.unwrap(), Some(b"[]".to_vec()));

        other.delete("cart:1").await.unwrap();
        assert!(cache.is_empty());
        // absent key
        other.delete("cart:1").await.unwrap();
    }
}
