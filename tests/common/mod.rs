#![allow(dead_code)]

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use cart_cache_api::{
    cache::{CacheError, CartCache, InMemoryCartCache},
    db::run_migrations,
    dto::cart::AddToCartRequest,
    services::cart_service::CartService,
    state::AppState,
    store::OrmCartHeaderStore,
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tokio::sync::Barrier;

/// Fresh in-memory SQLite database with migrations applied. One pooled
/// connection, so every query sees the same database.
pub async fn sqlite_conn() -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options).await?;
    run_migrations(&conn).await?;
    Ok(conn)
}

pub async fn test_state(cache: InMemoryCartCache) -> anyhow::Result<AppState> {
    let orm = sqlite_conn().await?;
    Ok(AppState::new(orm, Arc::new(cache), true))
}

pub fn service_with(
    conn: &DatabaseConnection,
    cache: Arc<dyn CartCache>,
    write_locks: bool,
) -> CartService {
    let headers = Arc::new(OrmCartHeaderStore::new(conn.clone()));
    CartService::new(headers, cache).with_write_locks(write_locks)
}

pub fn add(product_id: u64, quantity: i64) -> AddToCartRequest {
    AddToCartRequest {
        product_id,
        quantity,
        user_id: None,
    }
}

/// Holds the first `parties` reads at a barrier until all of them have
/// arrived, forcing concurrent read-modify-write cycles to interleave.
pub struct BarrierCache {
    inner: InMemoryCartCache,
    barrier: Barrier,
    remaining: AtomicUsize,
}

impl BarrierCache {
    pub fn new(inner: InMemoryCartCache, parties: usize) -> Self {
        Self {
            inner,
            barrier: Barrier::new(parties),
            remaining: AtomicUsize::new(parties),
        }
    }
}

#[async_trait]
impl CartCache for BarrierCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let value = self.inner.get(key).await?;
        let held = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if held {
            self.barrier.wait().await;
        }
        Ok(value)
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError> {
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.inner.delete(key).await
    }
}

/// Adds latency to reads to widen the read-modify-write window.
pub struct SlowCache {
    pub inner: InMemoryCartCache,
    pub delay: Duration,
}

#[async_trait]
impl CartCache for SlowCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let value = self.inner.get(key).await?;
        tokio::time::sleep(self.delay).await;
        Ok(value)
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError> {
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.inner.delete(key).await
    }
}

/// Reads succeed against `inner`; every write or delete fails.
pub struct ReadOnlyCache {
    pub inner: InMemoryCartCache,
}

fn refused() -> CacheError {
    CacheError::Backend(redis::RedisError::from((
        redis::ErrorKind::IoError,
        "connection refused",
    )))
}

#[async_trait]
impl CartCache for ReadOnlyCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.inner.get(key).await
    }

    async fn set(&self, _key: &str, _value: Vec<u8>) -> Result<(), CacheError> {
        Err(refused())
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Err(refused())
    }
}

/// Every operation fails.
pub struct DownCache;

#[async_trait]
impl CartCache for DownCache {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Err(refused())
    }

    async fn set(&self, _key: &str, _value: Vec<u8>) -> Result<(), CacheError> {
        Err(refused())
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Err(refused())
    }
}
