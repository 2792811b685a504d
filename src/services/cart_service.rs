//! Cart consistency engine.
//!
//! A cart lives in two places: the durable header row (owner and timestamp)
//! and the fast-store entry under `cart:<user_id>` (the authoritative item
//! list). Reads only touch the fast store. Adds touch both stores, in the
//! order header first, cache second; removals and deletes touch only the
//! fast store.
//!
//! The two stores are not updated atomically. When write locks are enabled,
//! every mutation for one user runs under that user's lock, so concurrent
//! requests for the same cart can no longer overwrite each other's items.

use std::sync::Arc;

use chrono::Utc;

use crate::{
    cache::{CartCache, CartEntry, cart_key},
    dto::cart::AddToCartRequest,
    error::{AppError, AppResult},
    locks::{UserLocks, UserWriteGuard},
    models::{Cart, CartItem},
    store::CartHeaderStore,
};

pub struct CartService {
    headers: Arc<dyn CartHeaderStore>,
    cache: Arc<dyn CartCache>,
    locks: Option<UserLocks>,
}

impl CartService {
    /// Build an engine with per-user write locks enabled.
    pub fn new(headers: Arc<dyn CartHeaderStore>, cache: Arc<dyn CartCache>) -> Self {
        Self {
            headers,
            cache,
            locks: Some(UserLocks::new()),
        }
    }

    /// Turning locks off brings back last-writer-wins between concurrent
    /// mutations of the same cart.
    pub fn with_write_locks(mut self, enabled: bool) -> Self {
        self.locks = enabled.then(UserLocks::new);
        self
    }

    pub fn write_locks_enabled(&self) -> bool {
        self.locks.is_some()
    }

    async fn lock_user(&self, user_id: u64) -> Option<UserWriteGuard> {
        match &self.locks {
            Some(locks) => Some(locks.acquire(user_id).await),
            None => None,
        }
    }

    async fn load_entry(&self, user_id: u64) -> AppResult<Option<CartEntry>> {
        let key = cart_key(user_id);
        let Some(bytes) = self.cache.get(&key).await? else {
            return Ok(None);
        };
        Ok(Some(CartEntry::decode(&key, user_id, &bytes)?))
    }

    async fn store_entry(&self, user_id: u64, entry: &CartEntry) -> AppResult<()> {
        let bytes = entry.encode()?;
        self.cache.set(&cart_key(user_id), bytes).await?;
        Ok(())
    }

    /// Current item list. A cart with no fast-store entry reads as empty.
    pub async fn read_cart(&self, user_id: u64) -> AppResult<Vec<CartItem>> {
        Ok(self
            .load_entry(user_id)
            .await?
            .map(|entry| entry.items)
            .unwrap_or_default())
    }

    /// Append one item and return the full snapshot that was cached.
    ///
    /// Items are never merged: adding the same product twice yields two lines.
    /// Quantity is stored as given, zero and negative values included.
    #[tracing::instrument(skip(self, payload), fields(product_id = payload.product_id))]
    pub async fn add_item(&self, user_id: u64, payload: AddToCartRequest) -> AppResult<Cart> {
        let _guard = self.lock_user(user_id).await;

        let mut header = self.headers.fetch_or_create(user_id).await?;
        let mut items = self
            .load_entry(user_id)
            .await?
            .map(|entry| entry.items)
            .unwrap_or_default();
        items.push(CartItem {
            product_id: payload.product_id,
            quantity: payload.quantity,
            user_id,
        });

        header.updated_at = Utc::now();
        self.headers.save(&header).await?;

        let cart = Cart {
            user_id,
            items,
            updated_at: header.updated_at,
        };
        if let Err(err) = self.store_entry(user_id, &CartEntry::from_cart(&cart)).await {
            tracing::error!(
                user_id,
                error = %err,
                "cart header saved but cache write failed; durable and cached cart have diverged"
            );
            return Err(err);
        }

        tracing::debug!(user_id, items = cart.items.len(), "item added to cart");
        Ok(cart)
    }

    /// Remove at most one item per requested product id (first match in list
    /// order). Unknown ids are ignored. The cart must already have a
    /// fast-store entry.
    #[tracing::instrument(skip(self, product_ids), fields(requested = product_ids.len()))]
    pub async fn remove_items(&self, user_id: u64, product_ids: &[u64]) -> AppResult<()> {
        let _guard = self.lock_user(user_id).await;

        let mut entry = self.load_entry(user_id).await?.ok_or_else(|| {
            AppError::StoreUnavailable(format!("no cached cart at {}", cart_key(user_id)))
        })?;

        let removed = Cart::remove_first_matches(&mut entry.items, product_ids);
        self.store_entry(user_id, &entry).await?;

        tracing::debug!(user_id, removed, remaining = entry.items.len(), "cart items removed");
        Ok(())
    }

    /// Drop the fast-store entry. The durable header is left in place.
    pub async fn delete_cart(&self, user_id: u64) -> AppResult<()> {
        let _guard = self.lock_user(user_id).await;
        self.cache.delete(&cart_key(user_id)).await?;
        tracing::debug!(user_id, "cart entry deleted");
        Ok(())
    }
}
