use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    cache::CartCache,
    services::cart_service::CartService,
    store::OrmCartHeaderStore,
};

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub carts: Arc<CartService>,
}

impl AppState {
    /// Wire the cart engine to the durable store behind `orm` and the given
    /// fast lookup store.
    pub fn new(orm: DatabaseConnection, cache: Arc<dyn CartCache>, write_locks: bool) -> Self {
        let headers = Arc::new(OrmCartHeaderStore::new(orm.clone()));
        let carts = CartService::new(headers, cache).with_write_locks(write_locks);
        Self {
            orm,
            carts: Arc::new(carts),
        }
    }
}
