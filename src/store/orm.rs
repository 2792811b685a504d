use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait,
    ActiveValue::{Set, Unchanged},
    sea_query::OnConflict,
};

use super::{CartHeader, CartHeaderStore};
use crate::{
    db::{from_db_id, to_db_id},
    entity::carts::{ActiveModel, Column, Entity as Carts, Model as CartModel},
    error::{AppError, AppResult},
};

#[derive(Debug, Clone)]
pub struct OrmCartHeaderStore {
    conn: DatabaseConnection,
}

impl OrmCartHeaderStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

fn column_id(user_id: u64) -> AppResult<i64> {
    to_db_id(user_id)
        .ok_or_else(|| AppError::Validation(format!("user id {user_id} is out of range")))
}

fn header_from_entity(model: CartModel) -> AppResult<CartHeader> {
    let user_id = from_db_id(model.user_id).ok_or_else(|| {
        AppError::StoreUnavailable(format!("stored cart has negative user id {}", model.user_id))
    })?;
    Ok(CartHeader {
        user_id,
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

#[async_trait]
impl CartHeaderStore for OrmCartHeaderStore {
    async fn fetch_or_create(&self, user_id: u64) -> AppResult<CartHeader> {
        let id = column_id(user_id)?;

        let fresh = ActiveModel {
            user_id: Set(id),
            updated_at: Set(Utc::now().into()),
        };
        // Insert-if-absent keeps concurrent first adds from colliding.
        Carts::insert(fresh)
            .on_conflict(OnConflict::column(Column::UserId).do_nothing().to_owned())
            .do_nothing()
            .exec(&self.conn)
            .await?;

        let model = Carts::find_by_id(id).one(&self.conn).await?.ok_or_else(|| {
            AppError::StoreUnavailable(format!("cart header for user {user_id} was not persisted"))
        })?;
        header_from_entity(model)
    }

    async fn save(&self, header: &CartHeader) -> AppResult<()> {
        let active = ActiveModel {
            user_id: Unchanged(column_id(header.user_id)?),
            updated_at: Set(header.updated_at.into()),
        };
        active.update(&self.conn).await?;
        Ok(())
    }
}
