use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, EntityTrait, QueryOrder, Set};

use crate::{
    db::from_db_id,
    dto::products::CreateProductRequest,
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    models::Product,
    state::AppState,
};

/// Every product, ordered by id. No pagination.
pub async fn list_products(state: &AppState) -> AppResult<Vec<Product>> {
    Products::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect()
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<Product> {
    let active = ActiveModel {
        id: NotSet,
        name: Set(payload.name),
        price: Set(payload.price),
        quantity: Set(payload.quantity),
    };
    let product = active.insert(&state.orm).await?;
    tracing::info!(product_id = product.id, "product created");

    product_from_entity(product)
}

fn product_from_entity(model: ProductModel) -> AppResult<Product> {
    let id = from_db_id(model.id).ok_or_else(|| {
        AppError::StoreUnavailable(format!("stored product has negative id {}", model.id))
    })?;
    Ok(Product {
        id,
        name: model.name,
        price: model.price,
        quantity: model.quantity,
    })
}
