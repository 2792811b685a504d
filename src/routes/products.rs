use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::products::CreateProductRequest,
    error::AppResult,
    extract::AppJson,
    models::Product,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_products).post(create_product))
}

#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products", body = Vec<Product>)
    ),
    tag = "Products"
)]
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = product_service::list_products(&state).await?;
    Ok(Json(products))
}

#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Created product with its assigned id", body = Product),
        (status = 400, description = "Malformed body", body = String),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProductRequest>,
) -> AppResult<Json<Product>> {
    let product = product_service::create_product(&state, payload).await?;
    Ok(Json(product))
}
