use serde::Deserialize;
use utoipa::ToSchema;

/// Body of `POST /products`. Any `id` sent by the client is ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: i64,
    pub quantity: i64,
}
