use serde::Deserialize;
use utoipa::ToSchema;

/// Body of `POST /cart/{user_id}`. Shaped like a cart item; the owner always
/// comes from the path. `product_id` and `quantity` must be present, but any
/// integer quantity is accepted.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: u64,
    pub quantity: i64,
    /// Ignored. The path user id wins.
    #[serde(default)]
    pub user_id: Option<u64>,
}

/// One element of the `DELETE /cart/{user_id}/items` body. Clients send full
/// cart items; only `product_id` is read, and it must be present.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RemoveItemRequest {
    pub product_id: u64,
}
