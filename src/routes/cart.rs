use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get},
};

use crate::{
    dto::cart::{AddToCartRequest, RemoveItemRequest},
    error::AppResult,
    extract::AppJson,
    models::{Cart, CartItem},
    response::MessageResponse,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{user_id}",
            get(get_cart).post(add_to_cart).delete(delete_cart),
        )
        .route("/{user_id}/items", delete(remove_items))
}

#[utoipa::path(
    get,
    path = "/cart/{user_id}",
    params(
        ("user_id" = u64, Path, description = "Cart owner")
    ),
    responses(
        (status = 200, description = "Cached cart items, empty when the cart has no entry", body = Vec<CartItem>),
        (status = 500, description = "Cart cache unavailable", body = String),
    ),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
) -> AppResult<Json<Vec<CartItem>>> {
    let items = state.carts.read_cart(user_id).await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/cart/{user_id}",
    params(
        ("user_id" = u64, Path, description = "Cart owner; overrides any user_id in the body")
    ),
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Cart snapshot after appending the item", body = Cart),
        (status = 400, description = "Malformed or invalid item", body = String),
        (status = 500, description = "Durable store or cart cache unavailable", body = String),
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
    AppJson(payload): AppJson<AddToCartRequest>,
) -> AppResult<Json<Cart>> {
    let cart = state.carts.add_item(user_id, payload).await?;
    Ok(Json(cart))
}

#[utoipa::path(
    delete,
    path = "/cart/{user_id}",
    params(
        ("user_id" = u64, Path, description = "Cart owner")
    ),
    responses(
        (status = 200, description = "Cart entry removed (also when it was already absent)", body = MessageResponse),
        (status = 500, description = "Cart cache unavailable", body = String),
    ),
    tag = "Cart"
)]
pub async fn delete_cart(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
) -> AppResult<Json<MessageResponse>> {
    state.carts.delete_cart(user_id).await?;
    Ok(Json(MessageResponse::new("Cart deleted successfully")))
}

#[utoipa::path(
    delete,
    path = "/cart/{user_id}/items",
    params(
        ("user_id" = u64, Path, description = "Cart owner")
    ),
    request_body(
        content = Vec<RemoveItemRequest>,
        description = "Cart items to remove; one entry removes one matching line"
    ),
    responses(
        (status = 200, description = "Items removed; unknown products are skipped", body = MessageResponse),
        (status = 400, description = "Malformed body", body = String),
        (status = 500, description = "No cached cart, or cart cache unavailable", body = String),
    ),
    tag = "Cart"
)]
pub async fn remove_items(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
    AppJson(items): AppJson<Vec<RemoveItemRequest>>,
) -> AppResult<Json<MessageResponse>> {
    let product_ids: Vec<u64> = items.iter().map(|item| item.product_id).collect();
    state.carts.remove_items(user_id, &product_ids).await?;
    Ok(Json(MessageResponse::new("Items deleted successfully")))
}
