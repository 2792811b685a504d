use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{cart::{AddToCartRequest, RemoveItemRequest}, products::CreateProductRequest},
    models::{Cart, CartItem, Product},
    response::MessageResponse,
    routes::{cart, health, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::create_product,
        cart::get_cart,
        cart::add_to_cart,
        cart::delete_cart,
        cart::remove_items
    ),
    components(
        schemas(
            Product,
            CartItem,
            Cart,
            AddToCartRequest,
            RemoveItemRequest,
            CreateProductRequest,
            MessageResponse,
            health::HealthData
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Cart", description = "Cached cart endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
