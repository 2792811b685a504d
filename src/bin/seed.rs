use cart_cache_api::{
    cache::InMemoryCartCache,
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::products::CreateProductRequest,
    services::product_service,
    state::AppState,
};
use std::sync::Arc;

const SAMPLE_PRODUCTS: &[(&str, i64, i64)] = &[
    ("Espresso Beans 1kg", 2400, 40),
    ("Ceramic Mug", 900, 120),
    ("Pour-over Kettle", 5400, 15),
    ("Paper Filters (100)", 450, 300),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    // Seeding only touches the catalog, so no real cart cache is needed.
    let state = AppState::new(orm, Arc::new(InMemoryCartCache::new()), true);

    if !product_service::list_products(&state).await?.is_empty() {
        println!("Products already present, skipping seed");
        return Ok(());
    }

    for (name, price, quantity) in SAMPLE_PRODUCTS {
        let product = product_service::create_product(
            &state,
            CreateProductRequest {
                name: (*name).to_string(),
                price: *price,
                quantity: *quantity,
            },
        )
        .await?;
        println!("Seeded product {} ({})", product.id, product.name);
    }

    println!("Seed completed");
    Ok(())
}
