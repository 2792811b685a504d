//! Schema migrations, applied at startup and by the `migrate` binary.

use sea_orm_migration::prelude::*;

mod m20240601_000001_create_products;
mod m20240601_000002_create_carts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_products::Migration),
            Box::new(m20240601_000002_create_carts::Migration),
        ]
    }
}
