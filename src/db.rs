use anyhow::Result;
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

use crate::migration::Migrator;

/// Create a SeaORM connection. Postgres and SQLite URLs are both accepted.
pub async fn create_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    let conn = Database::connect(database_url).await?;
    Ok(conn)
}

/// Apply every pending migration for the `products` and `carts` tables.
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(conn, None).await
}

/// Convert an API id into the signed column type used by both backends.
pub fn to_db_id(id: u64) -> Option<i64> {
    i64::try_from(id).ok()
}

/// Convert a stored id back into its API form.
pub fn from_db_id(id: i64) -> Option<u64> {
    u64::try_from(id).ok()
}
