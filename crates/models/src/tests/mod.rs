use sea_orm::DatabaseConnection;

use crate::db::{connect_and_migrate, DatabaseConfig};

/// Fresh migrated in-memory database per test.
async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    connect_and_migrate(&DatabaseConfig::sqlite_memory()).await
}

/// Clientes CRUD against a real schema
pub mod cliente_tests;
