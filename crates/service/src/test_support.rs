#![cfg(test)]
use std::sync::Arc;

use models::db::{connect_and_migrate, DatabaseConfig};
use sea_orm::DatabaseConnection;

use crate::auth::{HashParams, PasswordHasher};

/// Fresh migrated in-memory SQLite database, one per test.
pub async fn sqlite_db() -> Result<DatabaseConnection, anyhow::Error> {
    Ok(connect_and_migrate(&DatabaseConfig::sqlite_memory()).await?)
}

/// Low-cost Argon2id so hashing does not dominate test time.
pub fn cheap_hasher() -> Arc<PasswordHasher> {
    let params = HashParams { m_cost: 1024, t_cost: 1, p_cost: 1 };
    Arc::new(PasswordHasher::new(params).expect("valid test params"))
}
