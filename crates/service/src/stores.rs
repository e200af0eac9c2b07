//! Backend selection for both record families.

use std::path::Path;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::clientes::repo::{MemoryClienteRepository, SeaOrmClienteRepository};
use crate::clientes::repository::ClienteRepository;
use crate::errors::ServiceError;
use crate::users::repo::{MemoryUserRepository, SeaOrmUserRepository};
use crate::users::repository::UserRepository;

pub const CLIENTES_FILE: &str = "clientes.json";
pub const USERS_FILE: &str = "users.json";

/// One repository per family, chosen once at startup.
#[derive(Clone)]
pub struct Stores {
    pub clientes: Arc<dyn ClienteRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Stores {
    /// Volatile stores; contents are lost on restart.
    pub fn memory() -> Self {
        Self {
            clientes: Arc::new(MemoryClienteRepository::new()),
            users: Arc::new(MemoryUserRepository::new()),
        }
    }

    /// JSON snapshot files under `data_dir`, created when missing.
    pub async fn file(data_dir: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let dir = data_dir.as_ref();
        let clientes = MemoryClienteRepository::open(dir.join(CLIENTES_FILE)).await?;
        let users = MemoryUserRepository::open(dir.join(USERS_FILE)).await?;
        info!(data_dir = %dir.display(), "file-backed stores ready");
        Ok(Self { clientes: Arc::new(clientes), users: Arc::new(users) })
    }

    /// Relational stores sharing one migrated connection pool.
    pub fn database(db: DatabaseConnection) -> Self {
        Self {
            clientes: Arc::new(SeaOrmClienteRepository::new(db.clone())),
            users: Arc::new(SeaOrmUserRepository::new(db)),
        }
    }
}
