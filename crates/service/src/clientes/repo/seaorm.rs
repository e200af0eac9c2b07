use async_trait::async_trait;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tokio::sync::Mutex;

use crate::clientes::domain::Cliente;
use crate::clientes::repository::ClienteRepository;
use crate::errors::ServiceError;

/// SeaORM-backed repository implementation.
pub struct SeaOrmClienteRepository {
    db: DatabaseConnection,
    // serializes check-then-write sequences across tasks of this process
    writer: Mutex<()>,
}

impl SeaOrmClienteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, writer: Mutex::new(()) }
    }
}

#[async_trait]
impl ClienteRepository for SeaOrmClienteRepository {
    async fn list(&self) -> Result<Vec<Cliente>, ServiceError> {
        let rows = models::cliente::list(&self.db).await?;
        Ok(rows.into_iter().map(Cliente::from).collect())
    }

    async fn get(&self, dni: &str) -> Result<Option<Cliente>, ServiceError> {
        Ok(models::cliente::find(&self.db, dni).await?.map(Cliente::from))
    }

    async fn insert(&self, cliente: Cliente) -> Result<Cliente, ServiceError> {
        let _guard = self.writer.lock().await;
        let txn = self.db.begin().await?;
        let created = models::cliente::create(&txn, &cliente.dni, &cliente.nombre, &cliente.apellido).await?;
        txn.commit().await?;
        Ok(created.into())
    }

    async fn update(&self, cliente: Cliente) -> Result<Option<Cliente>, ServiceError> {
        let _guard = self.writer.lock().await;
        let txn = self.db.begin().await?;
        let updated = models::cliente::update_names(&txn, &cliente.dni, &cliente.nombre, &cliente.apellido).await?;
        txn.commit().await?;
        Ok(updated.map(Cliente::from))
    }

    async fn remove(&self, dni: &str) -> Result<Option<Cliente>, ServiceError> {
        let _guard = self.writer.lock().await;
        let txn = self.db.begin().await?;
        let removed = models::cliente::delete(&txn, dni).await?;
        txn.commit().await?;
        Ok(removed.map(Cliente::from))
    }
}
