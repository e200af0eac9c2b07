use async_trait::async_trait;

use super::domain::Cliente;
use crate::errors::ServiceError;

/// Persistence for clientes, keyed by `dni`.
#[async_trait]
pub trait ClienteRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Cliente>, ServiceError>;
    async fn get(&self, dni: &str) -> Result<Option<Cliente>, ServiceError>;
    /// Check `dni` is free and insert, as one critical section.
    /// A taken `dni` is `ServiceError::Conflict`.
    async fn insert(&self, cliente: Cliente) -> Result<Cliente, ServiceError>;
    /// Replace `nombre`/`apellido`; `Ok(None)` when `dni` is absent.
    async fn update(&self, cliente: Cliente) -> Result<Option<Cliente>, ServiceError>;
    /// Remove and return; `Ok(None)` when `dni` is absent.
    async fn remove(&self, dni: &str) -> Result<Option<Cliente>, ServiceError>;
}
