use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::Cliente;
use super::repository::ClienteRepository;
use crate::errors::ServiceError;

/// Application service for clientes: validation before every write,
/// explicit not-found results.
pub struct ClienteService {
    repo: Arc<dyn ClienteRepository>,
}

impl ClienteService {
    pub fn new(repo: Arc<dyn ClienteRepository>) -> Self { Self { repo } }

    pub async fn list_all(&self) -> Result<Vec<Cliente>, ServiceError> {
        self.repo.list().await
    }

    pub async fn find(&self, dni: &str) -> Result<Cliente, ServiceError> {
        self.repo.get(dni).await?.ok_or_else(|| ServiceError::not_found("cliente"))
    }

    /// Create a cliente under a fresh `dni`.
    ///
    /// # Examples
    /// ```
    /// use service::clientes::{ClienteService, domain::Cliente, repo::MemoryClienteRepository};
    /// use service::errors::ServiceError;
    /// use std::sync::Arc;
    /// let svc = ClienteService::new(Arc::new(MemoryClienteRepository::new()));
    /// let ana = Cliente { dni: "123".into(), nombre: "Ana".into(), apellido: "Diaz".into() };
    /// tokio_test::block_on(svc.create(ana.clone())).unwrap();
    /// assert!(matches!(tokio_test::block_on(svc.create(ana)), Err(ServiceError::Conflict(_))));
    /// ```
    #[instrument(skip(self, cliente), fields(dni = %cliente.dni))]
    pub async fn create(&self, cliente: Cliente) -> Result<Cliente, ServiceError> {
        cliente.validate()?;
        let created = self.repo.insert(cliente).await?;
        info!(dni = %created.dni, "cliente_created");
        Ok(created)
    }

    /// Replace `nombre`/`apellido` of an existing cliente; `dni` never changes.
    #[instrument(skip(self, cliente), fields(dni = %cliente.dni))]
    pub async fn update(&self, cliente: Cliente) -> Result<Cliente, ServiceError> {
        cliente.validate()?;
        let updated = self.repo
            .update(cliente)
            .await?
            .ok_or_else(|| ServiceError::not_found("cliente"))?;
        info!(dni = %updated.dni, "cliente_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, dni: &str) -> Result<Cliente, ServiceError> {
        let removed = self.repo
            .remove(dni)
            .await?
            .ok_or_else(|| ServiceError::not_found("cliente"))?;
        info!(dni = %removed.dni, "cliente_deleted");
        Ok(removed)
    }
}
