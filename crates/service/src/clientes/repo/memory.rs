use std::path::PathBuf;

use async_trait::async_trait;

use crate::clientes::domain::Cliente;
use crate::clientes::repository::ClienteRepository;
use crate::errors::ServiceError;
use crate::storage::json_list_store::JsonListStore;

/// In-process cliente list kept in insertion order, optionally persisted to a JSON file.
pub struct MemoryClienteRepository {
    store: JsonListStore<Cliente>,
}

impl MemoryClienteRepository {
    pub fn new() -> Self {
        Self { store: JsonListStore::in_memory() }
    }

    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        Ok(Self { store: JsonListStore::open(path).await? })
    }
}

impl Default for MemoryClienteRepository {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl ClienteRepository for MemoryClienteRepository {
    async fn list(&self) -> Result<Vec<Cliente>, ServiceError> {
        Ok(self.store.list().await)
    }

    async fn get(&self, dni: &str) -> Result<Option<Cliente>, ServiceError> {
        Ok(self.store.find(|c| c.dni == dni).await)
    }

    async fn insert(&self, cliente: Cliente) -> Result<Cliente, ServiceError> {
        self.store
            .update_list(|list| {
                if list.iter().any(|c| c.dni == cliente.dni) {
                    return Err(ServiceError::Conflict(format!("cliente {} already exists", cliente.dni)));
                }
                list.push(cliente.clone());
                Ok(cliente)
            })
            .await
    }

    async fn update(&self, cliente: Cliente) -> Result<Option<Cliente>, ServiceError> {
        self.store
            .update_list(|list| {
                let Some(existing) = list.iter_mut().find(|c| c.dni == cliente.dni) else {
                    return Ok(None);
                };
                existing.nombre = cliente.nombre;
                existing.apellido = cliente.apellido;
                Ok(Some(existing.clone()))
            })
            .await
    }

    async fn remove(&self, dni: &str) -> Result<Option<Cliente>, ServiceError> {
        self.store
            .update_list(|list| {
                let removed = list.iter().position(|c| c.dni == dni).map(|idx| list.remove(idx));
                Ok(removed)
            })
            .await
    }
}
