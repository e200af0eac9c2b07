use std::path::PathBuf;

use async_trait::async_trait;
use models::user::{next_id, numeric_id};

use crate::errors::ServiceError;
use crate::storage::json_list_store::JsonListStore;
use crate::users::domain::{NewUser, User};
use crate::users::repository::UserRepository;

/// In-process user list, optionally persisted to a JSON file.
pub struct MemoryUserRepository {
    store: JsonListStore<User>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self { store: JsonListStore::in_memory() }
    }

    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        Ok(Self { store: JsonListStore::open(path).await? })
    }
}

impl Default for MemoryUserRepository {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, ServiceError> {
        let mut users = self.store.list().await;
        users.sort_by_key(|u| numeric_id(&u.id).unwrap_or(u64::MAX));
        Ok(users)
    }

    async fn get(&self, id: &str) -> Result<Option<User>, ServiceError> {
        Ok(self.store.find(|u| u.id == id).await)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ServiceError> {
        let users = self.list().await?;
        Ok(users.into_iter().find(|u| u.username == username))
    }

    async fn insert(&self, user: NewUser) -> Result<User, ServiceError> {
        self.store
            .update_list(|users| {
                let id = next_id(users.iter().map(|u| u.id.as_str()))?;
                let created = user.with_id(id);
                users.push(created.clone());
                Ok(created)
            })
            .await
    }
}
