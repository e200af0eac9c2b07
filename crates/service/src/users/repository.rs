use async_trait::async_trait;

use super::domain::{NewUser, User};
use crate::errors::ServiceError;

/// Persistence for user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, ascending by numeric id.
    async fn list(&self) -> Result<Vec<User>, ServiceError>;
    async fn get(&self, id: &str) -> Result<Option<User>, ServiceError>;
    /// Earliest-registered user with this username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ServiceError>;
    /// Assign `max(id) + 1` and insert, as one critical section.
    async fn insert(&self, user: NewUser) -> Result<User, ServiceError>;
}
