use async_trait::async_trait;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tokio::sync::Mutex;

use crate::errors::ServiceError;
use crate::users::domain::{NewUser, User};
use crate::users::repository::UserRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
    // serializes max-id-then-insert across tasks of this process
    writer: Mutex<()>,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, writer: Mutex::new(()) }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn list(&self) -> Result<Vec<User>, ServiceError> {
        let users = models::user::list(&self.db).await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<User>, ServiceError> {
        Ok(models::user::find_by_id(&self.db, id).await?.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ServiceError> {
        Ok(models::user::find_by_username(&self.db, username).await?.map(User::from))
    }

    async fn insert(&self, user: NewUser) -> Result<User, ServiceError> {
        let _guard = self.writer.lock().await;
        let txn = self.db.begin().await?;
        let created = models::user::create(&txn, &user.firstname, &user.lastname, &user.username, &user.password_hash).await?;
        txn.commit().await?;
        Ok(created.into())
    }
}
