use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{NewUser, SignupInput, User};
use super::repository::UserRepository;
use crate::auth::PasswordHasher;
use crate::errors::ServiceError;

/// User signup and lookup, independent of web framework.
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    hasher: Arc<PasswordHasher>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, hasher: Arc<PasswordHasher>) -> Self { Self { repo, hasher } }

    /// Register a user: hash the password, then store under the next id.
    ///
    /// # Examples
    /// ```
    /// use service::users::{UserService, domain::SignupInput, repo::MemoryUserRepository};
    /// use service::auth::PasswordHasher;
    /// use std::sync::Arc;
    /// let svc = UserService::new(Arc::new(MemoryUserRepository::new()), Arc::new(PasswordHasher::default()));
    /// let input = SignupInput { firstname: "Ana".into(), lastname: "Diaz".into(), username: "ana".into(), password: "Secret123".into() };
    /// let user = tokio_test::block_on(svc.signup(input)).unwrap();
    /// assert_eq!(user.id, "1");
    /// assert_ne!(user.password_hash, "Secret123");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn signup(&self, input: SignupInput) -> Result<User, ServiceError> {
        input.validate()?;
        let password_hash = self.hasher.hash(&input.password)?;
        let user = self.repo
            .insert(NewUser {
                firstname: input.firstname,
                lastname: input.lastname,
                username: input.username,
                password_hash,
            })
            .await?;
        info!(user_id = %user.id, username = %user.username, "user_registered");
        Ok(user)
    }

    pub async fn list_all(&self) -> Result<Vec<User>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: &str) -> Result<User, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("user"))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<User, ServiceError> {
        self.repo.find_by_username(username).await?.ok_or_else(|| ServiceError::not_found("user"))
    }
}
