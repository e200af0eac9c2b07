use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use super::hasher::PasswordHasher;
use crate::errors::ServiceError;
use crate::users::domain::User;
use crate::users::repository::UserRepository;

/// Checks a username/password pair against the stored hash.
///
/// An unknown username and a wrong password both yield
/// `ServiceError::Unauthorized`; storage failures pass through unchanged.
pub struct CredentialVerifier {
    users: Arc<dyn UserRepository>,
    hasher: Arc<PasswordHasher>,
    // verified against when the username is unknown, so both paths cost one KDF run
    dummy_hash: String,
}

impl CredentialVerifier {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<PasswordHasher>) -> Result<Self, ServiceError> {
        let dummy_hash = hasher.hash("unknown-user-placeholder")?;
        Ok(Self { users, hasher, dummy_hash })
    }

    /// Authenticate a user.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{CredentialVerifier, PasswordHasher};
    /// use service::users::{UserService, domain::SignupInput, repo::MemoryUserRepository};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MemoryUserRepository::new());
    /// let hasher = Arc::new(PasswordHasher::default());
    /// let users = UserService::new(repo.clone(), hasher.clone());
    /// let _ = tokio_test::block_on(users.signup(SignupInput { firstname: "A".into(), lastname: "B".into(), username: "ab".into(), password: "Passw0rd".into() }));
    /// let verifier = CredentialVerifier::new(repo, hasher).unwrap();
    /// let user = tokio_test::block_on(verifier.verify("ab", "Passw0rd")).unwrap();
    /// assert_eq!(user.id, "1");
    /// assert!(tokio_test::block_on(verifier.verify("ab", "passw0rd")).is_err());
    /// ```
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn verify(&self, username: &str, password: &str) -> Result<User, ServiceError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            let _ = self.hasher.verify(&self.dummy_hash, password);
            warn!("login_failed");
            return Err(ServiceError::Unauthorized);
        };

        match self.hasher.verify(&user.password_hash, password) {
            Ok(true) => {
                info!(user_id = %user.id, "login_succeeded");
                Ok(user)
            }
            Ok(false) => {
                warn!("login_failed");
                Err(ServiceError::Unauthorized)
            }
            Err(e) => {
                error!(user_id = %user.id, err = %e, "stored password hash unreadable");
                Err(ServiceError::Unauthorized)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cheap_hasher, sqlite_db};
    use crate::users::domain::{NewUser, SignupInput};
    use crate::users::repo::{MemoryUserRepository, SeaOrmUserRepository};
    use crate::users::UserService;

    async fn setup(repo: Arc<dyn UserRepository>) -> Result<CredentialVerifier, anyhow::Error> {
        let hasher = cheap_hasher();
        let users = UserService::new(Arc::clone(&repo), Arc::clone(&hasher));
        users
            .signup(SignupInput { firstname: "Ana".into(), lastname: "Diaz".into(), username: "ana".into(), password: "S3cret!".into() })
            .await?;
        Ok(CredentialVerifier::new(repo, hasher)?)
    }

    #[tokio::test]
    async fn exact_password_succeeds() -> Result<(), anyhow::Error> {
        let v = setup(Arc::new(MemoryUserRepository::new())).await?;
        let user = v.verify("ana", "S3cret!").await?;
        assert_eq!(user.firstname, "Ana");
        Ok(())
    }

    #[tokio::test]
    async fn single_character_variations_fail() -> Result<(), anyhow::Error> {
        let v = setup(Arc::new(MemoryUserRepository::new())).await?;
        for attempt in ["S3cret", "S3cret!!", "s3cret!", "S3cre7!", "", " S3cret!"] {
            assert!(matches!(v.verify("ana", attempt).await, Err(ServiceError::Unauthorized)), "{attempt:?}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn unknown_user_indistinguishable() -> Result<(), anyhow::Error> {
        let v = setup(Arc::new(MemoryUserRepository::new())).await?;
        let unknown = v.verify("nobody", "S3cret!").await.unwrap_err();
        let wrong = v.verify("ana", "nope").await.unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert_eq!(unknown.code(), wrong.code());
        Ok(())
    }

    #[tokio::test]
    async fn works_against_relational_store() -> Result<(), anyhow::Error> {
        let v = setup(Arc::new(SeaOrmUserRepository::new(sqlite_db().await?))).await?;
        assert_eq!(v.verify("ana", "S3cret!").await?.id, "1");
        assert!(v.verify("ana", "S3cret?").await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_stored_hash_is_auth_failure() -> Result<(), anyhow::Error> {
        let repo = Arc::new(MemoryUserRepository::new());
        repo.insert(NewUser { firstname: "Old".into(), lastname: "Row".into(), username: "old".into(), password_hash: "pbkdf2:sha256:30$salt$abc".into() })
            .await?;
        let v = CredentialVerifier::new(repo, cheap_hasher())?;
        assert!(matches!(v.verify("old", "whatever").await, Err(ServiceError::Unauthorized)));
        Ok(())
    }
}
