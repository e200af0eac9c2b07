use std::sync::Arc;

use service::auth::{CredentialVerifier, PasswordHasher};
use service::clientes::ClienteService;
use service::errors::ServiceError;
use service::stores::Stores;
use service::users::UserService;

/// Shared handler state; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub clientes: Arc<ClienteService>,
    pub users: Arc<UserService>,
    pub verifier: Arc<CredentialVerifier>,
}

impl AppState {
    pub fn new(stores: Stores, hasher: Arc<PasswordHasher>) -> Result<Self, ServiceError> {
        let verifier = CredentialVerifier::new(Arc::clone(&stores.users), Arc::clone(&hasher))?;
        Ok(Self {
            clientes: Arc::new(ClienteService::new(stores.clientes)),
            users: Arc::new(UserService::new(stores.users, hasher)),
            verifier: Arc::new(verifier),
        })
    }
}
