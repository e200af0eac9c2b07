use argon2::{
    password_hash::{PasswordHasher as _, PasswordVerifier as _, SaltString},
    Algorithm, Argon2, Params, PasswordHash, Version,
};
use rand::rngs::OsRng;

use crate::errors::ServiceError;

/// Argon2id work factor applied to newly created hashes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashParams {
    /// memory cost in KiB
    pub m_cost: u32,
    /// iterations
    pub t_cost: u32,
    /// lanes
    pub p_cost: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self { m_cost: Params::DEFAULT_M_COST, t_cost: Params::DEFAULT_T_COST, p_cost: Params::DEFAULT_P_COST }
    }
}

impl From<configs::PasswordConfig> for HashParams {
    fn from(c: configs::PasswordConfig) -> Self {
        Self { m_cost: c.m_cost, t_cost: c.t_cost, p_cost: c.p_cost }
    }
}

/// Salted one-way password hashing producing PHC strings
/// (`$argon2id$v=19$m=..,t=..,p=..$<salt>$<hash>`).
#[derive(Clone)]
pub struct PasswordHasher {
    argon: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new(params: HashParams) -> Result<Self, ServiceError> {
        let params = Params::new(params.m_cost, params.t_cost, params.p_cost, None)
            .map_err(|e| ServiceError::Hash(e.to_string()))?;
        Ok(Self { argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, params) })
    }

    /// Hash with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> Result<String, ServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| ServiceError::Hash(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    /// Check `plaintext` against a stored PHC string.
    ///
    /// Algorithm, version and cost come from the stored string, not from
    /// this hasher's configuration, so older hashes keep verifying after the
    /// work factor changes. The digest comparison is constant-time.
    pub fn verify(&self, stored: &str, plaintext: &str) -> Result<bool, ServiceError> {
        let parsed = PasswordHash::new(stored).map_err(|e| ServiceError::Hash(e.to_string()))?;
        Ok(Argon2::default().verify_password(plaintext.as_bytes(), &parsed).is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { argon: Argon2::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> PasswordHasher {
        PasswordHasher::new(HashParams { m_cost: 1024, t_cost: 1, p_cost: 1 }).unwrap()
    }

    #[test]
    fn hash_is_salted_and_tagged() {
        let h = cheap();
        let a = h.hash("Secret123").unwrap();
        let b = h.hash("Secret123").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));
        assert!(!a.contains("Secret123"));
    }

    #[test]
    fn verify_exact_password_only() {
        let h = cheap();
        let stored = h.hash("Secret123").unwrap();
        assert!(h.verify(&stored, "Secret123").unwrap());
        assert!(!h.verify(&stored, "Secret124").unwrap());
        assert!(!h.verify(&stored, "secret123").unwrap());
        assert!(!h.verify(&stored, "Secret12").unwrap());
    }

    #[test]
    fn old_work_factor_still_verifies() {
        let old = cheap();
        let stored = old.hash("Passw0rd").unwrap();
        let new = PasswordHasher::new(HashParams { m_cost: 2048, t_cost: 2, p_cost: 1 }).unwrap();
        assert!(new.verify(&stored, "Passw0rd").unwrap());
    }

    #[test]
    fn malformed_hash_is_error() {
        assert!(matches!(cheap().verify("pbkdf2:sha256:30$x$y", "pw"), Err(ServiceError::Hash(_))));
    }

    #[test]
    fn zero_cost_rejected() {
        assert!(PasswordHasher::new(HashParams { m_cost: 1024, t_cost: 0, p_cost: 1 }).is_err());
    }
}
