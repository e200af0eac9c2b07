//! Password hashing and credential verification for the users family.

pub mod hasher;
pub mod verifier;

pub use hasher::{HashParams, PasswordHasher};
pub use verifier::CredentialVerifier;
