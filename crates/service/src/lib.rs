//! Service layer for the clientes and users record families.
//! - Repository traits hide which backend holds the records.
//! - Validation lives here and in the `models` crate, never in handlers.
//! - Every operation returns a typed `ServiceError`.

pub mod errors;
pub mod auth;
pub mod storage;
pub mod clientes;
pub mod users;
pub mod stores;
#[cfg(test)]
pub mod test_support;
