//! Users family: signup records keyed by a store-assigned decimal id.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::UserService;
