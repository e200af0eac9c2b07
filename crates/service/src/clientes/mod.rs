//! Clientes family: records keyed by a caller-supplied three-character `dni`.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::ClienteService;
