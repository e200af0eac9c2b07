pub mod errors;
pub mod metrics;
pub mod openapi;
pub mod pages;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::run_with_config;
