//! SeaORM entities for the two record families plus their field rules.
//!
//! Every query goes through the entity query builder, so values are always
//! bound parameters.

pub mod errors;
pub mod db;
pub mod user;
pub mod cliente;

#[cfg(test)]
mod tests;
