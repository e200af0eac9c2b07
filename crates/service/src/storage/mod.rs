//! Storage abstractions for service layer
//!
//! In-process record lists, optionally snapshotted to a JSON file, used by
//! the memory and file variants of the repositories.

pub mod json_list_store;
