//! Data layer module
//!
//! - Status document models and page metadata
//! - `StatusStore` contract
//! - In-memory store (volatile)

mod memory;
mod models;
mod store;

pub use memory::MemoryStore;
pub use models::*;
pub use store::{StatusStore, StoreError};

#[cfg(test)]
mod memory_test;
