//! Document store contract
//!
//! Handlers never talk to persistence directly; they go through a
//! `StatusStore` injected into `AppState`.

use async_trait::async_trait;
use thiserror::Error;

use super::models::{Document, PagedQuery, PagedResult};

/// Errors reported by a document store
///
/// The HTTP layer does not distinguish between these; any of them fails the
/// request with a server error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store could not be reached or refused the operation
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A record with the same id already exists
    #[error("duplicate id: {0}")]
    Duplicate(String),

    /// Any other backend failure
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Operations the statuses resource needs from its document store
///
/// Each call completes exactly once with either a value or a `StoreError`.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Find one page of statuses
    async fn paged_find(&self, query: PagedQuery) -> Result<PagedResult, StoreError>;

    /// Find a status by id; `None` when no record matches
    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, StoreError>;

    /// Create a status from its pivot and name, returning the stored record
    async fn create(&self, pivot: &str, name: &str) -> Result<Document, StoreError>;

    /// Set `update` fields on a status, returning the record after the update
    async fn find_by_id_and_update(
        &self,
        id: &str,
        update: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Remove a status by id, returning the number of removed records
    async fn find_by_id_and_remove(&self, id: &str) -> Result<u64, StoreError>;
}
