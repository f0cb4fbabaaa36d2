//! Status service
//!
//! Maps document store outcomes onto application results:
//! store error → `AppError::Store`, explicit miss → `AppError::NotFound`,
//! anything else passes through.

use std::future::Future;
use std::sync::Arc;

use crate::data::{Document, PagedQuery, PagedResult, StatusStore, StoreError};
use crate::error::AppError;
use crate::metrics::{STORE_OPERATION_DURATION_SECONDS, STORE_OPERATIONS_TOTAL};

/// Record a store call's duration and outcome
async fn observe<T, F>(operation: &str, call: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    let timer = STORE_OPERATION_DURATION_SECONDS
        .with_label_values(&[operation])
        .start_timer();
    let result = call.await;
    timer.observe_duration();

    let outcome = if result.is_ok() { "ok" } else { "error" };
    STORE_OPERATIONS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();

    if let Err(error) = &result {
        tracing::error!(operation, %error, "Store operation failed");
    }

    result
}

/// Status service
pub struct StatusService {
    store: Arc<dyn StatusStore>,
}

impl StatusService {
    /// Create new status service over an injected store
    pub fn new(store: Arc<dyn StatusStore>) -> Self {
        Self { store }
    }

    // =========================================================================
    // CRUD Operations
    // =========================================================================

    /// List one page of statuses
    pub async fn list(&self, query: PagedQuery) -> Result<PagedResult, AppError> {
        Ok(observe("paged_find", self.store.paged_find(query)).await?)
    }

    /// Get a status by id
    ///
    /// # Errors
    /// `NotFound` when the store reports no matching record
    pub async fn get(&self, id: &str) -> Result<Document, AppError> {
        observe("find_by_id", self.store.find_by_id(id))
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Create a status
    pub async fn create(&self, pivot: &str, name: &str) -> Result<Document, AppError> {
        let status = observe("create", self.store.create(pivot, name)).await?;
        tracing::info!(pivot, name, "Status created");
        Ok(status)
    }

    /// Update a status
    ///
    /// Returns whatever the store returned, including `None` for an id that
    /// matched nothing; there is no not-found branch here.
    pub async fn update(&self, id: &str, update: Document) -> Result<Option<Document>, AppError> {
        Ok(observe("find_by_id_and_update", self.store.find_by_id_and_update(id, update)).await?)
    }

    /// Delete a status
    ///
    /// # Errors
    /// `NotFound` when the store removed nothing
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let removed = observe("find_by_id_and_remove", self.store.find_by_id_and_remove(id)).await?;
        if removed == 0 {
            return Err(AppError::NotFound);
        }

        tracing::info!(%id, removed, "Status deleted");
        Ok(())
    }
}
