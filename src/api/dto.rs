//! Request and response bodies for the statuses API

use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;
use crate::data::{Document, PagedQuery};
use crate::error::AppError;

/// Query parameters for `GET /statuses`
#[derive(Debug, Default, Deserialize)]
pub struct ListStatusesParams {
    /// Exact-match filter on the `pivot` field
    pub pivot: Option<String>,
    /// Space-separated projection
    pub fields: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<u64>,
    pub page: Option<u64>,
}

impl ListStatusesParams {
    /// Validate and convert into a store query
    pub fn into_query(self, pagination: &PaginationConfig) -> Result<PagedQuery, AppError> {
        let limit = self.limit.unwrap_or(pagination.default_limit);
        if limit == 0 || limit > pagination.max_limit {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {}",
                pagination.max_limit
            )));
        }

        let page = self.page.unwrap_or(1);
        if page == 0 {
            return Err(AppError::Validation(
                "page must be at least 1".to_string(),
            ));
        }
        if page.checked_mul(limit).is_none() {
            return Err(AppError::Validation(format!(
                "page must be at most {}",
                u64::MAX / limit
            )));
        }

        let mut query = PagedQuery::new(limit);
        query.page = page;

        if let Some(sort) = self.sort.map(|sort| sort.trim().to_string()) {
            if sort.is_empty() || sort == "-" {
                return Err(AppError::Validation("sort cannot be empty".to_string()));
            }
            query.sort = sort;
        }

        query.fields = self
            .fields
            .map(|fields| fields.trim().to_string())
            .filter(|fields| !fields.is_empty());

        if let Some(pivot) = self.pivot {
            query
                .filter
                .insert("pivot".to_string(), serde_json::Value::String(pivot));
        }

        Ok(query)
    }
}

/// Status creation request
#[derive(Debug, Deserialize)]
pub struct CreateStatusRequest {
    pub pivot: Option<String>,
    pub name: Option<String>,
}

/// Status update request
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub name: Option<String>,
}

impl UpdateStatusRequest {
    /// Fields to set on the stored record
    pub fn into_update(self) -> Result<Document, AppError> {
        let name = required("name", self.name)?;

        let mut update = Document::new();
        update.insert("name".to_string(), serde_json::Value::String(name));
        Ok(update)
    }
}

/// Require a present, non-blank string field
pub fn required(field: &str, value: Option<String>) -> Result<String, AppError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(AppError::Validation(format!("{field} cannot be empty"))),
        None => Err(AppError::Validation(format!("{field} is required"))),
    }
}

/// Plain `{ "message": ... }` body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn success() -> Self {
        Self {
            message: "Success.".to_string(),
        }
    }
}
