//! Data models
//!
//! Status records are opaque JSON documents. Only the store looks inside them;
//! handlers pass them through untouched.

use serde::{Deserialize, Serialize};

/// Opaque status record
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Field holding a record's identifier
pub const ID_FIELD: &str = "_id";

// =============================================================================
// Paged queries
// =============================================================================

/// Query passed to `StatusStore::paged_find`
#[derive(Debug, Clone, PartialEq)]
pub struct PagedQuery {
    /// Exact-match field filter
    pub filter: Document,
    /// Space-separated projection, e.g. "pivot name"
    pub fields: Option<String>,
    /// Sort key, `-` prefix for descending
    pub sort: String,
    /// Page size (>= 1)
    pub limit: u64,
    /// 1-based page number
    pub page: u64,
}

impl PagedQuery {
    /// Query for the first page, sorted by id
    pub fn new(limit: u64) -> Self {
        Self {
            filter: Document::new(),
            fields: None,
            sort: ID_FIELD.to_string(),
            limit,
            page: 1,
        }
    }
}

/// One page of records plus page metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PagedResult {
    pub data: Vec<Document>,
    #[serde(default)]
    pub pages: Pages,
    #[serde(default)]
    pub items: Items,
}

impl PagedResult {
    /// Result carrying records only, with zeroed metadata
    pub fn from_data(data: Vec<Document>) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }
}

/// Page navigation metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pages {
    pub current: u64,
    pub prev: u64,
    pub has_prev: bool,
    pub next: u64,
    pub has_next: bool,
    pub total: u64,
}

/// Item range metadata (1-based, inclusive)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Items {
    pub limit: u64,
    pub begin: u64,
    pub end: u64,
    pub total: u64,
}

impl PagedResult {
    /// Build page metadata for `total` matching records
    pub fn paginate(data: Vec<Document>, limit: u64, page: u64, total: u64) -> Self {
        let total_pages = total.div_ceil(limit.max(1));
        let prev = page.saturating_sub(1);
        let next = page.saturating_add(1);
        let last_item = page.saturating_mul(limit);

        let pages = Pages {
            current: page,
            prev,
            has_prev: prev != 0,
            next,
            has_next: next <= total_pages,
            total: total_pages,
        };

        let items = Items {
            limit,
            begin: last_item.saturating_sub(limit).saturating_add(1).min(total),
            end: last_item.min(total),
            total,
        };

        Self { data, pages, items }
    }
}

// =============================================================================
// Status ids
// =============================================================================

/// Derive a status id from its pivot and name
///
/// `("Account", "Happy")` becomes `"account-happy"`.
pub fn status_id(pivot: &str, name: &str) -> String {
    let mut slug = String::with_capacity(pivot.len() + name.len() + 1);
    for ch in format!("{pivot} {name}").chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_id_slugs_pivot_and_name() {
        assert_eq!(status_id("Account", "Happy"), "account-happy");
        assert_eq!(status_id("Admin", "  Out of  Office! "), "admin-out-of-office");
    }

    #[test]
    fn paginate_clamps_item_range_to_total() {
        let result = PagedResult::paginate(vec![Document::new()], 2, 2, 3);

        assert_eq!(result.pages.total, 2);
        assert!(result.pages.has_prev);
        assert!(!result.pages.has_next);
        assert_eq!(result.items.begin, 3);
        assert_eq!(result.items.end, 3);
    }

    #[test]
    fn paginate_empty_collection() {
        let result = PagedResult::paginate(Vec::new(), 20, 1, 0);

        assert_eq!(result.pages.total, 0);
        assert!(!result.pages.has_prev);
        assert!(!result.pages.has_next);
        assert_eq!(result.items.begin, 0);
        assert_eq!(result.items.end, 0);
    }

    #[test]
    fn paginate_saturates_on_huge_page() {
        let result = PagedResult::paginate(Vec::new(), 100, u64::MAX / 50, 3);
        assert_eq!(result.items.begin, 3);
        assert_eq!(result.items.end, 3);

        let result = PagedResult::paginate(Vec::new(), 20, u64::MAX, 3);
        assert_eq!(result.pages.next, u64::MAX);
        assert!(!result.pages.has_next);
        assert!(result.pages.has_prev);
    }

    #[test]
    fn paged_result_without_metadata_deserializes() {
        let result: PagedResult =
            serde_json::from_value(serde_json::json!({ "data": [{}, {}] })).unwrap();

        assert_eq!(result.data.len(), 2);
        assert_eq!(result.pages, Pages::default());
    }
}
