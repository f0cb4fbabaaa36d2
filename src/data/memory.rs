//! In-memory document store
//!
//! Volatile; cleared on restart. Backs the binary when no other store is
//! injected.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::models::{Document, ID_FIELD, PagedQuery, PagedResult, status_id};
use super::store::{StatusStore, StoreError};

/// Status documents keyed by id
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<String, Document>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub async fn count(&self) -> usize {
        self.documents.read().await.len()
    }
}

fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(a), Some(b)) => a.to_string().cmp(&b.to_string()),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn project(document: &Document, fields: Option<&str>) -> Document {
    let Some(fields) = fields else {
        return document.clone();
    };

    let wanted: Vec<&str> = fields.split_whitespace().collect();
    if wanted.is_empty() {
        return document.clone();
    }

    document
        .iter()
        .filter(|(key, _)| key.as_str() == ID_FIELD || wanted.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[async_trait]
impl StatusStore for MemoryStore {
    async fn paged_find(&self, query: PagedQuery) -> Result<PagedResult, StoreError> {
        if query.limit == 0 || query.page == 0 {
            return Err(StoreError::Backend(anyhow::anyhow!(
                "limit and page must be at least 1"
            )));
        }

        let documents = self.documents.read().await;
        let mut matching: Vec<&Document> = documents
            .values()
            .filter(|document| matches_filter(document, &query.filter))
            .collect();

        let (key, descending) = match query.sort.strip_prefix('-') {
            Some(key) => (key, true),
            None => (query.sort.as_str(), false),
        };
        matching.sort_by(|a, b| {
            let ordering = compare_values(a.get(key), b.get(key));
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });

        let total = matching.len() as u64;
        let skip = usize::try_from((query.page - 1).saturating_mul(query.limit))
            .unwrap_or(usize::MAX);
        let data = matching
            .into_iter()
            .skip(skip)
            .take(usize::try_from(query.limit).unwrap_or(usize::MAX))
            .map(|document| project(document, query.fields.as_deref()))
            .collect();

        Ok(PagedResult::paginate(data, query.limit, query.page, total))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self.documents.read().await.get(id).cloned())
    }

    async fn create(&self, pivot: &str, name: &str) -> Result<Document, StoreError> {
        let id = status_id(pivot, name);
        if id.is_empty() {
            return Err(StoreError::Backend(anyhow::anyhow!(
                "pivot and name produce an empty id"
            )));
        }

        let mut documents = self.documents.write().await;
        if documents.contains_key(&id) {
            return Err(StoreError::Duplicate(id));
        }

        let mut document = Document::new();
        document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        document.insert("pivot".to_string(), Value::String(pivot.to_string()));
        document.insert("name".to_string(), Value::String(name.to_string()));

        documents.insert(id, document.clone());
        Ok(document)
    }

    async fn find_by_id_and_update(
        &self,
        id: &str,
        update: Document,
    ) -> Result<Option<Document>, StoreError> {
        let mut documents = self.documents.write().await;
        let Some(document) = documents.get_mut(id) else {
            return Ok(None);
        };

        for (key, value) in update {
            // The id is immutable once assigned
            if key != ID_FIELD {
                document.insert(key, value);
            }
        }

        Ok(Some(document.clone()))
    }

    async fn find_by_id_and_remove(&self, id: &str) -> Result<u64, StoreError> {
        let removed = self.documents.write().await.remove(id);
        Ok(u64::from(removed.is_some()))
    }
}
