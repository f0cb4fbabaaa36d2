//! In-memory store tests

use super::*;
use serde_json::json;

async fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.create("Account", "Happy").await.unwrap();
    store.create("Account", "Sad").await.unwrap();
    store.create("Admin", "Busy").await.unwrap();
    store
}

#[tokio::test]
async fn test_create_assigns_slug_id() {
    let store = MemoryStore::new();

    let created = store.create("Account", "Happy").await.unwrap();
    assert_eq!(created["_id"], "account-happy");
    assert_eq!(created["pivot"], "Account");
    assert_eq!(created["name"], "Happy");
    assert_eq!(store.count().await, 1);
}

#[tokio::test]
async fn test_create_rejects_duplicate_id() {
    let store = MemoryStore::new();
    store.create("Account", "Happy").await.unwrap();

    let result = store.create("account", "happy").await;
    assert!(matches!(result, Err(StoreError::Duplicate(id)) if id == "account-happy"));
}

#[tokio::test]
async fn test_find_by_id() {
    let store = seeded_store().await;

    let found = store.find_by_id("admin-busy").await.unwrap();
    assert_eq!(found.unwrap()["name"], "Busy");

    let missing = store.find_by_id("93EP150D35").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_update_sets_fields_and_keeps_id() {
    let store = seeded_store().await;

    let mut update = Document::new();
    update.insert("name".to_string(), json!("Ecstatic"));
    update.insert("_id".to_string(), json!("hijacked"));

    let updated = store
        .find_by_id_and_update("account-happy", update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated["_id"], "account-happy");
    assert_eq!(updated["name"], "Ecstatic");
    assert!(store.find_by_id("hijacked").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_missing_returns_none() {
    let store = MemoryStore::new();

    let updated = store
        .find_by_id_and_update("nope", Document::new())
        .await
        .unwrap();
    assert!(updated.is_none());
}

#[tokio::test]
async fn test_remove_returns_count() {
    let store = seeded_store().await;

    assert_eq!(store.find_by_id_and_remove("account-sad").await.unwrap(), 1);
    assert_eq!(store.find_by_id_and_remove("account-sad").await.unwrap(), 0);
    assert_eq!(store.count().await, 2);
}

#[tokio::test]
async fn test_paged_find_second_page() {
    let store = seeded_store().await;

    let mut query = PagedQuery::new(2);
    query.page = 2;

    let result = store.paged_find(query).await.unwrap();
    assert_eq!(result.data.len(), 1);
    assert_eq!(result.pages.total, 2);
    assert!(result.pages.has_prev);
    assert!(!result.pages.has_next);
    assert_eq!(result.items.begin, 3);
    assert_eq!(result.items.end, 3);
    assert_eq!(result.items.total, 3);
}

#[tokio::test]
async fn test_paged_find_filters_sorts_and_projects() {
    let store = seeded_store().await;

    let mut query = PagedQuery::new(20);
    query.filter.insert("pivot".to_string(), json!("Account"));
    query.sort = "-name".to_string();
    query.fields = Some("name".to_string());

    let result = store.paged_find(query).await.unwrap();
    let names: Vec<&str> = result
        .data
        .iter()
        .map(|document| document["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Sad", "Happy"]);
    assert!(result.data.iter().all(|document| !document.contains_key("pivot")));
    assert!(result.data.iter().all(|document| document.contains_key("_id")));
}

#[tokio::test]
async fn test_paged_find_rejects_zero_limit() {
    let store = MemoryStore::new();

    let result = store.paged_find(PagedQuery::new(0)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_paged_find_huge_page_is_empty() {
    let store = seeded_store().await;

    let mut query = PagedQuery::new(20);
    query.page = u64::MAX;

    let result = store.paged_find(query).await.unwrap();
    assert!(result.data.is_empty());
    assert_eq!(result.items.total, 3);
    assert!(!result.pages.has_next);
}
