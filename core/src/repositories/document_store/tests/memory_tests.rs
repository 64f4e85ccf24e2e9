//! Tests for the in-memory document store

use hm_shared::types::{SortOrder, SortParams};

use crate::domain::value_objects::{
    Document, EqualityFilter, Fields, FieldValue, PageCursor, StoreQuery,
};
use crate::errors::StoreError;
use crate::repositories::document_store::{DocumentStore, InMemoryDocumentStore};

fn doc(id: &str, timestamp: i64, kind: &str) -> Document {
    Document::new(id)
        .field("timestamp", timestamp)
        .field("type", kind)
}

async fn seeded() -> InMemoryDocumentStore {
    InMemoryDocumentStore::with_documents(
        "listings",
        vec![
            doc("a", 10, "rent"),
            doc("b", 30, "sale"),
            doc("c", 20, "rent"),
            doc("d", 30, "rent"),
            Document::new("e").field("type", "rent"),
        ],
    )
    .await
}

fn ids(docs: &[Document]) -> Vec<&str> {
    docs.iter().map(|d| d.id.as_str()).collect()
}

#[tokio::test]
async fn test_query_sorts_descending_with_id_tiebreak() {
    let store = seeded().await;
    let query = StoreQuery::new("listings");

    let docs = store.query(&query).await.unwrap();

    // "e" has no timestamp and is left out
    assert_eq!(ids(&docs), vec!["d", "b", "c", "a"]);
}

#[tokio::test]
async fn test_query_ascending() {
    let store = seeded().await;
    let mut query = StoreQuery::new("listings");
    query.sort = SortParams::asc("timestamp");

    let docs = store.query(&query).await.unwrap();
    assert_eq!(ids(&docs), vec!["a", "c", "b", "d"]);
}

#[tokio::test]
async fn test_query_filter_and_limit() {
    let store = seeded().await;
    let mut query = StoreQuery::new("listings");
    query.filter = Some(EqualityFilter::new("type", "rent"));
    query.limit = Some(2);

    let docs = store.query(&query).await.unwrap();
    assert_eq!(ids(&docs), vec!["d", "c"]);
}

#[tokio::test]
async fn test_query_start_after_cursor() {
    let store = seeded().await;
    let mut query = StoreQuery::new("listings");
    query.start_after = Some(PageCursor::new(30i64, "b"));

    let docs = store.query(&query).await.unwrap();
    assert_eq!(ids(&docs), vec!["c", "a"]);

    query.sort.order = SortOrder::Asc;
    query.start_after = Some(PageCursor::new(30i64, "b"));
    let docs = store.query(&query).await.unwrap();
    assert_eq!(ids(&docs), vec!["d"]);
}

#[tokio::test]
async fn test_query_unknown_collection_is_empty() {
    let store = seeded().await;
    let docs = store.query(&StoreQuery::new("missing")).await.unwrap();
    assert!(docs.is_empty());
}

#[tokio::test]
async fn test_query_empty_sort_field_rejected() {
    let store = seeded().await;
    let mut query = StoreQuery::new("listings");
    query.sort.field = String::new();

    let result = store.query(&query).await;
    assert!(matches!(result, Err(StoreError::InvalidQuery { .. })));
}

#[tokio::test]
async fn test_insert_conflict_and_get() {
    let store = InMemoryDocumentStore::new();
    store.insert("listings", doc("x", 1, "sale")).await.unwrap();

    let again = store.insert("listings", doc("x", 2, "sale")).await;
    assert!(matches!(again, Err(StoreError::Conflict { .. })));

    let found = store.get("listings", "x").await.unwrap().unwrap();
    assert_eq!(found.get("timestamp"), Some(&FieldValue::Integer(1)));
    assert!(store.get("listings", "y").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_merges_and_requires_existing() {
    let store = seeded().await;
    let mut fields = Fields::new();
    fields.insert("name".to_string(), FieldValue::from("Loft"));

    let updated = store.update("listings", "a", fields.clone()).await.unwrap();
    assert_eq!(updated.get("name"), Some(&FieldValue::from("Loft")));
    assert_eq!(updated.get("type"), Some(&FieldValue::from("rent")));

    let missing = store.update("listings", "zzz", fields).await;
    assert!(matches!(missing, Err(StoreError::NotFound { .. })));
}

#[tokio::test]
async fn test_upsert_creates_then_merges() {
    let store = InMemoryDocumentStore::new();
    let mut fields = Fields::new();
    fields.insert("name".to_string(), FieldValue::from("Ana"));
    store.upsert("users", "u1", fields).await.unwrap();

    let mut more = Fields::new();
    more.insert("email".to_string(), FieldValue::from("ana@example.com"));
    let merged = store.upsert("users", "u1", more).await.unwrap();

    assert_eq!(merged.get("name"), Some(&FieldValue::from("Ana")));
    assert_eq!(merged.get("email"), Some(&FieldValue::from("ana@example.com")));
    assert_eq!(store.count("users").await, 1);
}

#[tokio::test]
async fn test_delete() {
    let store = seeded().await;
    assert!(store.delete("listings", "a").await.unwrap());
    assert!(!store.delete("listings", "a").await.unwrap());
    assert_eq!(store.count("listings").await, 4);
}

#[tokio::test]
async fn test_unavailable_store_fails_every_call() {
    let store = seeded().await;
    store.set_unavailable(true);

    let result = store.query(&StoreQuery::new("listings")).await;
    assert!(matches!(result, Err(StoreError::Unavailable { .. })));
    assert!(store.get("listings", "a").await.is_err());

    store.set_unavailable(false);
    assert!(store.query(&StoreQuery::new("listings")).await.is_ok());
}
