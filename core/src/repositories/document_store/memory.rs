//! In-memory implementation of DocumentStore
//!
//! Used for development, for tests and as the reference for the query
//! contract other backends must follow.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::value_objects::{Document, Fields, StoreQuery};
use crate::errors::StoreError;

use super::r#trait::DocumentStore;

type Collection = BTreeMap<String, Document>;

/// In-memory document store backed by per-collection maps
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with documents in one collection
    pub async fn with_documents(
        collection: &str,
        documents: impl IntoIterator<Item = Document>,
    ) -> Self {
        let store = Self::new();
        store.seed(collection, documents).await;
        store
    }

    /// Put documents into a collection, replacing any with the same id
    pub async fn seed(&self, collection: &str, documents: impl IntoIterator<Item = Document>) {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        for document in documents {
            docs.insert(document.id.clone(), document);
        }
    }

    /// Make every subsequent call fail with `StoreError::Unavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, AtomicOrdering::SeqCst);
    }

    /// Number of documents in a collection
    pub async fn count(&self, collection: &str) -> usize {
        let collections = self.collections.read().await;
        collections.get(collection).map_or(0, |docs| docs.len())
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::unavailable("in-memory store is offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn query(&self, query: &StoreQuery) -> Result<Vec<Document>, StoreError> {
        self.check_available()?;
        if query.sort.field.is_empty() {
            return Err(StoreError::invalid_query("sort field must not be empty"));
        }

        let collections = self.collections.read().await;
        let Some(docs) = collections.get(&query.collection) else {
            return Ok(Vec::new());
        };

        let sort_field = query.sort.field.as_str();
        let order = query.sort.order;

        let mut matching: Vec<&Document> = docs
            .values()
            .filter(|doc| query.filter.as_ref().map_or(true, |f| f.matches(doc)))
            .filter(|doc| doc.has_field(sort_field))
            .collect();

        matching.sort_by(|a, b| {
            let (ka, kb) = (&a.fields[sort_field], &b.fields[sort_field]);
            order.apply(ka.compare(kb).then_with(|| a.id.cmp(&b.id)))
        });

        let limit = query.limit.map_or(usize::MAX, |n| n as usize);
        let page = matching
            .into_iter()
            .filter(|doc| match &query.start_after {
                Some(cursor) => {
                    cursor.position_of(&doc.fields[sort_field], &doc.id, order)
                        == std::cmp::Ordering::Greater
                }
                None => true,
            })
            .take(limit)
            .cloned()
            .collect();

        Ok(page)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.check_available()?;
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|docs| docs.get(id)).cloned())
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<Document, StoreError> {
        self.check_available()?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if docs.contains_key(&document.id) {
            return Err(StoreError::conflict(collection, &document.id));
        }

        docs.insert(document.id.clone(), document.clone());
        Ok(document)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<Document, StoreError> {
        self.check_available()?;
        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;

        document.merge(fields);
        Ok(document.clone())
    }

    async fn upsert(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<Document, StoreError> {
        self.check_available()?;
        let mut collections = self.collections.write().await;
        let document = collections
            .entry(collection.to_string())
            .or_default()
            .entry(id.to_string())
            .or_insert_with(|| Document::new(id));

        document.merge(fields);
        Ok(document.clone())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .map_or(false, |docs| docs.remove(id).is_some()))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
