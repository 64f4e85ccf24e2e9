//! Store doubles and fixtures shared by the service tests

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::domain::entities::{Listing, ListingType, LISTINGS_COLLECTION};
use crate::domain::value_objects::{Document, Fields, StoreQuery};
use crate::errors::StoreError;
use crate::repositories::{DocumentStore, InMemoryDocumentStore};

/// Base time of generated listings; listing `n` is `n` minutes later
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

pub fn listing(id: &str, minute: i64, kind: ListingType, offer: bool, owner: &str) -> Listing {
    Listing {
        id: id.to_string(),
        listing_type: kind,
        name: format!("Listing {}", id),
        offer,
        user_ref: owner.to_string(),
        timestamp: base_time() + Duration::minutes(minute),
        image_urls: vec![format!("https://img.example.com/{}.jpg", id)],
        regular_price: 1000,
        discounted_price: if offer { Some(900) } else { None },
        location: None,
        bedrooms: 2,
        bathrooms: 1,
        parking: false,
        furnished: false,
    }
}

/// `count` rent listings `t1..t<count>`, `t<count>` being the newest
pub fn rent_listings(count: usize) -> Vec<Listing> {
    (1..=count)
        .map(|i| listing(&format!("t{:02}", i), i as i64, ListingType::Rent, false, "owner"))
        .collect()
}

pub async fn store_with(listings: &[Listing]) -> Arc<InMemoryDocumentStore> {
    let store =
        InMemoryDocumentStore::with_documents(LISTINGS_COLLECTION, listings.iter().map(Listing::to_document))
            .await;
    Arc::new(store)
}

/// Store whose every call fails with the given error
pub struct FailingStore {
    error: StoreError,
    calls: AtomicUsize,
}

impl FailingStore {
    pub fn new(error: StoreError) -> Self {
        Self {
            error,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn query(&self, _query: &StoreQuery) -> Result<Vec<Document>, StoreError> {
        self.fail()
    }

    async fn get(&self, _collection: &str, _id: &str) -> Result<Option<Document>, StoreError> {
        self.fail()
    }

    async fn insert(&self, _collection: &str, _document: Document) -> Result<Document, StoreError> {
        self.fail()
    }

    async fn update(&self, _collection: &str, _id: &str, _fields: Fields) -> Result<Document, StoreError> {
        self.fail()
    }

    async fn upsert(&self, _collection: &str, _id: &str, _fields: Fields) -> Result<Document, StoreError> {
        self.fail()
    }

    async fn delete(&self, _collection: &str, _id: &str) -> Result<bool, StoreError> {
        self.fail()
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

/// Store whose queries block until released, counting every query
///
/// Writes pass straight through to the inner in-memory store.
pub struct GatedStore {
    inner: InMemoryDocumentStore,
    gate: Semaphore,
    queries: AtomicUsize,
}

impl GatedStore {
    pub async fn new(listings: &[Listing]) -> Self {
        Self {
            inner: InMemoryDocumentStore::with_documents(
                LISTINGS_COLLECTION,
                listings.iter().map(Listing::to_document),
            )
            .await,
            gate: Semaphore::new(0),
            queries: AtomicUsize::new(0),
        }
    }

    pub fn inner(&self) -> &InMemoryDocumentStore {
        &self.inner
    }

    /// Let `n` pending or future queries through
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Yield until at least `n` queries have reached the gate
    pub async fn wait_for_queries(&self, n: usize) {
        while self.queries() < n {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl DocumentStore for GatedStore {
    async fn query(&self, query: &StoreQuery) -> Result<Vec<Document>, StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| StoreError::unavailable(e.to_string()))?;
        permit.forget();
        self.inner.query(query).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.inner.get(collection, id).await
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<Document, StoreError> {
        self.inner.insert(collection, document).await
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<Document, StoreError> {
        self.inner.update(collection, id, fields).await
    }

    async fn upsert(&self, collection: &str, id: &str, fields: Fields) -> Result<Document, StoreError> {
        self.inner.upsert(collection, id, fields).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        self.inner.delete(collection, id).await
    }

    fn backend_name(&self) -> &'static str {
        "gated"
    }
}
