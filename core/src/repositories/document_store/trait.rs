//! Document store trait defining the persistence boundary for records.
//!
//! Records live in named collections as schemaless [`Document`]s. The store
//! executes filtered, sorted, cursor-resumed scans and single-document writes;
//! typing and pagination policy are layered on top by the services.

use async_trait::async_trait;

use crate::domain::value_objects::{Document, Fields, StoreQuery};
use crate::errors::StoreError;

/// Repository trait for document persistence
///
/// # Query contract
///
/// `query` returns the documents of `query.collection` that
/// - match `query.filter` when one is given,
/// - carry the `query.sort.field` field,
/// - come strictly after `query.start_after` in scan order when given,
///
/// ordered by the sort field and then by document id, both in
/// `query.sort.order`, truncated to `query.limit` documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Run a sorted, filtered scan
    async fn query(&self, query: &StoreQuery) -> Result<Vec<Document>, StoreError>;

    /// Find a document by id
    ///
    /// # Returns
    /// * `Ok(Some(Document))` - Document found
    /// * `Ok(None)` - No document with this id in the collection
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Insert a new document, failing with `Conflict` when the id is taken
    async fn insert(&self, collection: &str, document: Document) -> Result<Document, StoreError>;

    /// Merge `fields` into an existing document, failing with `NotFound`
    /// when it does not exist
    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<Document, StoreError>;

    /// Merge `fields` into a document, creating it when missing
    async fn upsert(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<Document, StoreError>;

    /// Delete a document
    ///
    /// # Returns
    /// * `Ok(true)` - Document was deleted
    /// * `Ok(false)` - Document did not exist
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError>;

    /// Short backend name for logs and health output
    fn backend_name(&self) -> &'static str;
}
