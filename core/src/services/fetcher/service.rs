//! Paginated fetcher implementation

use std::sync::Arc;

use hm_shared::config::EndOfResultsPolicy;

use crate::domain::value_objects::{
    Document, FetchRequest, FetchResult, FromDocument, PageCursor, PageSize, StoreQuery,
};
use crate::errors::FetchFailed;
use crate::repositories::DocumentStore;

use super::config::FetcherConfig;

/// Retrieves one page of records at a time from a document store
///
/// Every call is an independent read: the fetcher keeps no state between
/// pages, the caller carries the cursor.
pub struct PaginatedFetcher<S: DocumentStore + ?Sized> {
    store: Arc<S>,
    config: FetcherConfig,
}

impl<S: DocumentStore + ?Sized> Clone for PaginatedFetcher<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<S: DocumentStore + ?Sized> PaginatedFetcher<S> {
    pub fn new(store: Arc<S>, config: FetcherConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetch one page described by `request`
    ///
    /// Records are decoded into `R`. Every failure, whether the store could
    /// not be reached, rejected the query, timed out or returned a document
    /// that does not decode, is reported as [`FetchFailed`].
    pub async fn fetch_page<R: FromDocument>(
        &self,
        request: &FetchRequest,
    ) -> Result<FetchResult<R>, FetchFailed> {
        let collection = request.collection.as_str();
        let query = self.build_query(request)?;

        let documents = match tokio::time::timeout(self.config.timeout, self.store.query(&query)).await
        {
            Ok(Ok(documents)) => documents,
            Ok(Err(e)) => {
                tracing::warn!(
                    collection = %collection,
                    backend = self.store.backend_name(),
                    error = %e,
                    "Page fetch failed"
                );
                return Err(FetchFailed::new(collection, e));
            }
            Err(_) => {
                tracing::warn!(
                    collection = %collection,
                    timeout_ms = self.config.timeout.as_millis() as u64,
                    "Page fetch timed out"
                );
                return Err(FetchFailed::new(
                    collection,
                    format!("timed out after {} ms", self.config.timeout.as_millis()),
                ));
            }
        };

        let (documents, next_cursor) = self.split_page(request, documents);

        let items = documents
            .into_iter()
            .map(R::from_document)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                tracing::warn!(collection = %collection, error = %e, "Undecodable document in page");
                FetchFailed::new(collection, e)
            })?;

        tracing::debug!(
            collection = %collection,
            filter = request.filter.as_ref().map(|f| f.field.as_str()).unwrap_or("-"),
            page_size = ?request.page_size.limit(),
            items = items.len(),
            has_more = next_cursor.is_some(),
            "Fetched page"
        );

        Ok(FetchResult { items, next_cursor })
    }

    fn build_query(&self, request: &FetchRequest) -> Result<StoreQuery, FetchFailed> {
        if request.collection.trim().is_empty() {
            return Err(FetchFailed::new("", "collection name must not be empty"));
        }
        if request.sort.field.trim().is_empty() {
            return Err(FetchFailed::new(&request.collection, "sort field must not be empty"));
        }

        let limit = match request.page_size {
            PageSize::Limited(0) => {
                return Err(FetchFailed::new(&request.collection, "page size must be positive"));
            }
            PageSize::Limited(n) => Some(match self.config.end_of_results {
                EndOfResultsPolicy::LookAhead => n.saturating_add(1),
                EndOfResultsPolicy::PageNotFull => n,
            }),
            PageSize::Unbounded => None,
        };

        Ok(StoreQuery {
            collection: request.collection.clone(),
            filter: request.filter.clone(),
            sort: request.sort.clone(),
            start_after: request.after.clone(),
            limit,
        })
    }

    /// Trim the look-ahead record and work out the next cursor
    fn split_page(
        &self,
        request: &FetchRequest,
        mut documents: Vec<Document>,
    ) -> (Vec<Document>, Option<PageCursor>) {
        let Some(page_size) = request.page_size.limit().map(|n| n as usize) else {
            return (documents, None);
        };

        let has_more = match self.config.end_of_results {
            EndOfResultsPolicy::LookAhead => {
                let more = documents.len() > page_size;
                documents.truncate(page_size);
                more
            }
            EndOfResultsPolicy::PageNotFull => documents.len() == page_size,
        };

        let next_cursor = if has_more {
            documents
                .last()
                .map(|last| PageCursor::at(last, &request.sort.field))
        } else {
            None
        };

        (documents, next_cursor)
    }
}
