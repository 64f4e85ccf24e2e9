//! Query descriptions shared by the fetcher and the document stores.

use hm_shared::types::{SortOrder, SortParams};

use super::cursor::PageCursor;
use super::document::Document;
use super::field_value::FieldValue;

/// `field == value` predicate
#[derive(Debug, Clone, PartialEq)]
pub struct EqualityFilter {
    pub field: String,
    pub value: FieldValue,
}

impl EqualityFilter {
    pub fn new(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, document: &Document) -> bool {
        document
            .get(&self.field)
            .map_or(false, |value| value.matches(&self.value))
    }
}

/// Requested page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    /// At most this many records per page
    Limited(u32),
    /// The whole matching set in one page
    Unbounded,
}

impl PageSize {
    pub fn limit(&self) -> Option<u32> {
        match self {
            PageSize::Limited(n) => Some(*n),
            PageSize::Unbounded => None,
        }
    }
}

impl From<u32> for PageSize {
    fn from(value: u32) -> Self {
        PageSize::Limited(value)
    }
}

/// A query as executed by a [`DocumentStore`](crate::repositories::DocumentStore)
///
/// Results are ordered by `sort.field` and then by document id, both in
/// `sort.order`. Documents lacking the sort field are not part of the result.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreQuery {
    pub collection: String,
    pub filter: Option<EqualityFilter>,
    pub sort: SortParams,
    pub start_after: Option<PageCursor>,
    pub limit: Option<u32>,
}

impl StoreQuery {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filter: None,
            sort: SortParams::default(),
            start_after: None,
            limit: None,
        }
    }
}

/// Input of one paginated fetch
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub collection: String,
    pub filter: Option<EqualityFilter>,
    pub sort: SortParams,
    pub page_size: PageSize,
    pub after: Option<PageCursor>,
}

impl FetchRequest {
    /// Newest-first scan of a whole collection, unbounded
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filter: None,
            sort: SortParams::default(),
            page_size: PageSize::Unbounded,
            after: None,
        }
    }

    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.filter = Some(EqualityFilter::new(field, value));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = SortParams::new(field, order);
        self
    }

    pub fn page_size(mut self, page_size: impl Into<PageSize>) -> Self {
        self.page_size = page_size.into();
        self
    }

    pub fn after(mut self, cursor: Option<PageCursor>) -> Self {
        self.after = cursor;
        self
    }

    /// Same query, resumed from `cursor`
    pub fn resume(&self, cursor: Option<PageCursor>) -> Self {
        self.clone().after(cursor)
    }
}

/// One page of records plus the cursor for the next one
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult<T> {
    /// Records in scan order
    pub items: Vec<T>,
    /// Set when a further page may exist
    pub next_cursor: Option<PageCursor>,
}

impl<T> FetchResult<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
        }
    }

    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U, F>(self, f: F) -> FetchResult<U>
    where
        F: FnMut(T) -> U,
    {
        FetchResult {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = FetchRequest::new("listings");
        assert_eq!(request.sort.field, "timestamp");
        assert_eq!(request.sort.order, SortOrder::Desc);
        assert_eq!(request.page_size, PageSize::Unbounded);
        assert!(request.filter.is_none());
        assert!(request.after.is_none());
    }

    #[test]
    fn test_request_builder() {
        let cursor = PageCursor::new(1i64, "a");
        let request = FetchRequest::new("listings")
            .filter_eq("type", "rent")
            .page_size(10)
            .order_by("name", SortOrder::Asc);
        let resumed = request.resume(Some(cursor.clone()));

        assert_eq!(resumed.after, Some(cursor));
        assert_eq!(resumed.page_size, PageSize::Limited(10));
        assert_eq!(resumed.filter, request.filter);
        assert!(request.after.is_none());
    }

    #[test]
    fn test_filter_matching() {
        let filter = EqualityFilter::new("offer", true);
        assert!(filter.matches(&Document::new("a").field("offer", true)));
        assert!(!filter.matches(&Document::new("b").field("offer", false)));
        assert!(!filter.matches(&Document::new("c")));
    }
}
