//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Response for cursor-based pagination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorPaginatedResponse<T> {
    /// The data items
    pub data: Vec<T>,

    /// Opaque token for the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,

    /// Whether there are more items
    pub has_more: bool,
}

impl<T> CursorPaginatedResponse<T> {
    /// Create a page response; `has_more` follows the presence of a cursor
    pub fn new(data: Vec<T>, next_cursor: Option<String>) -> Self {
        let has_more = next_cursor.is_some();
        Self {
            data,
            next_cursor,
            has_more,
        }
    }

    /// Create an empty, final page
    pub fn empty() -> Self {
        Self::new(Vec::new(), None)
    }

    /// Transform the data items using a function
    pub fn map<U, F>(self, f: F) -> CursorPaginatedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        CursorPaginatedResponse {
            data: self.data.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
            has_more: self.has_more,
        }
    }

    /// Check if the response is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
