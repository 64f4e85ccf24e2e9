//! Backend-independent continuation cursor for sorted, filtered scans.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use hm_shared::types::SortOrder;

use crate::errors::CursorError;

use super::document::Document;
use super::field_value::FieldValue;

/// Position just after the last record of a page
///
/// A cursor is only meaningful for the filter and sort configuration that
/// produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageCursor {
    /// Sort key of the last returned record
    #[serde(rename = "lastSortKey")]
    pub last_sort_key: FieldValue,

    /// Id of the last returned record, breaks ties on the sort key
    #[serde(rename = "lastId")]
    pub last_id: String,
}

impl PageCursor {
    pub fn new(last_sort_key: impl Into<FieldValue>, last_id: impl Into<String>) -> Self {
        Self {
            last_sort_key: last_sort_key.into(),
            last_id: last_id.into(),
        }
    }

    /// Cursor positioned on `document` for a scan sorted by `sort_field`
    pub fn at(document: &Document, sort_field: &str) -> Self {
        Self {
            last_sort_key: document.get(sort_field).cloned().unwrap_or(FieldValue::Null),
            last_id: document.id.clone(),
        }
    }

    /// Where a record with the given sort key and id falls relative to the
    /// cursor, in scan order. `Greater` means the record comes after it.
    pub fn position_of(&self, sort_key: &FieldValue, id: &str, order: SortOrder) -> Ordering {
        let by_key = order.apply(sort_key.compare(&self.last_sort_key));
        if by_key != Ordering::Equal {
            return by_key;
        }
        order.apply(id.cmp(self.last_id.as_str()))
    }

    /// Encode as an opaque URL-safe token
    pub fn encode(&self) -> Result<String, CursorError> {
        // Serializing a FieldValue/String struct does not fail in practice
        let json = serde_json::to_vec(self).map_err(|e| CursorError::encode(e.to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// Decode a token produced by [`PageCursor::encode`]
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        if token.trim().is_empty() {
            return Err(CursorError::invalid("empty cursor token"));
        }
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|e| CursorError::invalid(format!("not base64: {}", e)))?;
        let cursor: PageCursor = serde_json::from_slice(&bytes)
            .map_err(|e| CursorError::invalid(format!("malformed payload: {}", e)))?;
        if cursor.last_id.is_empty() {
            return Err(CursorError::invalid("cursor has no record id"));
        }
        Ok(cursor)
    }
}
