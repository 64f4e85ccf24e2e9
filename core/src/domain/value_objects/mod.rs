//! Value objects: the document model, cursors and query descriptions.

pub mod cursor;
pub mod document;
pub mod field_value;
pub mod query;

// Re-export commonly used types
pub use cursor::PageCursor;
pub use document::{Document, Fields, FromDocument};
pub use field_value::FieldValue;
pub use query::{EqualityFilter, FetchRequest, FetchResult, PageSize, StoreQuery};
