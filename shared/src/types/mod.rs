//! Type definitions module with domain-specific sub-modules
//!
//! This module organizes types into logical categories:
//! - `common` - Sorting and timestamp types
//! - `pagination` - Cursor pagination envelopes for list endpoints
//! - `response` - API response wrappers and health checks

pub mod common;
pub mod pagination;
pub mod response;

// Re-export commonly used types at module level
pub use common::{SortOrder, SortParams, Timestamp, DEFAULT_SORT_FIELD};
pub use pagination::CursorPaginatedResponse;
pub use response::{ApiResponse, HealthResponse, HealthStatus};
