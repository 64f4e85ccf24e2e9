//! Shared utilities and common types for HomeMarket server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Validation helpers
//! - Sorting, pagination and response envelopes

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CorsConfig, DatabaseConfig, EndOfResultsPolicy, Environment, FeedConfig,
    LoggingConfig, ServerConfig, StoreBackend, StoreConfig,
};
pub use errors::{error_codes, ApiResult, ErrorResponse, IntoErrorResponse};
pub use types::{
    ApiResponse, CursorPaginatedResponse, HealthResponse, SortOrder, SortParams, Timestamp,
};
pub use utils::validation;
