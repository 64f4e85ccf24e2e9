//! Paginated query fetcher
//!
//! One page of a sorted, optionally filtered collection scan per call, plus
//! the cursor to resume it. The browse, carousel and profile screens all read
//! through it.

mod config;
mod service;


pub use config::FetcherConfig;
pub use service::PaginatedFetcher;
