//! Document store and listing feed configuration

use serde::{Deserialize, Serialize};

/// Which document store implementation backs the services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local store, data is lost on restart
    Memory,
    /// JSON documents in a MySQL table
    #[serde(rename = "mysql")]
    MySql,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::MySql => "mysql",
        }
    }
}

/// How the fetcher decides that a page is the last one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndOfResultsPolicy {
    /// Ask the store for one extra record and trim it. A final page that is
    /// exactly full is reported as the end.
    LookAhead,
    /// A page shorter than the page size is the end. A final page that is
    /// exactly full advertises one more (empty) page.
    PageNotFull,
}

impl Default for EndOfResultsPolicy {
    fn default() -> Self {
        EndOfResultsPolicy::LookAhead
    }
}

/// Document store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Store implementation
    #[serde(default = "default_backend")]
    pub backend: StoreBackend,

    /// Upper bound for a single page fetch in milliseconds
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// End-of-results detection
    #[serde(default)]
    pub end_of_results: EndOfResultsPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            end_of_results: EndOfResultsPolicy::default(),
        }
    }
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            ..Default::default()
        }
    }

    pub fn mysql() -> Self {
        Self {
            backend: StoreBackend::MySql,
            ..Default::default()
        }
    }

    pub fn fetch_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.fetch_timeout_ms)
    }
}

/// Page sizes for each browsing screen
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    /// Listings per page when browsing a category
    #[serde(default = "default_category_page_size")]
    pub category_page_size: u32,

    /// Listings per page on the offers screen
    #[serde(default = "default_offers_page_size")]
    pub offers_page_size: u32,

    /// Number of slides in the homepage carousel
    #[serde(default = "default_carousel_size")]
    pub carousel_size: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            category_page_size: default_category_page_size(),
            offers_page_size: default_offers_page_size(),
            carousel_size: default_carousel_size(),
        }
    }
}

fn default_backend() -> StoreBackend {
    StoreBackend::Memory
}

fn default_fetch_timeout_ms() -> u64 {
    10_000
}

fn default_category_page_size() -> u32 {
    10
}

fn default_offers_page_size() -> u32 {
    1
}

fn default_carousel_size() -> u32 {
    5
}
