//! Configuration for the paginated fetcher

use std::time::Duration;

use hm_shared::config::{EndOfResultsPolicy, StoreConfig};

/// Configuration for the paginated fetcher
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Upper bound for one store round trip
    pub timeout: Duration,
    /// How the last page is recognised
    pub end_of_results: EndOfResultsPolicy,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            end_of_results: EndOfResultsPolicy::LookAhead,
        }
    }
}

impl From<&StoreConfig> for FetcherConfig {
    fn from(config: &StoreConfig) -> Self {
        Self {
            timeout: config.fetch_timeout(),
            end_of_results: config.end_of_results,
        }
    }
}

impl FetcherConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_end_of_results(mut self, policy: EndOfResultsPolicy) -> Self {
        self.end_of_results = policy;
        self
    }
}
