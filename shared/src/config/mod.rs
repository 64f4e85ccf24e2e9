//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `database` - MySQL connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration
//! - `store` - Document store backend, fetch behavior and feed page sizes

pub mod database;
pub mod environment;
pub mod server;
pub mod store;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};
pub use store::{EndOfResultsPolicy, FeedConfig, StoreBackend, StoreConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (used by the MySQL store backend)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Document store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Page sizes of the browsing screens
    #[serde(default)]
    pub feeds: FeedConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            store: StoreConfig::default(),
            feeds: FeedConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::new("127.0.0.1", 8080),
            database: DatabaseConfig::new("mysql://localhost:3306/homemarket_dev"),
            store: StoreConfig::in_memory(),
            feeds: FeedConfig::default(),
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            database: DatabaseConfig::new("mysql://prod-db:3306/homemarket")
                .with_max_connections(50),
            store: StoreConfig::mysql(),
            feeds: FeedConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load the preset matching the environment variables
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::production();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let dev = AppConfig::development();
        assert_eq!(dev.store.backend, StoreBackend::Memory);
        assert_eq!(dev.feeds.category_page_size, 10);

        let prod = AppConfig::production();
        assert_eq!(prod.store.backend, StoreBackend::MySql);
        assert_eq!(prod.database.max_connections, 50);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let json = serde_json::json!({
            "environment": "production",
            "feeds": { "offers_page_size": 4 }
        });
        let config: AppConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.feeds.offers_page_size, 4);
        assert_eq!(config.feeds.category_page_size, 10);
        assert_eq!(config.store.end_of_results, EndOfResultsPolicy::LookAhead);
    }
}
