//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the HomeMarket
//! backend. It provides the concrete document store backends, database
//! access and configuration loading.
//!
//! ## Architecture
//!
//! - **Database**: MySQL document store using SQLx
//! - **Config**: layered configuration loading (`.env`, files, environment)
//! - **Store**: selection of the document store backend from configuration
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use hm_core::errors::StoreError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

pub mod config;
pub mod store;

pub use config::load_config;
pub use store::build_store;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration could not be read or deserialized
    #[error("Configuration error: {0}")]
    ConfigLoad(#[from] ::config::ConfigError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document store error during setup
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
