//! Shared handler helpers

pub mod error;

pub use error::{handle_cursor_error, handle_domain_error, invalid_category};
