//! Common type definitions and utilities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp type alias
pub type Timestamp = DateTime<Utc>;

/// Field most list queries sort on
pub const DEFAULT_SORT_FIELD: &str = "timestamp";

/// Sort order for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    /// Listings are always presented newest-first unless asked otherwise
    fn default() -> Self {
        SortOrder::Desc
    }
}

impl SortOrder {
    /// Apply this direction to an ascending comparison result
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "ASC"),
            SortOrder::Desc => write!(f, "DESC"),
        }
    }
}

/// Generic sorting parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortParams {
    /// Field to sort by
    #[serde(default = "default_sort_field")]
    pub field: String,

    /// Sort order
    #[serde(default)]
    pub order: SortOrder,
}

impl Default for SortParams {
    fn default() -> Self {
        Self::desc(DEFAULT_SORT_FIELD)
    }
}

impl SortParams {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Desc)
    }
}

fn default_sort_field() -> String {
    DEFAULT_SORT_FIELD.to_string()
}
