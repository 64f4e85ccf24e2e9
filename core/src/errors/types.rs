//! Error types of the document store, decoding and fetch layers

use thiserror::Error;

/// Failures reported by a document store implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Document store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Collection not found: {collection}")]
    CollectionNotFound { collection: String },

    #[error("Invalid query: {message}")]
    InvalidQuery { message: String },

    #[error("Stored data could not be decoded: {message}")]
    Decode { message: String },

    #[error("Document already exists: {collection}/{id}")]
    Conflict { collection: String, id: String },

    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn conflict(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::Conflict {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

/// A stored document does not have the shape its record type expects
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Document {id} is missing field '{field}'")]
    MissingField { id: String, field: String },

    #[error("Document {id} field '{field}' is not a {expected}")]
    WrongType {
        id: String,
        field: String,
        expected: String,
    },

    #[error("Document {id} field '{field}' is invalid: {message}")]
    InvalidValue {
        id: String,
        field: String,
        message: String,
    },
}

impl DocumentError {
    pub fn missing_field(id: &str, field: &str) -> Self {
        Self::MissingField {
            id: id.to_string(),
            field: field.to_string(),
        }
    }

    pub fn wrong_type(id: &str, field: &str, expected: &str) -> Self {
        Self::WrongType {
            id: id.to_string(),
            field: field.to_string(),
            expected: expected.to_string(),
        }
    }

    pub fn invalid_value(id: &str, field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            id: id.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// A continuation token could not be decoded or produced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    #[error("Invalid cursor: {reason}")]
    Invalid { reason: String },

    #[error("Could not encode cursor: {reason}")]
    Encode { reason: String },
}

impl CursorError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }

    pub fn encode(reason: impl Into<String>) -> Self {
        Self::Encode {
            reason: reason.into(),
        }
    }
}

/// The single failure of a page fetch
///
/// Network, permission, query and decoding problems are not told apart;
/// `message` only carries the underlying description for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Could not fetch {collection}: {message}")]
pub struct FetchFailed {
    pub collection: String,
    pub message: String,
}

impl FetchFailed {
    pub fn new(collection: impl Into<String>, message: impl ToString) -> Self {
        Self {
            collection: collection.into(),
            message: message.to_string(),
        }
    }
}
