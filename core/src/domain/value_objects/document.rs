//! Schemaless document as held by the document store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::DocumentError;

use super::field_value::FieldValue;

/// Field map of a document
pub type Fields = BTreeMap<String, FieldValue>;

/// A stored record: a unique id plus named field values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier within its collection
    pub id: String,

    /// Field values keyed by field name
    #[serde(default)]
    pub fields: Fields,
}

impl Document {
    /// Create an empty document
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Fields::new(),
        }
    }

    /// Create a document from an existing field map
    pub fn with_fields(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Builder-style field setter
    pub fn field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Overwrite the given fields, keeping all others
    pub fn merge(&mut self, fields: Fields) {
        self.fields.extend(fields);
    }

    /// Check whether the document carries a value for `name`
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Required field accessor for decoders
    pub fn require(&self, name: &str) -> Result<&FieldValue, DocumentError> {
        self.fields
            .get(name)
            .ok_or_else(|| DocumentError::missing_field(&self.id, name))
    }
}

/// Decoding of typed records from raw documents
pub trait FromDocument: Sized {
    fn from_document(document: Document) -> Result<Self, DocumentError>;
}

impl FromDocument for Document {
    fn from_document(document: Document) -> Result<Self, DocumentError> {
        Ok(document)
    }
}
