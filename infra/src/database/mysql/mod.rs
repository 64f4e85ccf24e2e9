//! MySQL implementations of the core repository traits

mod document_store_impl;
pub mod json_codec;

pub use document_store_impl::MySqlDocumentStore;
