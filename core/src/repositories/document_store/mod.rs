//! Document store module.

mod r#trait;
pub use r#trait::DocumentStore;

mod memory;
pub use memory::InMemoryDocumentStore;

#[cfg(test)]
mod tests;
