//! Main chardex storage crate providing a unified interface over the character store.
//!
//! This crate re-exports the core types from the sub-crates and gives access to the
//! available storage backends, so the service only depends on one crate.
//!
//! # Quick Start
//!
//! ```ignore
//! use chardex::{prelude::*, memory::InMemoryStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Character {
//!     pub name: String,
//! }
//!
//! impl Document for Character {
//!     fn collection_name() -> &'static str { "characters" }
//! }
//!
//! #[tokio::main]
//! async fn main() -> DocumentStoreResult<()> {
//!     let store = DocumentStore::new(InMemoryStore::builder().build().await?);
//!     let characters = store.collection::<Character>();
//!
//!     let created = characters
//!         .insert_one(Character { name: "Gon".to_string() })
//!         .await?;
//!
//!     // Lookups by name ignore case and match the whole value
//!     let found = characters
//!         .find_one(Filter::eq_ignore_case("name", "GON"))
//!         .await?;
//!     assert_eq!(found.map(|stored| stored.id), Some(created.id));
//!
//!     store.shutdown().await
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - In-memory storage for development and testing
//! - `mongodb` - Persistent MongoDB backend (requires the `mongodb` feature)

pub mod prelude;

pub use chardex_core::{collection, document, store, backend, query, error};

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend implementations.
pub mod memory {
    pub use chardex_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use chardex_mongodb::{MongoDbStore, MongoDbStoreBuilder};
}
