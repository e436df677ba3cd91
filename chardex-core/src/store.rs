//! Shared document store handle.
//!
//! [`DocumentStore`] owns one backend behind an `Arc`, so cloning it is cheap and every
//! clone talks to the same connection (or the same in-memory data).
//!
//! # Example
//!
//! ```ignore
//! use chardex_core::store::DocumentStore;
//!
//! let store = DocumentStore::new(backend);
//! let characters = store.collection::<CharacterRecord>();
//! ```

use std::sync::Arc;

use crate::{
    backend::StoreBackend,
    collection::Collection,
    document::Document,
    error::DocumentStoreResult,
};

/// A document store bound to a backend chosen at runtime.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    backend: Arc<dyn StoreBackend>,
}

impl DocumentStore {
    /// Creates a new document store with the given backend.
    pub fn new(backend: impl StoreBackend + 'static) -> Self {
        Self { backend: Arc::new(backend) }
    }

    /// Gets a typed collection for the specified document type.
    ///
    /// The collection name is determined by the document type's `collection_name()` method.
    pub fn collection<D: Document>(&self) -> Collection<'_, D> {
        Collection::new(D::collection_name().to_string(), &*self.backend)
    }

    /// Adds an index to a field in a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the index, e.g. because existing documents
    /// already violate a requested uniqueness constraint.
    pub async fn add_index(
        &self,
        collection: &str,
        field: &str,
        unique: bool,
    ) -> DocumentStoreResult<()> {
        self.backend
            .add_index(collection, field, unique)
            .await
    }

    /// Checks that the backend is reachable.
    pub async fn ping(&self) -> DocumentStoreResult<()> {
        self.backend.ping().await
    }

    /// Shuts down the backend and releases its resources.
    ///
    /// Other clones of this store must not be used afterwards.
    pub async fn shutdown(&self) -> DocumentStoreResult<()> {
        self.backend.shutdown().await
    }
}
