//! Typed, collection-scoped access to a document store.
//!
//! A [`Collection`] borrows the store's backend and converts between `D` and the raw BSON
//! maps backends deal in. It is cheap to create, so callers typically build one per request.
//!
//! # Example
//!
//! ```ignore
//! let characters = store.collection::<CharacterRecord>();
//!
//! let created = characters.insert_one(record).await?;
//! let found = characters
//!     .find_one(Filter::eq_ignore_case("name", "gon freecss"))
//!     .await?;
//! ```

use std::marker::PhantomData;

use crate::{
    backend::StoreBackend,
    document::{Document, DocumentExt, RawDocument, Stored},
    error::DocumentStoreResult,
    query::Expr,
};

/// A typed collection with a reference to a storage backend.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the backend reference
/// * `D` - The document type stored in this collection
#[derive(Debug)]
pub struct Collection<'a, D: Document> {
    name: String,
    backend: &'a dyn StoreBackend,
    _marker: PhantomData<D>,
}

impl<'a, D: Document> Collection<'a, D> {
    pub(crate) fn new(name: String, backend: &'a dyn StoreBackend) -> Self {
        Self { name, backend, _marker: PhantomData }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns every document in the collection, in store order.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`](crate::error::DocumentStoreError) if the backend
    /// fails or a stored document cannot be deserialized into `D`.
    pub async fn find_all(&self) -> DocumentStoreResult<Vec<Stored<D>>> {
        self.backend
            .find_documents(None, self.name())
            .await?
            .into_iter()
            .map(RawDocument::into_typed)
            .collect()
    }

    /// Returns the first document matching `filter`.
    pub async fn find_one(&self, filter: Expr) -> DocumentStoreResult<Option<Stored<D>>> {
        self.backend
            .find_one_document(filter, self.name())
            .await?
            .map(RawDocument::into_typed)
            .transpose()
    }

    /// Inserts `document` and returns it together with its newly assigned identifier.
    ///
    /// The returned document is read back from what was written, so fields that do not
    /// survive serialization are not reported as stored.
    pub async fn insert_one(&self, document: D) -> DocumentStoreResult<Stored<D>> {
        let body = document.to_bson_document()?;
        let id = self
            .backend
            .insert_document(body.clone(), self.name())
            .await?;

        RawDocument::new(id, body).into_typed()
    }

    /// Merges the serialized fields of `patch` into the first document matching `filter`.
    ///
    /// Fields that `patch` skips when serializing are left as they are in the store.
    /// Returns the updated document, or `None` when nothing matches.
    pub async fn find_one_and_update(
        &self,
        filter: Expr,
        patch: D,
    ) -> DocumentStoreResult<Option<Stored<D>>> {
        self.backend
            .find_one_and_update(filter, patch.to_bson_document()?, self.name())
            .await?
            .map(RawDocument::into_typed)
            .transpose()
    }

    /// Removes the first document matching `filter` and returns it.
    pub async fn find_one_and_delete(&self, filter: Expr) -> DocumentStoreResult<Option<Stored<D>>> {
        self.backend
            .find_one_and_delete(filter, self.name())
            .await?
            .map(RawDocument::into_typed)
            .transpose()
    }
}
