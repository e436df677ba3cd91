//! Storage backend abstraction for the document store.
//!
//! This module defines the trait that abstracts over storage implementations, letting the
//! service run against MongoDB in production and an in-memory map in development and tests.
//!
//! # Overview
//!
//! The [`StoreBackend`] trait provides a unified async interface for the document operations
//! the service needs: listing, single lookup, insertion, find-and-update, find-and-delete,
//! plus index management and connectivity checks. Implementations are required to be
//! thread-safe (`Send + Sync`) and are shared across requests behind an `Arc`.
//!
//! # Examples
//!
//! ```ignore
//! use chardex_core::{backend::StoreBackend, query::Filter};
//! use bson::doc;
//!
//! let backend = MyBackendImpl::new();
//!
//! let id = backend.insert_document(doc! { "name": "Gon" }, "characters").await?;
//! let found = backend
//!     .find_one_document(Filter::eq_ignore_case("name", "gon"), "characters")
//!     .await?;
//! assert_eq!(found.map(|doc| doc.id), Some(id));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use bson::{Document as BsonDocument, oid::ObjectId};
use std::fmt::Debug;

use crate::{document::RawDocument, error::DocumentStoreResult, query::Expr};

/// Abstract interface for document storage backends.
///
/// # Ordering
///
/// "First match" means first in the backend's natural order: insertion order for the
/// in-memory backend, natural (on-disk) order for MongoDB. Every single-document
/// operation acts on that first match only.
///
/// # Error Handling
///
/// Operations return [`DocumentStoreResult<T>`](crate::error::DocumentStoreResult).
/// Backends report unreachable servers as
/// [`Unavailable`](crate::error::DocumentStoreError::Unavailable) and unique index
/// violations as [`DuplicateKey`](crate::error::DocumentStoreError::DuplicateKey).
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Returns the documents of a collection, optionally restricted by a filter.
    ///
    /// A collection that does not exist yet yields an empty list.
    async fn find_documents(
        &self,
        filter: Option<Expr>,
        collection: &str,
    ) -> DocumentStoreResult<Vec<RawDocument>>;

    /// Returns the first document matching `filter`, if any.
    async fn find_one_document(
        &self,
        filter: Expr,
        collection: &str,
    ) -> DocumentStoreResult<Option<RawDocument>>;

    /// Inserts a new document and returns the identifier the backend assigned to it.
    ///
    /// No existence check is made: two documents with identical bodies are both stored.
    /// The collection is created on first insert.
    async fn insert_document(
        &self,
        document: BsonDocument,
        collection: &str,
    ) -> DocumentStoreResult<ObjectId>;

    /// Merges `patch` into the first document matching `filter` and returns the
    /// document as it is after the update.
    ///
    /// Keys present in `patch` overwrite or extend the stored document; every other key
    /// is left untouched. An empty patch leaves the document unchanged. Returns `None`
    /// when nothing matches.
    async fn find_one_and_update(
        &self,
        filter: Expr,
        patch: BsonDocument,
        collection: &str,
    ) -> DocumentStoreResult<Option<RawDocument>>;

    /// Removes the first document matching `filter` and returns it, or `None` when
    /// nothing matches.
    async fn find_one_and_delete(
        &self,
        filter: Expr,
        collection: &str,
    ) -> DocumentStoreResult<Option<RawDocument>>;

    /// Creates an index on a field in a collection.
    ///
    /// Unique indexes only consider string values, and compare them ignoring case.
    /// Documents where the field is missing or not a string are never in conflict.
    /// Creating an index that already exists is not an error.
    async fn add_index(
        &self,
        collection: &str,
        field: &str,
        unique: bool,
    ) -> DocumentStoreResult<()>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> DocumentStoreResult<()>;

    /// Releases connections and other resources held by the backend.
    ///
    /// The default implementation is a no-op; backends with external connections
    /// should override it.
    async fn shutdown(&self) -> DocumentStoreResult<()> {
        Ok(())
    }
}

/// Factory trait for creating backend instances.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend>;
}
