//! Error types and result types for document store operations.
//!
//! This module provides the error type shared by every backend and by the collection layer.
//! Use [`DocumentStoreResult<T>`] as the return type for fallible operations.

use bson::error::Error as BsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a document store.
///
/// Callers that need to react differently to connectivity problems, uniqueness violations
/// and everything else can match on the variant; the message is meant for logs only.
#[derive(Error, Debug)]
pub enum DocumentStoreError {
    /// Serialization/deserialization error when converting between Rust types and BSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during store initialization or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// A document handed to the store cannot be written (it does not encode to a BSON map).
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// A write would break a unique index.
    /// The first argument is the indexed field, the second is the collection name.
    #[error("Duplicate value for {0} in collection {1}")]
    DuplicateKey(String, String),
    /// The backend could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

impl From<BsonError> for DocumentStoreError {
    fn from(err: BsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}
