//! Convenient re-exports of commonly used types from chardex.
//!
//! ```ignore
//! use chardex::prelude::*;
//! ```

pub use chardex_core::{
    collection::Collection,
    store::DocumentStore,
    document::{Document, DocumentExt, RawDocument, Stored, ID_FIELD},
    backend::{StoreBackend, StoreBackendBuilder},
    query::{QueryVisitor, Expr, FieldOp, Filter},
    error::{DocumentStoreError, DocumentStoreResult},
};
