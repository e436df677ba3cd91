//! In-memory document storage backend for chardex.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! It uses async-aware read-write locks for concurrent access and backs local development
//! (`memory://` connection strings) and the service's test suite.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **Insertion order** - "First match" is the first inserted matching document
//! - **Unique indexes** - Emulated with the same case-insensitive semantics as MongoDB
//!
//! # Quick Start
//!
//! ```ignore
//! use chardex::{prelude::*, memory::InMemoryStore};
//!
//! let store = DocumentStore::new(InMemoryStore::builder().build().await?);
//! let characters = store.collection::<CharacterRecord>();
//! ```

#[allow(unused_extern_crates)]
extern crate self as chardex_memory;

pub mod evaluator;
pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
