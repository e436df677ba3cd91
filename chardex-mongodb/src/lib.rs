//! MongoDB backend implementation for chardex.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend` trait,
//! persisting documents in a MongoDB database and running filters on the server.
//!
//! To use this backend, include the `mongodb` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! chardex = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Features
//!
//! - **Persistent storage** - Data is persisted to MongoDB Atlas or self-hosted MongoDB
//! - **Server-side filtering** - Filters are translated to MongoDB query documents
//! - **Case-insensitive unique indexes** - Built with a strength-2 collation
//! - **Availability reporting** - Connection and server selection failures surface as
//!   [`Unavailable`](chardex_core::error::DocumentStoreError::Unavailable)
//!
//! # Connection
//!
//! The connection string may name a database in its path
//! (`mongodb://localhost:27017/characters`). When it does not, the builder's fallback
//! database is used.
//!
//! # Example
//!
//! ```ignore
//! use chardex::{backend::StoreBackendBuilder, mongodb::MongoDbStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MongoDbStore::builder("mongodb://localhost:27017/characters", "characters")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as chardex_mongodb;

pub mod store;
pub mod query;
pub mod sanitizer;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
