//! A thin document store layer that gives the character service one uniform interface
//! over interchangeable storage backends.
//!
//! This crate is the core of the chardex project and provides:
//!
//! - **Document traits** ([`document`]) - Core traits for defining and serializing documents
//! - **Store backend abstraction** ([`backend`]) - The trait every storage backend implements
//! - **Filter API** ([`query`]) - Backend-neutral filter expressions
//! - **Collections interface** ([`collection`]) - Typed, collection-scoped CRUD operations
//! - **Document store** ([`store`]) - Shared handle owning the backend
//! - **Error handling** ([`error`]) - Error and result types
//!
//! # Example
//!
//! ```ignore
//! use chardex_core::{document::Document, query::Filter, store::DocumentStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! pub struct Hunter {
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     pub name: Option<String>,
//! }
//!
//! impl Document for Hunter {
//!     fn collection_name() -> &'static str {
//!         "hunters"
//!     }
//! }
//!
//! let hunters = store.collection::<Hunter>();
//! let gon = hunters.find_one(Filter::eq_ignore_case("name", "gon")).await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as chardex_core;

pub mod backend;
pub mod collection;
pub mod document;
pub mod error;
pub mod query;
pub mod store;
