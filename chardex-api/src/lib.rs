//! Character REST service library.
//!
//! Exposes the building blocks (config, state, error handling, routes, docs) so
//! integration tests and the binary entrypoint can both access them.

pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod router;
pub mod routes;
pub mod state;
