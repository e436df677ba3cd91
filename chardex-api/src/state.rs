use chardex::store::DocumentStore;

use crate::repository::CharacterRepository;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the store shares one backend behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Document store handle.
    pub store: DocumentStore,
}

impl AppState {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    pub fn characters(&self) -> CharacterRepository {
        CharacterRepository::new(self.store.clone())
    }
}
