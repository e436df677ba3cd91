//! Document store setup.
//!
//! The store client is created once at startup. Connectivity is checked but never
//! required: an unreachable server is logged and requests fail until it comes back.

use chardex::backend::StoreBackendBuilder;
use chardex::error::{DocumentStoreError, DocumentStoreResult};
use chardex::memory::InMemoryStore;
use chardex::mongodb::MongoDbStore;
use chardex::store::DocumentStore;

use crate::config::ServerConfig;
use crate::repository::CharacterRepository;

/// Creates the store selected by `config.database_url`.
///
/// Fails only when the connection string cannot be parsed.
pub async fn connect(config: &ServerConfig) -> DocumentStoreResult<DocumentStore> {
    if config.uses_memory_store() {
        tracing::warn!("Using the in-memory document store, data will not survive a restart");
        return Ok(DocumentStore::new(InMemoryStore::builder().build().await?));
    }

    let backend = MongoDbStore::builder(&config.database_url, &config.database_name)
        .build()
        .await?;
    tracing::info!(database = backend.database_name(), "MongoDB client created");

    Ok(DocumentStore::new(backend))
}

/// Pings the store, logging the outcome.
pub async fn check_connection(store: &DocumentStore) {
    match store.ping().await {
        Ok(()) => tracing::info!("Document store connection established"),
        Err(e) => tracing::warn!(error = %e, "Document store unreachable, requests will fail until it is available"),
    }
}

/// Creates the indexes the configuration asks for.
///
/// An unreachable store is only a warning. Any other failure, such as existing
/// characters already sharing a name, is returned.
pub async fn ensure_indexes(store: &DocumentStore, config: &ServerConfig) -> DocumentStoreResult<()> {
    if !config.unique_names {
        return Ok(());
    }

    match CharacterRepository::new(store.clone()).ensure_unique_names().await {
        Ok(()) => {
            tracing::info!("Unique name index in place");
            Ok(())
        }
        Err(DocumentStoreError::Unavailable(e)) => {
            tracing::warn!(error = %e, "Could not create the unique name index, names are not enforced unique");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
