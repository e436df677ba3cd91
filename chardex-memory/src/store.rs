//! In-memory storage implementation for document stores.
//!
//! Documents live in insertion-ordered maps keyed by their identifier, one map per
//! collection, all behind a single async-safe read-write lock.

use std::{collections::{HashMap, HashSet}, sync::Arc};
use async_trait::async_trait;
use bson::{Document as BsonDocument, oid::ObjectId};
use indexmap::IndexMap;
use mea::rwlock::RwLock;

use chardex_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::RawDocument,
    error::{DocumentStoreError, DocumentStoreResult},
    query::Expr,
};

use crate::evaluator::{DocumentEvaluator, eq_ignore_case};

type CollectionMap = IndexMap<ObjectId, BsonDocument>;

#[derive(Default, Debug)]
struct MemoryState {
    /// collection_name -> (document_id -> document), in insertion order
    collections: HashMap<String, CollectionMap>,
    /// collection_name -> fields carrying a unique index
    unique_fields: HashMap<String, HashSet<String>>,
}

impl MemoryState {
    fn first_match(&self, filter: &Expr, collection: &str) -> DocumentStoreResult<Option<ObjectId>> {
        let Some(documents) = self.collections.get(collection) else {
            return Ok(None);
        };

        for (id, document) in documents {
            if DocumentEvaluator::matches(document, Some(filter))? {
                return Ok(Some(*id));
            }
        }

        Ok(None)
    }

    /// Fails if `candidate` would share a unique value with any document other than `own_id`.
    fn check_unique(
        &self,
        collection: &str,
        candidate: &BsonDocument,
        own_id: Option<&ObjectId>,
    ) -> DocumentStoreResult<()> {
        let (Some(fields), Some(documents)) = (
            self.unique_fields.get(collection),
            self.collections.get(collection),
        ) else {
            return Ok(());
        };

        for field in fields {
            let Some(value) = candidate.get(field) else {
                continue;
            };

            let collides = documents
                .iter()
                .filter(|(id, _)| Some(*id) != own_id)
                .filter_map(|(_, document)| document.get(field))
                .any(|existing| eq_ignore_case(existing, value));

            if collides {
                return Err(DocumentStoreError::DuplicateKey(field.clone(), collection.to_string()));
            }
        }

        Ok(())
    }
}


/// Thread-safe in-memory document storage backend.
///
/// # Thread Safety
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, allowing
/// it to be safely shared across async tasks. Multiple clones of the same instance
/// share the same underlying data.
///
/// # Performance
///
/// Every lookup scans the collection. That is fine for development data sets and tests,
/// which is all this backend is meant for.
///
/// # Example
///
/// ```ignore
/// use chardex_memory::InMemoryStore;
/// use chardex_core::{backend::StoreBackend, query::Filter};
/// use bson::doc;
///
/// let store = InMemoryStore::new();
/// let id = store.insert_document(doc! { "name": "Gon" }, "characters").await?;
///
/// let found = store
///     .find_one_document(Filter::eq_ignore_case("name", "GON"), "characters")
///     .await?;
/// assert_eq!(found.unwrap().id, id);
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState::default())),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }
}


#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn find_documents(&self, filter: Option<Expr>, collection: &str) -> DocumentStoreResult<Vec<RawDocument>> {
        let state = self.state.read().await;
        let Some(documents) = state.collections.get(collection) else {
            return Ok(vec![]);
        };

        let mut found = Vec::new();

        for (id, document) in documents {
            if DocumentEvaluator::matches(document, filter.as_ref())? {
                found.push(RawDocument::new(*id, document.clone()));
            }
        }

        Ok(found)
    }

    async fn find_one_document(&self, filter: Expr, collection: &str) -> DocumentStoreResult<Option<RawDocument>> {
        let state = self.state.read().await;

        Ok(
            state
                .first_match(&filter, collection)?
                .and_then(|id| {
                    state.collections[collection]
                        .get(&id)
                        .map(|document| RawDocument::new(id, document.clone()))
                })
        )
    }

    async fn insert_document(&self, document: BsonDocument, collection: &str) -> DocumentStoreResult<ObjectId> {
        let mut state = self.state.write().await;
        state.check_unique(collection, &document, None)?;

        let id = ObjectId::new();

        state.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id, document);

        Ok(id)
    }

    async fn find_one_and_update(
        &self,
        filter: Expr,
        patch: BsonDocument,
        collection: &str,
    ) -> DocumentStoreResult<Option<RawDocument>> {
        let mut state = self.state.write().await;
        let Some(id) = state.first_match(&filter, collection)? else {
            return Ok(None);
        };

        let mut merged = state.collections[collection][&id].clone();
        for (key, value) in patch {
            merged.insert(key, value);
        }
        state.check_unique(collection, &merged, Some(&id))?;

        if let Some(documents) = state.collections.get_mut(collection) {
            documents.insert(id, merged.clone());
        }

        Ok(Some(RawDocument::new(id, merged)))
    }

    async fn find_one_and_delete(&self, filter: Expr, collection: &str) -> DocumentStoreResult<Option<RawDocument>> {
        let mut state = self.state.write().await;
        let Some(id) = state.first_match(&filter, collection)? else {
            return Ok(None);
        };

        // shift_remove keeps the remaining documents in insertion order
        Ok(
            state.collections
                .get_mut(collection)
                .and_then(|documents| documents.shift_remove(&id))
                .map(|document| RawDocument::new(id, document))
        )
    }

    async fn add_index(&self, collection: &str, field: &str, unique: bool) -> DocumentStoreResult<()> {
        // Non-unique indexes only speed up lookups, which a scan does not need
        if !unique {
            return Ok(());
        }

        let mut state = self.state.write().await;

        if let Some(documents) = state.collections.get(collection) {
            let values = documents
                .values()
                .filter_map(|document| document.get(field))
                .collect::<Vec<_>>();

            for (position, value) in values.iter().enumerate() {
                if values[position + 1..].iter().any(|other| eq_ignore_case(value, other)) {
                    return Err(DocumentStoreError::DuplicateKey(field.to_string(), collection.to_string()));
                }
            }
        }

        state.unique_fields
            .entry(collection.to_string())
            .or_default()
            .insert(field.to_string());

        Ok(())
    }

    async fn ping(&self) -> DocumentStoreResult<()> {
        Ok(())
    }
}


/// Builder for constructing [`InMemoryStore`] instances.
///
/// # Example
///
/// ```ignore
/// use chardex_memory::InMemoryStore;
/// use chardex_core::backend::StoreBackendBuilder;
///
/// let store = InMemoryStore::builder().build().await?;
/// ```
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds and returns a new [`InMemoryStore`] instance.
    ///
    /// This always succeeds and returns a freshly initialized store.
    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;
    use chardex_core::query::Filter;

    use super::*;

    const CHARACTERS: &str = "characters";

    async fn seeded(names: &[&str]) -> (InMemoryStore, Vec<ObjectId>) {
        let store = InMemoryStore::new();
        let mut ids = Vec::new();

        for name in names {
            ids.push(
                store
                    .insert_document(doc! { "name": *name, "status": "Active" }, CHARACTERS)
                    .await
                    .unwrap(),
            );
        }

        (store, ids)
    }

    #[tokio::test]
    async fn missing_collection_is_empty() {
        let store = InMemoryStore::new();

        assert!(store.find_documents(None, CHARACTERS).await.unwrap().is_empty());
        assert!(
            store
                .find_one_document(Filter::eq_ignore_case("name", "gon"), CHARACTERS)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn documents_come_back_in_insertion_order() {
        let (store, ids) = seeded(&["Gon", "Killua", "Kurapika", "Leorio"]).await;

        let listed = store
            .find_documents(None, CHARACTERS)
            .await
            .unwrap()
            .into_iter()
            .map(|document| document.id)
            .collect::<Vec<_>>();

        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn first_match_wins_for_duplicate_names() {
        let (store, ids) = seeded(&["Gon", "gon", "GON"]).await;

        let found = store
            .find_one_document(Filter::eq_ignore_case("name", "Gon"), CHARACTERS)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.id, ids[0]);
    }

    #[tokio::test]
    async fn update_merges_patch_into_first_match() {
        let (store, ids) = seeded(&["Gon", "Killua"]).await;

        let updated = store
            .find_one_and_update(
                Filter::eq_ignore_case("name", "killua"),
                doc! { "status": "Retired", "hairColor": "White" },
                CHARACTERS,
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, ids[1]);
        assert_eq!(
            updated.body,
            doc! { "name": "Killua", "status": "Retired", "hairColor": "White" }
        );

        let untouched = store
            .find_one_document(Filter::eq_ignore_case("name", "gon"), CHARACTERS)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(untouched.body, doc! { "name": "Gon", "status": "Active" });
    }

    #[tokio::test]
    async fn update_with_empty_patch_returns_document_unchanged() {
        let (store, _) = seeded(&["Gon"]).await;

        let updated = store
            .find_one_and_update(Filter::eq_ignore_case("name", "gon"), doc! {}, CHARACTERS)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.body, doc! { "name": "Gon", "status": "Active" });
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_targets() {
        let (store, _) = seeded(&["Gon"]).await;

        assert!(
            store
                .find_one_and_update(Filter::eq_ignore_case("name", "hisoka"), doc! { "age": 28 }, CHARACTERS)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            store
                .find_one_and_delete(Filter::eq_ignore_case("name", "hisoka"), CHARACTERS)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn delete_removes_only_first_match_and_keeps_order() {
        let (store, ids) = seeded(&["Gon", "Killua", "gon", "Leorio"]).await;

        let deleted = store
            .find_one_and_delete(Filter::eq_ignore_case("name", "GON"), CHARACTERS)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(deleted.id, ids[0]);

        let remaining = store
            .find_documents(None, CHARACTERS)
            .await
            .unwrap()
            .into_iter()
            .map(|document| document.id)
            .collect::<Vec<_>>();
        assert_eq!(remaining, vec![ids[1], ids[2], ids[3]]);
    }

    #[tokio::test]
    async fn unique_index_rejects_case_insensitive_duplicates() {
        let (store, _) = seeded(&["Gon", "Killua"]).await;
        store.add_index(CHARACTERS, "name", true).await.unwrap();

        let inserted = store
            .insert_document(doc! { "name": "GON" }, CHARACTERS)
            .await;
        assert!(matches!(inserted, Err(DocumentStoreError::DuplicateKey(field, _)) if field == "name"));

        let renamed = store
            .find_one_and_update(Filter::eq_ignore_case("name", "killua"), doc! { "name": "gon" }, CHARACTERS)
            .await;
        assert!(matches!(renamed, Err(DocumentStoreError::DuplicateKey(_, _))));

        // Re-saving a document under its own name is not a conflict
        store
            .find_one_and_update(Filter::eq_ignore_case("name", "gon"), doc! { "name": "Gon" }, CHARACTERS)
            .await
            .unwrap();

        // Documents without the field never collide
        store.insert_document(doc! { "age": 1 }, CHARACTERS).await.unwrap();
        store.insert_document(doc! { "age": 2 }, CHARACTERS).await.unwrap();
    }

    #[tokio::test]
    async fn unique_index_cannot_be_added_over_duplicates() {
        let (store, _) = seeded(&["Gon", "gon"]).await;

        assert!(matches!(
            store.add_index(CHARACTERS, "name", true).await,
            Err(DocumentStoreError::DuplicateKey(_, _))
        ));
    }

    #[tokio::test]
    async fn clones_share_data() {
        let store = InMemoryStore::builder().build().await.unwrap();
        let clone = store.clone();

        clone.insert_document(doc! { "name": "Gon" }, CHARACTERS).await.unwrap();

        assert_eq!(store.find_documents(None, CHARACTERS).await.unwrap().len(), 1);
    }
}
