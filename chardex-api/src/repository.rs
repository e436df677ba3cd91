//! Character persistence on top of the document store.
//!
//! Every lookup goes through [`CharacterRepository::by_name`]: a case-insensitive match
//! on the whole name, where characters such as `.` or `*` are taken literally.

use chardex::collection::Collection;
use chardex::document::{Document, Stored};
use chardex::error::DocumentStoreResult;
use chardex::query::{Expr, Filter};
use chardex::store::DocumentStore;

use crate::models::CharacterRecord;

/// Field holding the character's lookup key.
pub const NAME_FIELD: &str = "name";

#[derive(Debug, Clone)]
pub struct CharacterRepository {
    store: DocumentStore,
}

impl CharacterRepository {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    fn characters(&self) -> Collection<'_, CharacterRecord> {
        self.store.collection::<CharacterRecord>()
    }

    pub fn by_name(name: &str) -> Expr {
        Filter::eq_ignore_case(NAME_FIELD, name)
    }

    /// All characters, in store order.
    pub async fn list(&self) -> DocumentStoreResult<Vec<Stored<CharacterRecord>>> {
        self.characters().find_all().await
    }

    /// The first character whose name matches `name`.
    pub async fn find_by_name(&self, name: &str) -> DocumentStoreResult<Option<Stored<CharacterRecord>>> {
        self.characters().find_one(Self::by_name(name)).await
    }

    pub async fn create(&self, record: CharacterRecord) -> DocumentStoreResult<Stored<CharacterRecord>> {
        self.characters().insert_one(record.without_null_extras()).await
    }

    /// Merges the fields set in `patch` into the first character named `name`.
    pub async fn update_by_name(
        &self,
        name: &str,
        patch: CharacterRecord,
    ) -> DocumentStoreResult<Option<Stored<CharacterRecord>>> {
        self.characters()
            .find_one_and_update(Self::by_name(name), patch.without_null_extras())
            .await
    }

    pub async fn delete_by_name(&self, name: &str) -> DocumentStoreResult<Option<Stored<CharacterRecord>>> {
        self.characters()
            .find_one_and_delete(Self::by_name(name))
            .await
    }

    /// Creates the case-insensitive unique index on names.
    pub async fn ensure_unique_names(&self) -> DocumentStoreResult<()> {
        self.store
            .add_index(CharacterRecord::collection_name(), NAME_FIELD, true)
            .await
    }
}

#[cfg(test)]
mod tests {
    use chardex::backend::StoreBackendBuilder;
    use chardex::memory::InMemoryStore;

    use super::*;

    async fn repository() -> CharacterRepository {
        CharacterRepository::new(DocumentStore::new(InMemoryStore::builder().build().await.unwrap()))
    }

    fn named(name: &str) -> CharacterRecord {
        CharacterRecord {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn lookups_ignore_case_but_not_length() {
        let repository = repository().await;
        let created = repository.create(named("Gon Freecss")).await.unwrap();

        let found = repository.find_by_name("GON FREECSS").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);

        assert!(repository.find_by_name("gon").await.unwrap().is_none());
        assert!(repository.find_by_name("gon.freecss").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_only_touches_sent_fields() {
        let repository = repository().await;
        repository
            .create(CharacterRecord {
                age: Some(12),
                ..named("Gon")
            })
            .await
            .unwrap();

        let updated = repository
            .update_by_name(
                "gon",
                CharacterRecord {
                    status: Some("Retired".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.document.name.as_deref(), Some("Gon"));
        assert_eq!(updated.document.age, Some(12));
        assert_eq!(updated.document.status.as_deref(), Some("Retired"));
    }

    #[tokio::test]
    async fn unique_names_reject_case_variants() {
        let repository = repository().await;
        repository.ensure_unique_names().await.unwrap();
        repository.create(named("Gon")).await.unwrap();

        assert!(repository.create(named("gON")).await.is_err());
        assert!(repository.create(named("Killua")).await.is_ok());
    }
}
