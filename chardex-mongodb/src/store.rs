use async_trait::async_trait;
use futures::TryStreamExt;
use bson::{Document, doc};
use mongodb::{
    Client, Collection as MongoCollection, IndexModel,
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{ClientOptions, Collation, CollationStrength, IndexOptions, ReturnDocument},
};
use chardex_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::{ID_FIELD, RawDocument},
    error::{DocumentStoreError, DocumentStoreResult},
    query::{Expr, QueryVisitor},
};

use crate::{sanitizer::KeySanitizer, query::MongoQueryTranslator};

const DUPLICATE_KEY_CODE: i32 = 11000;


/// Maps driver errors onto store errors.
///
/// Unreachable servers become `Unavailable`, unique index violations become
/// `DuplicateKey`, and everything else is reported as a backend failure.
fn map_error(error: MongoError, collection: &str) -> DocumentStoreError {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(failure)) if failure.code == DUPLICATE_KEY_CODE => {
            DocumentStoreError::DuplicateKey(duplicate_field(&failure.message), collection.to_string())
        }
        ErrorKind::Command(failure) if failure.code == DUPLICATE_KEY_CODE => {
            DocumentStoreError::DuplicateKey(duplicate_field(&failure.message), collection.to_string())
        }
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. } => DocumentStoreError::Unavailable(error.to_string()),
        _ => DocumentStoreError::Backend(error.to_string()),
    }
}

/// Pulls the offending field out of a duplicate key message such as
/// `E11000 ... dup key: { name: "Gon" }`.
fn duplicate_field(message: &str) -> String {
    message
        .split_once("dup key: {")
        .and_then(|(_, rest)| rest.split_once(':'))
        .map(|(field, _)| KeySanitizer::restore_string(field.trim()))
        .unwrap_or_else(|| "unknown".to_string())
}


#[derive(Debug)]
pub struct MongoDbStore {
    client: Client,
    database: String,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    /// Name of the database this store reads and writes.
    pub fn database_name(&self) -> &str {
        &self.database
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(&KeySanitizer::sanitize_string(collection_name))
    }

    fn translate(filter: &Expr) -> DocumentStoreResult<Document> {
        MongoQueryTranslator.visit_expr(filter)
    }

    /// Splits a stored document into its identifier and restored body.
    fn restore_document(mut document: Document) -> DocumentStoreResult<RawDocument> {
        let id = document
            .get_object_id(ID_FIELD)
            .map_err(|_| {
                DocumentStoreError::Serialization("Stored document has no ObjectId identifier".to_string())
            })?;
        document.remove(ID_FIELD);

        Ok(RawDocument::new(id, KeySanitizer::restore_document(&document)))
    }
}

#[async_trait]
impl StoreBackend for MongoDbStore {
    async fn find_documents(&self, filter: Option<Expr>, collection: &str) -> DocumentStoreResult<Vec<RawDocument>> {
        self.get_collection(collection)
            .find(
                if let Some(expr) = &filter {
                    Self::translate(expr)?
                } else {
                    doc! {}
                },
            )
            .await
            .map_err(|e| map_error(e, collection))?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(|e| map_error(e, collection))?
            .into_iter()
            .map(Self::restore_document)
            .collect()
    }

    async fn find_one_document(&self, filter: Expr, collection: &str) -> DocumentStoreResult<Option<RawDocument>> {
        self.get_collection(collection)
            .find_one(Self::translate(&filter)?)
            .await
            .map_err(|e| map_error(e, collection))?
            .map(Self::restore_document)
            .transpose()
    }

    async fn insert_document(&self, document: Document, collection: &str) -> DocumentStoreResult<bson::oid::ObjectId> {
        let result = self.get_collection(collection)
            .insert_one(KeySanitizer::sanitize_document(&document))
            .await
            .map_err(|e| map_error(e, collection))?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| DocumentStoreError::Backend(
                format!("Expected an ObjectId identifier, got {}", result.inserted_id)
            ))
    }

    async fn find_one_and_update(
        &self,
        filter: Expr,
        patch: Document,
        collection: &str,
    ) -> DocumentStoreResult<Option<RawDocument>> {
        // MongoDB rejects an empty $set
        if patch.is_empty() {
            return self.find_one_document(filter, collection).await;
        }

        self.get_collection(collection)
            .find_one_and_update(
                Self::translate(&filter)?,
                doc! { "$set": KeySanitizer::sanitize_document(&patch) },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| map_error(e, collection))?
            .map(Self::restore_document)
            .transpose()
    }

    async fn find_one_and_delete(&self, filter: Expr, collection: &str) -> DocumentStoreResult<Option<RawDocument>> {
        self.get_collection(collection)
            .find_one_and_delete(Self::translate(&filter)?)
            .await
            .map_err(|e| map_error(e, collection))?
            .map(Self::restore_document)
            .transpose()
    }

    async fn add_index(&self, collection: &str, field: &str, unique: bool) -> DocumentStoreResult<()> {
        let field = KeySanitizer::sanitize_string(field);
        let mut options = IndexOptions::builder().unique(unique).build();

        if unique {
            options.collation = Some(
                Collation::builder()
                    .locale("en".to_string())
                    .strength(CollationStrength::Secondary)
                    .build(),
            );
            options.partial_filter_expression = Some(doc! { field.clone(): { "$type": "string" } });
        }

        self.get_collection(collection)
            .create_index(
                IndexModel::builder()
                    .keys(doc! { field.clone(): 1 })
                    .options(options)
                    .build(),
            )
            .await
            .map_err(|e| map_error(e, collection))?;

        tracing::debug!(collection, field = %field, unique, "index ensured");

        Ok(())
    }

    async fn ping(&self) -> DocumentStoreResult<()> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| map_error(e, &self.database))?;

        Ok(())
    }

    async fn shutdown(&self) -> DocumentStoreResult<()> {
        self.client.clone().shutdown().await;

        Ok(())
    }
}

pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
}

impl MongoDbStoreBuilder {
    /// Creates a builder for `dsn`. `database` is used when the connection string
    /// does not name a database itself.
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
        }
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    /// Parses the connection string and creates a client.
    ///
    /// No connection is made here: the driver connects lazily, so an unreachable server
    /// only shows up on the first operation (or [`StoreBackend::ping`]).
    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        let options = ClientOptions::parse(&self.dsn)
            .await
            .map_err(|e| DocumentStoreError::Initialization(e.to_string()))?;
        let database = options
            .default_database
            .clone()
            .unwrap_or(self.database);

        Ok(MongoDbStore::new(
            Client::with_options(options)
                .map_err(|e| DocumentStoreError::Initialization(e.to_string()))?,
            database,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_field_is_read_from_server_message() {
        let message = r#"E11000 duplicate key error collection: characters.characters index: name_1 collation: { locale: "en", strength: 2 } dup key: { name: "Gon" }"#;

        assert_eq!(duplicate_field(message), "name");
        assert_eq!(duplicate_field("E11000 duplicate key error"), "unknown");
    }

    #[tokio::test]
    async fn builder_prefers_database_from_connection_string() {
        let store = MongoDbStore::builder("mongodb://localhost:27017/heroes", "characters")
            .build()
            .await
            .unwrap();

        assert_eq!(store.database_name(), "heroes");
    }

    #[tokio::test]
    async fn builder_falls_back_to_default_database() {
        let store = MongoDbStore::builder("mongodb://localhost:27017", "characters")
            .build()
            .await
            .unwrap();

        assert_eq!(store.database_name(), "characters");
    }

    #[tokio::test]
    async fn builder_rejects_malformed_connection_strings() {
        let result = MongoDbStore::builder("not-a-mongo-uri", "characters").build().await;

        assert!(matches!(result, Err(DocumentStoreError::Initialization(_))));
    }

    #[test]
    fn stored_documents_are_split_into_id_and_body() {
        let id = bson::oid::ObjectId::new();
        let raw = MongoDbStore::restore_document(doc! { "_id": id, "nen__dot__type": "Enhancer" }).unwrap();

        assert_eq!(raw.id, id);
        assert_eq!(raw.body, doc! { "nen.type": "Enhancer" });
    }
}
