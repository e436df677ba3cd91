//! Core traits and types for document representation and serialization.
//!
//! This module provides the trait every stored type implements, the untyped
//! [`RawDocument`] exchanged with backends, and the typed [`Stored`] wrapper
//! returned to callers.

use bson::{
    Bson, Document as BsonDocument, de::deserialize_from_bson, oid::ObjectId,
    ser::serialize_to_bson,
};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{DocumentStoreError, DocumentStoreResult};

/// Name of the field holding the store-assigned identifier.
pub const ID_FIELD: &str = "_id";

/// Core trait that all documents stored in a document store must implement.
///
/// Documents do not carry their own identifier: the store assigns one on insert and
/// hands it back alongside the document as a [`Stored`] value. Fields that serialize
/// to nothing (e.g. `None` with `skip_serializing_if`) are left untouched by updates,
/// which is what makes partial patches possible.
///
/// # Example
///
/// ```ignore
/// use chardex_core::document::Document;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Hunter {
///     pub name: Option<String>,
/// }
///
/// impl Document for Hunter {
///     fn collection_name() -> &'static str {
///         "hunters"
///     }
/// }
/// ```
pub trait Document: Serialize + DeserializeOwned + Send + Sync + Clone + 'static {
    /// Returns the name of the collection this document belongs to.
    ///
    /// This should be a static, lowercase identifier (e.g., "characters").
    /// Backends create the collection on first write.
    fn collection_name() -> &'static str;
}

/// Extension trait providing BSON conversions for documents.
///
/// This trait is automatically implemented for all types that implement [`Document`].
pub trait DocumentExt: Document {
    /// Converts this document to a BSON map ready to be written.
    ///
    /// Any `_id` key the value happens to carry is dropped, identifiers are
    /// assigned by the store and never taken from document bodies.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidDocument`] if the value cannot be encoded as
    /// BSON (e.g. an unsigned integer above `i64::MAX`) or does not encode to a map.
    fn to_bson_document(&self) -> DocumentStoreResult<BsonDocument>;

    /// Creates a document from a BSON map.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or the structure is invalid.
    fn from_bson_document(document: BsonDocument) -> DocumentStoreResult<Self>;
}

impl<D: Document> DocumentExt for D {
    fn to_bson_document(&self) -> DocumentStoreResult<BsonDocument> {
        let encoded = serialize_to_bson(self)
            .map_err(|e| DocumentStoreError::InvalidDocument(e.to_string()))?;

        match encoded {
            Bson::Document(mut document) => {
                document.remove(ID_FIELD);
                Ok(document)
            }
            other => Err(DocumentStoreError::InvalidDocument(format!(
                "expected a document, found {other}"
            ))),
        }
    }

    fn from_bson_document(document: BsonDocument) -> DocumentStoreResult<Self> {
        Ok(deserialize_from_bson(Bson::Document(document))?)
    }
}

/// An untyped document as it travels between the collection layer and a backend.
///
/// `body` never contains the `_id` key; the identifier lives in `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub id: ObjectId,
    pub body: BsonDocument,
}

impl RawDocument {
    pub fn new(id: ObjectId, body: BsonDocument) -> Self {
        Self { id, body }
    }

    /// Deserializes the body into `D`, keeping the identifier.
    pub fn into_typed<D: Document>(self) -> DocumentStoreResult<Stored<D>> {
        Ok(Stored {
            id: self.id,
            document: D::from_bson_document(self.body)?,
        })
    }
}

/// A typed document together with the identifier the store assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Stored<D> {
    pub id: ObjectId,
    pub document: D,
}

#[cfg(test)]
mod tests {
    use bson::doc;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    struct Hunter {
        #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        age: Option<i64>,
    }

    impl Document for Hunter {
        fn collection_name() -> &'static str {
            "hunters"
        }
    }

    #[test]
    fn to_bson_document_drops_identifier_and_empty_fields() {
        let hunter = Hunter {
            id: Some("client-chosen".into()),
            name: Some("Killua".into()),
            age: None,
        };

        let document = hunter.to_bson_document().unwrap();

        assert_eq!(document, doc! { "name": "Killua" });
    }

    #[test]
    fn raw_document_converts_into_typed() {
        let id = ObjectId::new();
        let raw = RawDocument::new(id, doc! { "name": "Gon", "age": 12_i64 });

        let stored = raw.into_typed::<Hunter>().unwrap();

        assert_eq!(stored.id, id);
        assert_eq!(stored.document.name.as_deref(), Some("Gon"));
        assert_eq!(stored.document.age, Some(12));
    }

    #[test]
    fn unencodable_values_are_invalid_documents() {
        #[derive(Debug, Clone, Serialize, Deserialize)]
        struct Counter {
            hits: u64,
        }

        impl Document for Counter {
            fn collection_name() -> &'static str {
                "counters"
            }
        }

        assert!(matches!(
            Counter { hits: u64::MAX }.to_bson_document(),
            Err(DocumentStoreError::InvalidDocument(_))
        ));
    }

    #[test]
    fn non_map_values_are_rejected() {
        #[derive(Debug, Clone, Serialize, Deserialize)]
        struct Scalar(i32);

        impl Document for Scalar {
            fn collection_name() -> &'static str {
                "scalars"
            }
        }

        assert!(matches!(
            Scalar(1).to_bson_document(),
            Err(DocumentStoreError::InvalidDocument(_))
        ));
    }
}
