//! Character record schema and response bodies.

use chardex::document::{Document, Stored};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A character document. Every field is optional, and fields the schema does not
/// know about are stored and returned as they were sent.
///
/// Fields left out of a request are not serialized, so the same type doubles as a
/// partial update: only what the client sent is written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    /// Lookup key, compared ignoring case.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Gon Freecss")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 12)]
    pub age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 1.55)]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 45.0)]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Green")]
    pub eye_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Black")]
    pub hair_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Active")]
    pub status: Option<String>,
    /// Image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Any other client-supplied fields.
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Map<String, Value>,
}

impl CharacterRecord {
    /// Drops extra fields sent as `null`, so they are treated like the declared fields:
    /// as absent.
    pub fn without_null_extras(mut self) -> Self {
        self.extra.retain(|_, value| !value.is_null());
        self
    }
}

impl Document for CharacterRecord {
    fn collection_name() -> &'static str {
        "characters"
    }
}

/// A stored character together with its store-assigned identifier.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CharacterResponse {
    /// Hex-encoded ObjectId.
    #[serde(rename = "_id")]
    #[schema(example = "6650c1f4e4b0a1b2c3d4e5f6")]
    pub id: String,
    #[serde(flatten)]
    pub record: CharacterRecord,
}

impl From<Stored<CharacterRecord>> for CharacterResponse {
    fn from(stored: Stored<CharacterRecord>) -> Self {
        Self {
            id: stored.id.to_hex(),
            record: stored.document,
        }
    }
}

/// `{ "message": ... }`, used for errors.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Character not found")]
    pub message: String,
}

/// `{ "message": ..., "data": ... }`, returned by writes.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CharacterEnvelope {
    pub message: String,
    pub data: CharacterResponse,
}

impl CharacterEnvelope {
    pub fn new(message: &str, data: impl Into<CharacterResponse>) -> Self {
        Self {
            message: message.to_string(),
            data: data.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chardex::bson::{doc, oid::ObjectId};
    use chardex::document::DocumentExt;
    use serde_json::json;

    use super::*;

    #[test]
    fn unset_fields_are_not_written() {
        let patch: CharacterRecord = serde_json::from_value(json!({ "status": "Retired" })).unwrap();

        assert_eq!(patch.to_bson_document().unwrap(), doc! { "status": "Retired" });
    }

    #[test]
    fn unknown_fields_are_kept_and_client_ids_dropped() {
        let record: CharacterRecord = serde_json::from_value(json!({
            "_id": "client-chosen",
            "name": "Killua",
            "nenType": "Transmuter",
            "family": { "name": "Zoldyck" },
        }))
        .unwrap();

        let body = record.to_bson_document().unwrap();

        assert!(body.get("_id").is_none());
        assert_eq!(body.get_str("nenType").unwrap(), "Transmuter");
        assert_eq!(body.get_document("family").unwrap(), &doc! { "name": "Zoldyck" });
    }

    #[test]
    fn null_fields_are_not_written() {
        let record: CharacterRecord = serde_json::from_value(json!({
            "name": "Gon",
            "age": null,
            "nickname": null,
            "rival": { "name": null },
        }))
        .unwrap();

        assert_eq!(
            record.without_null_extras().to_bson_document().unwrap(),
            doc! { "name": "Gon", "rival": { "name": null } },
        );
    }

    #[test]
    fn responses_expose_hex_id_next_to_fields() {
        let id = ObjectId::new();
        let response = CharacterResponse::from(Stored {
            id,
            document: CharacterRecord {
                name: Some("Gon".to_string()),
                eye_color: Some("Brown".to_string()),
                ..Default::default()
            },
        });

        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({ "_id": id.to_hex(), "name": "Gon", "eyeColor": "Brown" }),
        );
    }

    #[test]
    fn stored_documents_read_back_into_records() {
        let record = CharacterRecord::from_bson_document(doc! {
            "name": "Gon",
            "age": 12_i64,
            "height": 1.55,
            "nickname": "Gon-chan",
        })
        .unwrap();

        assert_eq!(record.name.as_deref(), Some("Gon"));
        assert_eq!(record.age, Some(12));
        assert_eq!(record.height, Some(1.55));
        assert_eq!(record.extra.get("nickname"), Some(&json!("Gon-chan")));
    }
}
