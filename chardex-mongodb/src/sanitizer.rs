//! Field name sanitization for MongoDB compatibility.
//!
//! MongoDB reserves some characters in field names for its own query syntax. Clients
//! may still send such keys in a character document, so they are escaped on the way in
//! and restored on the way out. Values are stored untouched.

use bson::{Bson, Document};


/// Escapes and restores document keys that MongoDB cannot store as-is.
///
/// MongoDB does not allow field names (document keys) to contain:
/// - Dots (`.`) - used for nested field access in queries
/// - Dollar signs (`$`) - used for operators in queries
/// - Null bytes (`\0`) - field name terminators
pub(crate) struct KeySanitizer;

impl KeySanitizer {
    /// Character replacements for sanitization
    const REPLACEMENTS: [(&'static str, &'static str); 3] = [
        (".", "__dot__"),
        ("$", "__dollar__"),
        ("\0", "__null__"),
    ];

    /// Escapes every key of `document`, recursing into nested documents and arrays.
    pub(crate) fn sanitize_document(document: &Document) -> Document {
        document
            .iter()
            .map(|(k, v)| (Self::sanitize_string(k), Self::map_nested(v, Self::sanitize_document)))
            .collect()
    }

    /// Reverts [`sanitize_document`](Self::sanitize_document).
    pub(crate) fn restore_document(document: &Document) -> Document {
        document
            .iter()
            .map(|(k, v)| (Self::restore_string(k), Self::map_nested(v, Self::restore_document)))
            .collect()
    }

    fn map_nested(value: &Bson, rewrite: fn(&Document) -> Document) -> Bson {
        match value {
            Bson::Document(doc) => Bson::Document(rewrite(doc)),
            Bson::Array(arr) => Bson::Array(
                arr
                    .iter()
                    .map(|item| Self::map_nested(item, rewrite))
                    .collect(),
            ),
            _ => value.clone(),
        }
    }

    /// Sanitizes a string by replacing problematic characters with safe escaped versions.
    pub(crate) fn sanitize_string(input: &str) -> String {
        let mut sanitized = input.to_string();
        for (target, replacement) in Self::REPLACEMENTS.iter() {
            sanitized = sanitized.replace(*target, *replacement);
        }
        sanitized
    }

    /// Restores a string by reverting sanitization escapes.
    pub(crate) fn restore_string(input: &str) -> String {
        let mut restored = input.to_string();
        for (target, replacement) in Self::REPLACEMENTS.iter().rev() {
            restored = restored.replace(*replacement, *target);
        }
        restored
    }
}
