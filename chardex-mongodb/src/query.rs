//! Query translation from chardex filter expressions to MongoDB query syntax.
//!
//! Values are always matched literally. Case-insensitive equality is expressed as an
//! anchored, case-insensitive regex over the escaped value, so characters such as
//! `.` or `*` in a name never act as wildcards.

use bson::{Document, Bson, doc};

use chardex_core::{
    query::{QueryVisitor, FieldOp},
    error::DocumentStoreError,
};

use crate::sanitizer::KeySanitizer;


/// Builds the regex source matching exactly `value`, whatever characters it contains.
pub(crate) fn exact_pattern(value: &str) -> String {
    format!("^{}$", regex::escape(value))
}

/// Translates chardex query expressions into MongoDB query documents.
pub(crate) struct MongoQueryTranslator;

impl QueryVisitor for MongoQueryTranslator {
    type Output = Document;
    type Error = DocumentStoreError;

    fn visit_field(&mut self, field: &str, op: &FieldOp, value: &Bson) -> Result<Self::Output, Self::Error> {
        let field = KeySanitizer::sanitize_string(field);

        Ok(doc! {
            field: match op {
                FieldOp::EqIgnoreCase => match value {
                    Bson::String(s) => doc! { "$regex": exact_pattern(s), "$options": "i" },
                    _ => return Err(DocumentStoreError::Backend(
                        "EqIgnoreCase operator requires a string value".to_string()
                    )),
                },
            }
        })
    }
}
