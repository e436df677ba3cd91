//! Filter evaluation for in-memory documents.
//!
//! This module decides whether a stored document matches a filter expression.

use bson::{Bson, Document as BsonDocument};

use chardex_core::{
    query::{QueryVisitor, Expr, FieldOp},
    error::{DocumentStoreError, DocumentStoreResult},
};


/// Case-insensitive whole-string equality. Non-strings never match.
pub(crate) fn eq_ignore_case(left: &Bson, right: &Bson) -> bool {
    match (left, right) {
        (Bson::String(left), Bson::String(right)) => left.to_lowercase() == right.to_lowercase(),
        _ => false,
    }
}


pub(crate) struct DocumentEvaluator<'a> {
    document: &'a BsonDocument,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a BsonDocument) -> Self {
        Self { document }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> DocumentStoreResult<bool> {
        self.visit_expr(expr)
    }

    /// Returns whether `document` matches `expr`; a missing filter matches everything.
    pub fn matches(document: &'a BsonDocument, expr: Option<&Expr>) -> DocumentStoreResult<bool> {
        match expr {
            Some(expr) => DocumentEvaluator::new(document).evaluate(expr),
            None => Ok(true),
        }
    }
}

impl<'a> QueryVisitor for DocumentEvaluator<'a> {
    type Output = bool;
    type Error = DocumentStoreError;

    fn visit_field(&mut self, field: &str, op: &FieldOp, value: &Bson) -> Result<Self::Output, Self::Error> {
        match self.document.get(field) {
            Some(field_value) => match op {
                FieldOp::EqIgnoreCase => Ok(eq_ignore_case(field_value, value)),
            },
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;
    use chardex_core::query::Filter;

    use super::*;

    fn matches(document: &BsonDocument, expr: Expr) -> bool {
        DocumentEvaluator::matches(document, Some(&expr)).unwrap()
    }

    #[test]
    fn eq_ignore_case_requires_whole_value() {
        let gon = doc! { "name": "Gon" };

        assert!(matches(&gon, Filter::eq_ignore_case("name", "gon")));
        assert!(matches(&gon, Filter::eq_ignore_case("name", "GON")));
        assert!(!matches(&gon, Filter::eq_ignore_case("name", "go")));
        assert!(!matches(&gon, Filter::eq_ignore_case("name", "gon freecss")));
    }

    #[test]
    fn pattern_characters_are_literal() {
        let gon = doc! { "name": "Gon" };
        let dotted = doc! { "name": "G.n" };

        assert!(!matches(&gon, Filter::eq_ignore_case("name", "g.n")));
        assert!(!matches(&gon, Filter::eq_ignore_case("name", ".*")));
        assert!(matches(&dotted, Filter::eq_ignore_case("name", "g.N")));
    }

    #[test]
    fn unicode_case_is_folded() {
        let document = doc! { "name": "ÉLODIE" };

        assert!(matches(&document, Filter::eq_ignore_case("name", "élodie")));
    }

    #[test]
    fn missing_fields_and_non_strings_never_match() {
        let document = doc! { "age": 12 };

        assert!(!matches(&document, Filter::eq_ignore_case("name", "gon")));
        assert!(!matches(&document, Filter::eq_ignore_case("age", "12")));
        assert!(DocumentEvaluator::matches(&document, None).unwrap());
    }
}
