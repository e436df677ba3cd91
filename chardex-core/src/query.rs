//! Backend-neutral filter expressions.
//!
//! Filters are a small AST that every backend translates into its own matching
//! strategy through a [`QueryVisitor`]. Values are always matched literally:
//! no operator interprets its value as a pattern.
//!
//! ```ignore
//! use chardex_core::query::Filter;
//!
//! // "gon freecss" matches "Gon Freecss", "gon" does not.
//! let by_name = Filter::eq_ignore_case("name", "gon freecss");
//! ```

use bson::Bson;

use crate::error::DocumentStoreError;

/// Field comparison operators for filter expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOp {
    /// Whole-value string equality ignoring case. Never matches non-string values.
    EqIgnoreCase,
}

/// A filter expression for selecting documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Field comparison expression.
    Field {
        /// The field name to compare.
        field: String,
        /// The comparison operator.
        op: FieldOp,
        /// The value to compare against.
        value: Bson,
    },
}

impl Expr {
    /// Creates a field comparison expression.
    pub fn field(field: String, op: FieldOp, value: Bson) -> Self {
        Expr::Field { field, op, value }
    }
}

/// Helper struct for constructing filter expressions.
pub struct Filter;

impl Filter {
    /// Matches documents where the string field equals `value`, ignoring case.
    ///
    /// The whole value must match: `"gon"` matches `"Gon"` but not `"Gon Freecss"`.
    pub fn eq_ignore_case(field: impl Into<String>, value: impl Into<String>) -> Expr {
        Expr::field(field.into(), FieldOp::EqIgnoreCase, Bson::String(value.into()))
    }
}

/// Walks an [`Expr`] tree, producing a backend-specific output.
///
/// The MongoDB backend produces a query document; the in-memory backend produces a
/// boolean for one candidate document.
pub trait QueryVisitor {
    type Output;
    type Error: Into<DocumentStoreError>;

    fn visit_field(
        &mut self,
        field: &str,
        op: &FieldOp,
        value: &Bson,
    ) -> Result<Self::Output, Self::Error>;

    fn visit_expr(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        match expr {
            Expr::Field { field, op, value } => self.visit_field(field, op, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_ignore_case_keeps_value_verbatim() {
        assert_eq!(
            Filter::eq_ignore_case("name", "G.n (Freecss)"),
            Expr::Field {
                field: "name".into(),
                op: FieldOp::EqIgnoreCase,
                value: Bson::String("G.n (Freecss)".into()),
            }
        );
    }
}
