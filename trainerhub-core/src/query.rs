//! Query construction and filtering API for document stores.
//!
//! Lists are narrowed with exact-match filters only. A filter is a small expression
//! tree built with [`Filter`] and walked by a [`QueryVisitor`], which each backend
//! implements in its own way (evaluation in memory, translation for MongoDB).
//!
//! ```ignore
//! use trainerhub_core::query::{Query, Filter};
//!
//! let query = Query::builder()
//!     .filter(Filter::eq("trainer_id", "652f0c2e9b1d4a0012345678"))
//!     .limit(10)
//!     .build();
//! ```

use bson::Bson;

use crate::error::DocumentStoreError;

/// A filter expression for querying documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Logical AND of multiple expressions. An empty list matches every document.
    And(Vec<Expr>),
    /// The field holds exactly the given value.
    Eq {
        /// The field name to compare.
        field: String,
        /// The value to compare against.
        value: Bson,
    },
}

/// A structured query for retrieving documents.
///
/// Results come back in the store's natural order; there is no sort.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Optional filter expression to match documents.
    pub filter: Option<Expr>,
    /// Maximum number of documents to return.
    pub limit: Option<usize>,
}

impl Query {
    /// Creates a new empty query with no filter or limit.
    pub fn new() -> Self {
        Query::default()
    }

    /// Creates a new query builder for fluent construction.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }
}

/// Helper struct for constructing filter expressions.
pub struct Filter;

impl Filter {
    /// Matches documents where the field equals the specified value.
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Combines multiple expressions such that all must match.
    pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::And(exprs.into_iter().collect())
    }

    /// Builds an AND of equality checks from optional `(field, value)` pairs.
    ///
    /// Pairs whose value is `None` are skipped. Returns `None` when nothing is left,
    /// so an all-empty parameter set matches every document.
    pub fn all_present<V>(pairs: impl IntoIterator<Item = (&'static str, Option<V>)>) -> Option<Expr>
    where
        V: Into<Bson>,
    {
        let exprs = pairs
            .into_iter()
            .filter_map(|(field, value)| value.map(|value| Filter::eq(field, value)))
            .collect::<Vec<_>>();

        match exprs.len() {
            0 => None,
            _ => Some(Expr::And(exprs)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    /// Creates a new query builder.
    pub fn new() -> Self {
        QueryBuilder::default()
    }

    /// Sets the filter expression for this query.
    pub fn filter(mut self, filter: Expr) -> Self {
        self.query.filter = Some(filter);
        self
    }

    /// Sets the filter expression if one is given, leaving the query unfiltered otherwise.
    pub fn maybe_filter(mut self, filter: Option<Expr>) -> Self {
        self.query.filter = filter;
        self
    }

    /// Sets the maximum number of documents to return.
    pub fn limit(mut self, limit: usize) -> Self {
        self.query.limit = Some(limit);
        self
    }

    /// Builds and returns the final query.
    pub fn build(self) -> Query {
        self.query
    }
}

pub trait QueryVisitor {
    type Output;
    type Error: Into<DocumentStoreError>;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error>;
    fn visit_eq(&mut self, field: &str, value: &Bson) -> Result<Self::Output, Self::Error>;

    fn visit_expr(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        match expr {
            Expr::And(exprs) => self.visit_and(exprs),
            Expr::Eq { field, value } => self.visit_eq(field, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_present_skips_missing_values() {
        let expr = Filter::all_present([
            ("client_id", Some("c1".to_string())),
            ("trainer_id", None),
            ("status", Some("completed".to_string())),
        ]);

        assert_eq!(
            expr,
            Some(Expr::And(vec![
                Filter::eq("client_id", "c1"),
                Filter::eq("status", "completed"),
            ]))
        );
    }

    #[test]
    fn all_present_with_nothing_is_unfiltered() {
        let expr = Filter::all_present::<String>([("client_id", None), ("trainer_id", None)]);
        assert_eq!(expr, None);
    }

    #[test]
    fn builder_sets_filter_and_limit() {
        let query = Query::builder()
            .filter(Filter::eq("status", "scheduled"))
            .limit(5)
            .build();

        assert_eq!(query.limit, Some(5));
        assert_eq!(query.filter, Some(Filter::eq("status", "scheduled")));
    }
}
