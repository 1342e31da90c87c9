//! Query construction and filtering for the record store.
//!
//! This module provides the predicate AST used by the directory's search
//! path, a fluent [`QueryBuilder`], and a visitor trait for evaluating or
//! translating predicates in a backend-specific way.
//!
//! # Building queries
//!
//! ```ignore
//! use carewell_core::query::{Query, Filter, SortDirection};
//!
//! let query = Query::builder()
//!     .filter(Filter::eq("owner", "Acme"))
//!     .sort("created_at", SortDirection::Desc)
//!     .offset(0)
//!     .limit(10)
//!     .build();
//! ```
//!
//! A query with no filter matches every record in the collection. An
//! `Or` over an empty expression list matches nothing; evaluators and
//! translators must preserve that so a search term with no searchable
//! fields cannot accidentally select the whole collection.

use bson::Bson;

use crate::error::StoreError;

/// Sort direction for query results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (A to Z, earliest to latest).
    Asc,
    /// Descending order (Z to A, latest to earliest).
    Desc,
}

/// Sort specification: which field to sort by and in which direction.
#[derive(Debug, Clone)]
pub struct Sort {
    /// The field name to sort by.
    pub field: String,
    /// The sort direction.
    pub direction: SortDirection,
}

/// Field comparison operators for predicate expressions.
#[derive(Debug, Clone)]
pub enum FieldOp {
    /// Equal to (exact match).
    Eq,
    /// Not equal to.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal to.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal to.
    Lte,
    /// Case-insensitive substring match on string fields.
    Matches,
}

/// A predicate expression for filtering records.
///
/// Expressions combine through `And` and `Or` groups. The directory's
/// search path produces an `Or` of [`FieldOp::Matches`] tests over the
/// searchable fields, conjoined with an `And` of equality tests for the
/// exact-match filters.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Logical AND of multiple expressions (all must match).
    /// An empty list matches everything.
    And(Vec<Expr>),
    /// Logical OR of multiple expressions (any must match).
    /// An empty list matches nothing.
    Or(Vec<Expr>),
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

    /// Combines this expression with another using logical AND.
    ///
    /// If this expression is already an AND group, the other expression
    /// is appended to it rather than nesting a new group.
    pub fn and(self, other: Expr) -> Self {
        match self {
            Expr::And(mut list) => {
                list.push(other);
                Expr::And(list)
            }
            _ => Expr::And(vec![self, other]),
        }
    }

    /// Combines this expression with another using logical OR.
    pub fn or(self, other: Expr) -> Self {
        match self {
            Expr::Or(mut list) => {
                list.push(other);
                Expr::Or(list)
            }
            _ => Expr::Or(vec![self, other]),
        }
    }
}

/// A structured query for retrieving and filtering records.
///
/// Encapsulates the predicate, the sort specification, and offset/limit
/// pagination. `filter: None` matches every record.
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Optional predicate to match records against.
    pub filter: Option<Expr>,
    /// Maximum number of records to return.
    pub limit: Option<usize>,
    /// Number of records to skip (offset pagination).
    pub offset: Option<usize>,
    /// Sort specification for results.
    pub sort: Option<Sort>,
}

impl Query {
    /// Creates a new empty query with no filter, sort, or limits.
    pub fn new() -> Self {
        Query::default()
    }

    /// Creates a new query builder for fluent construction.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }
}

/// Helper struct for constructing predicate expressions.
///
/// Provides static constructors for the supported comparison operators.
/// Field names and values are accepted as `Into<String>` / `Into<Bson>`.
///
/// # Example
///
/// ```ignore
/// use carewell_core::query::Filter;
///
/// let expr = Filter::eq("owner", "Acme")
///     .and(Filter::gte("admission_min_age", 65));
/// ```
pub struct Filter;

impl Filter {
    /// Equality test: the field equals the value exactly.
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::field(field.into(), FieldOp::Eq, value.into())
    }

    /// Inequality test: the field does not equal the value.
    pub fn ne(field: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::field(field.into(), FieldOp::Ne, value.into())
    }

    /// Greater-than test.
    pub fn gt(field: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::field(field.into(), FieldOp::Gt, value.into())
    }

    /// Greater-than-or-equal test.
    pub fn gte(field: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::field(field.into(), FieldOp::Gte, value.into())
    }

    /// Less-than test.
    pub fn lt(field: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::field(field.into(), FieldOp::Lt, value.into())
    }

    /// Less-than-or-equal test.
    pub fn lte(field: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::field(field.into(), FieldOp::Lte, value.into())
    }

    /// Case-insensitive substring test on a string field.
    ///
    /// Matches records where the field contains the value, ignoring case.
    /// This is the operator behind free-text directory search.
    pub fn matches(field: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::field(field.into(), FieldOp::Matches, value.into())
    }

    /// Logical AND group: all expressions must match.
    pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::And(exprs.into_iter().collect())
    }

    /// Logical OR group: any expression may match. Empty groups match nothing.
    pub fn or(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Or(exprs.into_iter().collect())
    }
}

/// Fluent builder for [`Query`] values.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    /// Creates a new query builder.
    pub fn new() -> Self {
        QueryBuilder { query: Query::default() }
    }

    /// Sets the predicate for this query.
    pub fn filter(mut self, filter: Expr) -> Self {
        self.query.filter = Some(filter);
        self
    }

    /// Sets the predicate for this query if one is supplied.
    ///
    /// `None` leaves the query matching every record, which keeps the
    /// "no filters at all" search path free of special cases.
    pub fn maybe_filter(mut self, filter: Option<Expr>) -> Self {
        self.query.filter = filter;
        self
    }

    /// Sets the maximum number of records to return.
    pub fn limit(mut self, limit: usize) -> Self {
        self.query.limit = Some(limit);
        self
    }

    /// Sets the number of records to skip.
    pub fn offset(mut self, offset: usize) -> Self {
        self.query.offset = Some(offset);
        self
    }

    /// Sets the sort field and direction for the results.
    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.query.sort = Some(Sort { field: field.into(), direction });
        self
    }

    /// Builds and returns the final query.
    pub fn build(self) -> Query {
        self.query
    }
}

/// Visitor over predicate expressions.
///
/// Backends implement this to evaluate predicates against in-memory
/// records or translate them into a native query language.
pub trait QueryVisitor {
    type Output;
    type Error: Into<StoreError>;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error>;
    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error>;
    fn visit_field(
        &mut self,
        field: &str,
        op: &FieldOp,
        value: &Bson,
    ) -> Result<Self::Output, Self::Error>;

    fn visit_expr(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        match expr {
            Expr::And(exprs) => self.visit_and(exprs),
            Expr::Or(exprs) => self.visit_or(exprs),
            Expr::Field { field, op, value } => self.visit_field(field, op, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_flattens_into_existing_group() {
        let expr = Filter::eq("owner", "Acme")
            .and(Filter::eq("location", "Leeds"))
            .and(Filter::gte("admission_min_age", 65));

        match expr {
            Expr::And(list) => assert_eq!(list.len(), 3),
            other => panic!("expected And group, got {other:?}"),
        }
    }

    #[test]
    fn builder_assembles_all_parts() {
        let query = Query::builder()
            .filter(Filter::matches("title", "oak"))
            .sort("created_at", SortDirection::Desc)
            .offset(20)
            .limit(10)
            .build();

        assert!(query.filter.is_some());
        assert_eq!(query.offset, Some(20));
        assert_eq!(query.limit, Some(10));
        let sort = query.sort.unwrap();
        assert_eq!(sort.field, "created_at");
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn maybe_filter_none_leaves_match_all() {
        let query = Query::builder().maybe_filter(None).build();
        assert!(query.filter.is_none());
    }
}
