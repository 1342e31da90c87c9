//! Predicate evaluation for in-memory record filtering.
//!
//! Implements the [`QueryVisitor`] from carewell-core against BSON
//! records held in memory, including the case-insensitive substring
//! matching behind directory search.

use std::cmp::Ordering;
use bson::{Bson, datetime::DateTime};

use carewell_core::{
    error::{StoreError, StoreResult},
    query::{Expr, FieldOp, QueryVisitor},
};

/// Comparable view over a BSON value.
///
/// Normalizes all numeric types to f64 so that field comparisons and
/// sorting do not depend on which integer width a value deserialized to.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    /// Null or missing value; sorts below everything else.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value (integers and floats normalized to f64).
    Number(f64),
    /// DateTime value.
    DateTime(DateTime),
    /// String value.
    String(&'a str),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Number(*value as f64),
            Bson::Int64(value) => Comparable::Number(*value as f64),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::String(value) => Comparable::String(value),
            // Embedded documents and arrays are not comparable as scalars
            _ => Comparable::Null,
        }
    }
}

impl<'a> PartialEq for Comparable<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Number(a), Comparable::Number(b)) => a == b,
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            _ => false,
        }
    }
}

impl<'a> PartialOrd for Comparable<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => Some(Ordering::Equal),
            (Comparable::Null, _) => Some(Ordering::Less),
            (_, Comparable::Null) => Some(Ordering::Greater),
            (Comparable::Bool(a), Comparable::Bool(b)) => a.partial_cmp(b),
            (Comparable::Number(a), Comparable::Number(b)) => a.partial_cmp(b),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a.partial_cmp(b),
            (Comparable::String(a), Comparable::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Evaluates a predicate against a single BSON record.
pub(crate) struct RecordEvaluator<'a> {
    record: &'a Bson,
}

impl<'a> RecordEvaluator<'a> {
    pub fn new(record: &'a Bson) -> Self {
        Self { record }
    }

    pub fn matches(&mut self, expr: &Expr) -> StoreResult<bool> {
        self.visit_expr(expr)
    }

    fn field_value(&self, field: &str) -> StoreResult<Option<&'a Bson>> {
        Ok(self
            .record
            .as_document()
            .ok_or_else(|| StoreError::InvalidRecord("stored value is not a document".into()))?
            .get(field))
    }
}

impl<'a> QueryVisitor for RecordEvaluator<'a> {
    type Output = bool;
    type Error = StoreError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if !self.visit_expr(expr)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    // An empty disjunction matches nothing. The search path relies on
    // this: a search term over an empty searchable-field set must not
    // select the whole collection.
    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if self.visit_expr(expr)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn visit_field(
        &mut self,
        field: &str,
        op: &FieldOp,
        value: &Bson,
    ) -> Result<Self::Output, Self::Error> {
        let Some(field_value) = self.field_value(field)? else {
            return Ok(false);
        };

        match op {
            FieldOp::Eq => Ok(Comparable::from(field_value) == Comparable::from(value)),
            FieldOp::Ne => Ok(Comparable::from(field_value) != Comparable::from(value)),
            FieldOp::Gt | FieldOp::Gte | FieldOp::Lt | FieldOp::Lte => {
                match Comparable::from(field_value).partial_cmp(&Comparable::from(value)) {
                    Some(ordering) => Ok(match op {
                        FieldOp::Gt => ordering == Ordering::Greater,
                        FieldOp::Gte => ordering != Ordering::Less,
                        FieldOp::Lt => ordering == Ordering::Less,
                        FieldOp::Lte => ordering != Ordering::Greater,
                        _ => unreachable!(),
                    }),
                    None => Ok(false),
                }
            }
            FieldOp::Matches => {
                match (Comparable::from(field_value), Comparable::from(value)) {
                    (Comparable::String(haystack), Comparable::String(needle)) => Ok(haystack
                        .to_lowercase()
                        .contains(&needle.to_lowercase())),
                    _ => Ok(false),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use carewell_core::query::Filter;

    fn home(title: &str, owner: &str) -> Bson {
        Bson::Document(doc! { "title": title, "owner": owner, "beds": 24 })
    }

    fn matches(record: &Bson, expr: &Expr) -> bool {
        RecordEvaluator::new(record).matches(expr).unwrap()
    }

    #[test]
    fn matches_is_case_insensitive_substring() {
        let record = home("Oakwood Manor", "Acme");

        assert!(matches(&record, &Filter::matches("title", "oak")));
        assert!(matches(&record, &Filter::matches("title", "OAKWOOD")));
        assert!(!matches(&record, &Filter::matches("title", "birch")));
    }

    #[test]
    fn eq_requires_exact_value() {
        let record = home("Oakwood Manor", "Acme");

        assert!(matches(&record, &Filter::eq("owner", "Acme")));
        assert!(!matches(&record, &Filter::eq("owner", "acme")));
        assert!(!matches(&record, &Filter::eq("owner", "Other")));
    }

    #[test]
    fn missing_field_never_matches() {
        let record = home("Oakwood Manor", "Acme");

        assert!(!matches(&record, &Filter::eq("unknown", "x")));
        assert!(!matches(&record, &Filter::matches("unknown", "x")));
    }

    #[test]
    fn empty_or_matches_nothing_and_empty_and_matches_everything() {
        let record = home("Oakwood Manor", "Acme");

        assert!(!matches(&record, &Expr::Or(vec![])));
        assert!(matches(&record, &Expr::And(vec![])));
    }

    #[test]
    fn numeric_comparisons_normalize_widths() {
        let record = home("Oakwood Manor", "Acme");

        assert!(matches(&record, &Filter::gte("beds", 24i64)));
        assert!(matches(&record, &Filter::lt("beds", 25.0)));
        assert!(!matches(&record, &Filter::gt("beds", 24i32)));
    }
}
