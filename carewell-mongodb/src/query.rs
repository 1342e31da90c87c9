//! Predicate translation from the carewell query AST to MongoDB syntax.
//!
//! Implements the core [`QueryVisitor`] to produce native BSON query
//! documents. Substring matching maps to `$regex` with the `i` option,
//! mirroring the case-insensitive directory search semantics of the
//! in-memory evaluator.

use bson::{Bson, Document, doc};

use carewell_core::{
    error::StoreError,
    query::{Expr, FieldOp, QueryVisitor},
};

/// Translates predicate expressions into MongoDB query documents.
pub(crate) struct MongoQueryTranslator;

impl QueryVisitor for MongoQueryTranslator {
    type Output = Document;
    type Error = StoreError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        // $and rejects an empty array; an empty conjunction matches all.
        if exprs.is_empty() {
            return Ok(doc! {});
        }

        Ok(doc! {
            "$and": exprs
                .iter()
                .map(|expr| self.visit_expr(expr))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        // $or also rejects an empty array; an empty disjunction matches
        // nothing, expressed as an always-false comparison on _id.
        if exprs.is_empty() {
            return Ok(doc! { "_id": { "$exists": false } });
        }

        Ok(doc! {
            "$or": exprs
                .iter()
                .map(|expr| self.visit_expr(expr))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    fn visit_field(
        &mut self,
        field: &str,
        op: &FieldOp,
        value: &Bson,
    ) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            field: match op {
                FieldOp::Eq => doc! { "$eq": value },
                FieldOp::Ne => doc! { "$ne": value },
                FieldOp::Gt => doc! { "$gt": value },
                FieldOp::Gte => doc! { "$gte": value },
                FieldOp::Lt => doc! { "$lt": value },
                FieldOp::Lte => doc! { "$lte": value },
                FieldOp::Matches => match value {
                    Bson::String(s) => doc! { "$regex": regex_escape(s), "$options": "i" },
                    _ => return Err(StoreError::Backend(
                        "Matches operator requires a string value".to_string(),
                    )),
                },
            }
        })
    }
}

/// Escapes regex metacharacters so a search term is matched literally.
fn regex_escape(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if "\\.+*?()|[]{}^$".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use carewell_core::query::Filter;

    #[test]
    fn matches_translates_to_case_insensitive_regex() {
        let translated = MongoQueryTranslator
            .visit_expr(&Filter::matches("title", "oak"))
            .unwrap();

        assert_eq!(
            translated,
            doc! { "title": { "$regex": "oak", "$options": "i" } }
        );
    }

    #[test]
    fn search_terms_are_matched_literally() {
        assert_eq!(regex_escape("st. mary's (annex)"), "st\\. mary's \\(annex\\)");
    }

    #[test]
    fn empty_or_translates_to_match_none() {
        let translated = MongoQueryTranslator
            .visit_expr(&Expr::Or(vec![]))
            .unwrap();

        assert_eq!(translated, doc! { "_id": { "$exists": false } });
    }
}
