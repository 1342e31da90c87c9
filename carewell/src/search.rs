//! Search-filter construction for directory listings.
//!
//! Translates a free-text search term plus exact-match filters into a
//! predicate for the record store. The two tiers follow the usual
//! catalog-search pattern: the term is OR'd across a fixed set of
//! searchable text fields as a case-insensitive substring match, and the
//! exact filters are AND'd together; both groups conjoin.
//!
//! Exact-match filters come from a schema-enumerated set of permitted
//! fields, never from arbitrary input keys, so callers cannot smuggle
//! predicate structure through a property bag.

use serde::Deserialize;

use carewell_core::query::{Expr, Filter};

/// Text fields the free-text search term is matched against.
pub const SEARCHABLE_FIELDS: [&str; 3] = ["title", "location", "owner"];

/// Filter options accepted by the care-home listing operation.
///
/// All fields are optional; an entirely empty filter matches every home.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CareHomeFilters {
    /// Free-text term, substring-matched case-insensitively across
    /// [`SEARCHABLE_FIELDS`].
    pub search_term: Option<String>,
    /// Exact owner name.
    pub owner: Option<String>,
    /// Exact location.
    pub location: Option<String>,
    /// Exact local authority.
    pub local_authority: Option<String>,
}

impl CareHomeFilters {
    /// Builds the combined predicate, or `None` when no filter is active
    /// (match all).
    pub fn predicate(&self) -> Option<Expr> {
        let mut groups = Vec::new();

        if let Some(term) = self.search_term.as_deref() {
            groups.push(search_predicate(term, &SEARCHABLE_FIELDS));
        }

        let exact: Vec<Expr> = self
            .exact_matches()
            .into_iter()
            .map(|(field, value)| Filter::eq(field, value))
            .collect();
        if !exact.is_empty() {
            groups.push(Filter::and(exact));
        }

        match groups.len() {
            0 => None,
            1 => groups.pop(),
            _ => Some(Filter::and(groups)),
        }
    }

    /// The permitted exact-match pairs that are actually set.
    fn exact_matches(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(owner) = self.owner.as_deref() {
            pairs.push(("owner", owner));
        }
        if let Some(location) = self.location.as_deref() {
            pairs.push(("location", location));
        }
        if let Some(local_authority) = self.local_authority.as_deref() {
            pairs.push(("local_authority", local_authority));
        }
        pairs
    }
}

/// OR-disjunction of case-insensitive substring tests over the given
/// fields.
///
/// An empty field list produces an empty disjunction, which the store
/// treats as match-none: a search term must never silently widen into
/// "match everything".
pub fn search_predicate(term: &str, fields: &[&str]) -> Expr {
    Filter::or(
        fields
            .iter()
            .map(|field| Filter::matches(*field, term)),
    )
}
