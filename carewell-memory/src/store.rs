//! In-memory storage backend for the carewell record store.
//!
//! Records are held as BSON values behind an async-aware read-write lock.
//! Every insert is tagged with a monotonically increasing sequence number
//! so that query results have a stable order even when sort keys tie,
//! keeping offset pagination reproducible across pages.

use std::{cmp::Ordering, collections::HashMap, sync::Arc};
use async_trait::async_trait;
use bson::{Bson, Uuid};
use mea::rwlock::RwLock;

use carewell_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{StoreError, StoreResult},
    query::{Expr, Query, SortDirection},
};

use crate::evaluator::{Comparable, RecordEvaluator};

/// One stored record plus its insertion sequence number.
#[derive(Debug, Clone)]
struct Stored {
    seq: u64,
    body: Bson,
}

type CollectionMap = HashMap<String, Stored>;

#[derive(Debug, Default)]
struct Inner {
    collections: HashMap<String, CollectionMap>,
    next_seq: u64,
}

/// Thread-safe in-memory record storage backend.
///
/// Cloneable; clones share the same underlying data through an `Arc`.
/// Queries scan the whole collection (no indexing), which is fine for the
/// directory's test and development workloads.
///
/// # Example
///
/// ```ignore
/// use carewell_memory::InMemoryStore;
/// use carewell_core::backend::StoreBackend;
/// use bson::{Bson, Uuid, doc};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryStore::new();
///
/// let id = Uuid::new();
/// let record = Bson::Document(doc! { "title": "Oakwood Manor" });
/// store.insert_record(id, record, "care_homes").await?;
///
/// assert!(store.find_record(id, "care_homes").await?.is_some());
/// # Ok(()) }
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder
    }

    fn filter_collection(
        collection: &CollectionMap,
        filter: Option<&Expr>,
    ) -> StoreResult<Vec<Stored>> {
        let mut matched = Vec::new();

        for stored in collection.values() {
            let keep = match filter {
                Some(expr) => RecordEvaluator::new(&stored.body).matches(expr)?,
                None => true,
            };
            if keep {
                matched.push(stored.clone());
            }
        }

        Ok(matched)
    }
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn insert_record(&self, id: Uuid, record: Bson, collection: &str) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let seq = inner.next_seq;
        let collection_map = inner
            .collections
            .entry(collection.to_string())
            .or_default();

        let key = id.to_string();
        if collection_map.contains_key(&key) {
            return Err(StoreError::DuplicateRecord(key, collection.to_string()));
        }

        collection_map.insert(key, Stored { seq, body: record });
        inner.next_seq += 1;

        Ok(())
    }

    async fn replace_record(&self, id: Uuid, record: Bson, collection: &str) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let key = id.to_string();

        let stored = inner
            .collections
            .get_mut(collection)
            .and_then(|col| col.get_mut(&key))
            .ok_or_else(|| StoreError::RecordNotFound(key.clone(), collection.to_string()))?;

        // Replacement keeps the original sequence number so a record does
        // not move within tie-broken orderings when it is rewritten.
        stored.body = record;

        Ok(())
    }

    async fn find_record(&self, id: Uuid, collection: &str) -> StoreResult<Option<Bson>> {
        let inner = self.inner.read().await;

        Ok(inner
            .collections
            .get(collection)
            .and_then(|col| col.get(&id.to_string()))
            .map(|stored| stored.body.clone()))
    }

    async fn query_records(&self, query: Query, collection: &str) -> StoreResult<Vec<Bson>> {
        let inner = self.inner.read().await;
        let Some(collection_map) = inner.collections.get(collection) else {
            return Ok(vec![]);
        };

        let mut matched = Self::filter_collection(collection_map, query.filter.as_ref())?;

        match &query.sort {
            Some(sort) => {
                matched.sort_by(|a, b| {
                    let left = a
                        .body
                        .as_document()
                        .and_then(|doc| doc.get(&sort.field))
                        .map(Comparable::from)
                        .unwrap_or(Comparable::Null);
                    let right = b
                        .body
                        .as_document()
                        .and_then(|doc| doc.get(&sort.field))
                        .map(Comparable::from)
                        .unwrap_or(Comparable::Null);

                    let primary = match sort.direction {
                        SortDirection::Asc => left.partial_cmp(&right),
                        SortDirection::Desc => right.partial_cmp(&left),
                    };

                    primary
                        .unwrap_or(Ordering::Equal)
                        .then_with(|| a.seq.cmp(&b.seq))
                });
            }
            // No sort key: insertion order.
            None => matched.sort_by_key(|stored| stored.seq),
        }

        Ok(matched
            .into_iter()
            .skip(query.offset.unwrap_or(0))
            .take(query.limit.unwrap_or(usize::MAX))
            .map(|stored| stored.body)
            .collect())
    }

    async fn count_records(&self, filter: Option<Expr>, collection: &str) -> StoreResult<u64> {
        let inner = self.inner.read().await;
        let Some(collection_map) = inner.collections.get(collection) else {
            return Ok(0);
        };

        Ok(Self::filter_collection(collection_map, filter.as_ref())?.len() as u64)
    }
}

/// Builder for [`InMemoryStore`] instances.
///
/// Currently takes no options; exists so callers construct every backend
/// through the same [`StoreBackendBuilder`] seam.
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    async fn build(self) -> StoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use carewell_core::query::{Filter, Query, SortDirection};

    fn record(title: &str, rank: i32) -> Bson {
        Bson::Document(doc! { "title": title, "rank": rank })
    }

    async fn seeded() -> InMemoryStore {
        let store = InMemoryStore::new();
        for (title, rank) in [("alpha", 3), ("beta", 1), ("gamma", 2), ("delta", 1)] {
            store
                .insert_record(Uuid::new(), record(title, rank), "homes")
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = InMemoryStore::new();
        let id = Uuid::new();

        store
            .insert_record(id, record("alpha", 1), "homes")
            .await
            .unwrap();
        let err = store
            .insert_record(id, record("alpha", 1), "homes")
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateRecord(_, _)));
    }

    #[tokio::test]
    async fn replace_requires_existing_record() {
        let store = InMemoryStore::new();
        let err = store
            .replace_record(Uuid::new(), record("alpha", 1), "homes")
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::RecordNotFound(_, _)));
    }

    #[tokio::test]
    async fn sort_ties_break_by_insertion_order() {
        let store = seeded().await;

        let results = store
            .query_records(
                Query::builder()
                    .sort("rank", SortDirection::Asc)
                    .build(),
                "homes",
            )
            .await
            .unwrap();

        let titles: Vec<&str> = results
            .iter()
            .map(|r| r.as_document().unwrap().get_str("title").unwrap())
            .collect();
        // rank 1 twice: beta inserted before delta, so beta stays first
        assert_eq!(titles, vec!["beta", "delta", "gamma", "alpha"]);
    }

    #[tokio::test]
    async fn offset_and_limit_slice_the_sorted_sequence() {
        let store = seeded().await;

        let results = store
            .query_records(
                Query::builder()
                    .sort("title", SortDirection::Asc)
                    .offset(1)
                    .limit(2)
                    .build(),
                "homes",
            )
            .await
            .unwrap();

        let titles: Vec<&str> = results
            .iter()
            .map(|r| r.as_document().unwrap().get_str("title").unwrap())
            .collect();
        assert_eq!(titles, vec!["beta", "delta"]);
    }

    #[tokio::test]
    async fn count_applies_the_predicate() {
        let store = seeded().await;

        let all = store.count_records(None, "homes").await.unwrap();
        let filtered = store
            .count_records(Some(Filter::eq("rank", 1)), "homes")
            .await
            .unwrap();

        assert_eq!(all, 4);
        assert_eq!(filtered, 2);
    }

    #[tokio::test]
    async fn missing_collection_reads_as_empty() {
        let store = InMemoryStore::new();

        assert!(store
            .query_records(Query::new(), "nowhere")
            .await
            .unwrap()
            .is_empty());
        assert_eq!(store.count_records(None, "nowhere").await.unwrap(), 0);
        assert!(store
            .find_record(Uuid::new(), "nowhere")
            .await
            .unwrap()
            .is_none());
    }
}
