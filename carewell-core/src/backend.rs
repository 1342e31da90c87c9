//! Storage backend abstraction for the record store.
//!
//! The directory talks to its document store through [`StoreBackend`],
//! which keeps the service layer storage-agnostic: the in-memory backend
//! serves tests and development, the MongoDB backend serves production.
//!
//! The contract per collection is deliberately small: create, replace,
//! find-one, find-many with predicate/sort/offset/limit, and count. The
//! count operation takes the same predicate shape as a query so that a
//! listing's reported total always reflects the filter that produced the
//! page being served.

use async_trait::async_trait;
use bson::{Bson, Uuid};
use std::fmt::Debug;

use crate::{
    error::StoreResult,
    query::{Expr, Query},
};

/// Abstract interface for record storage backends.
///
/// Implementations must be thread-safe (`Send + Sync`) and support
/// concurrent access from multiple async tasks. Operations suspend only
/// while awaiting storage I/O; cancellation and timeout semantics are the
/// storage client's responsibility. No retries happen here; failures
/// propagate to the caller as [`StoreError`](crate::error::StoreError).
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Inserts a new record into a collection.
    ///
    /// The collection is created automatically if it does not exist.
    /// Fails with [`StoreError::DuplicateRecord`](crate::error::StoreError)
    /// if a record with the same id is already present.
    async fn insert_record(
        &self,
        id: Uuid,
        record: Bson,
        collection: &str,
    ) -> StoreResult<()>;

    /// Replaces an existing record in a collection wholesale.
    ///
    /// This is the persistence step for aggregate updates: the parent is
    /// loaded, mutated in memory, then written back through this method.
    /// Fails with [`StoreError::RecordNotFound`](crate::error::StoreError)
    /// if no record with the given id exists.
    async fn replace_record(
        &self,
        id: Uuid,
        record: Bson,
        collection: &str,
    ) -> StoreResult<()>;

    /// Retrieves a single record by id, or `None` if absent.
    async fn find_record(&self, id: Uuid, collection: &str) -> StoreResult<Option<Bson>>;

    /// Queries records in a collection using a structured query.
    ///
    /// Results are ordered deterministically: primarily by the query's
    /// sort key and direction, with ties broken by insertion order so
    /// offset pagination is reproducible across pages.
    async fn query_records(&self, query: Query, collection: &str) -> StoreResult<Vec<Bson>>;

    /// Counts records in a collection matching the given predicate.
    ///
    /// `None` counts the whole collection. Listing operations pass the
    /// same predicate here as to [`query_records`](Self::query_records).
    async fn count_records(&self, filter: Option<Expr>, collection: &str) -> StoreResult<u64>;

    /// Cleanly shuts down the backend, releasing held resources.
    ///
    /// The default implementation is a no-op; backends with external
    /// connections should override this.
    async fn shutdown(self) -> StoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// Factory trait for constructing backend instances.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> StoreResult<Self::Backend>;
}
