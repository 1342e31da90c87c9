//! Typed collection handles over a storage backend.
//!
//! A [`TypedCollection`] binds a [`Record`] type to its collection and
//! handles the BSON round-trip at the storage boundary, so the service
//! layer works entirely in domain types.

use bson::Uuid;
use std::marker::PhantomData;

use crate::{
    backend::StoreBackend,
    error::StoreResult,
    query::{Expr, Query},
    record::{Record, RecordExt},
};

/// A type-safe handle on one collection of a storage backend.
///
/// # Type parameters
///
/// * `'a` - Lifetime of the backend reference
/// * `B` - The storage backend type
/// * `R` - The record type stored in this collection
#[derive(Debug)]
pub struct TypedCollection<'a, B: StoreBackend, R: Record> {
    name: String,
    backend: &'a B,
    _marker: PhantomData<R>,
}

impl<'a, B: StoreBackend, R: Record> TypedCollection<'a, B, R> {
    pub(crate) fn new(name: String, backend: &'a B) -> Self {
        Self { name, backend, _marker: PhantomData }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts a new record, serializing it to BSON for storage.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if serialization
    /// fails or a record with the same id already exists.
    pub async fn insert(&self, record: &R) -> StoreResult<()> {
        self.backend
            .insert_record(*record.id(), record.to_bson()?, &self.name)
            .await
    }

    /// Replaces an existing record wholesale.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if serialization
    /// fails or the record does not exist.
    pub async fn replace(&self, record: &R) -> StoreResult<()> {
        self.backend
            .replace_record(*record.id(), record.to_bson()?, &self.name)
            .await
    }

    /// Retrieves a single record by id, or `None` if absent.
    pub async fn find(&self, id: Uuid) -> StoreResult<Option<R>> {
        self.backend
            .find_record(id, &self.name)
            .await?
            .map(R::from_bson)
            .transpose()
    }

    /// Queries records using a structured query.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if the query or
    /// deserialization of a result fails.
    pub async fn query(&self, query: Query) -> StoreResult<Vec<R>> {
        self.backend
            .query_records(query, &self.name)
            .await?
            .into_iter()
            .map(R::from_bson)
            .collect()
    }

    /// Counts records matching the given predicate; `None` counts all.
    pub async fn count(&self, filter: Option<Expr>) -> StoreResult<u64> {
        self.backend
            .count_records(filter, &self.name)
            .await
    }
}
