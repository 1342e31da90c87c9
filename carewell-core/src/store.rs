//! Main record store interface over a storage backend.
//!
//! [`RecordStore`] owns a backend and hands out [`TypedCollection`]
//! handles per record type. One collection exists per entity type:
//! care homes, awards, services, teams, facilities, news/events, reviews.
//!
//! # Example
//!
//! ```ignore
//! use carewell_core::store::RecordStore;
//!
//! let store = RecordStore::new(backend);
//! let homes = store.collection::<CareHome>();
//! ```

use crate::{
    backend::StoreBackend,
    collection::TypedCollection,
    error::StoreResult,
    record::Record,
};

/// A record store bound to a specific backend implementation.
///
/// # Type parameters
///
/// * `B` - The backend implementation type
#[derive(Debug)]
pub struct RecordStore<B: StoreBackend> {
    backend: B,
}

impl<B: StoreBackend> RecordStore<B> {
    /// Creates a new record store with the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Gets the typed collection for a record type.
    ///
    /// The collection name comes from the record type's
    /// [`collection_name()`](crate::record::Record::collection_name).
    pub fn collection<'a, R: Record>(&'a self) -> TypedCollection<'a, B, R> {
        TypedCollection::new(R::collection_name().to_string(), &self.backend)
    }

    /// Shuts down the store, releasing backend resources.
    ///
    /// Consumes the store; call when it is no longer needed.
    pub async fn shutdown(self) -> StoreResult<()> {
        self.backend.shutdown().await
    }
}
