//! Error and result types for record store operations.
//!
//! Use [`StoreResult<T>`] as the return type for fallible store operations.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors raised by a record store backend.
///
/// Covers serialization failures, record lifecycle violations, and
/// backend-specific errors. Errors propagate to the caller unchanged;
/// no recovery or retry happens inside the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Serialization/deserialization error when converting between record formats (BSON, JSON).
    #[error("serialization error: {0}")]
    Serialization(String),
    /// Error during store initialization or connection setup.
    #[error("initialization error: {0}")]
    Initialization(String),
    /// A record with the given id already exists in the collection.
    /// The first argument is the record id, the second is the collection name.
    #[error("record {0} already exists in collection {1}")]
    DuplicateRecord(String, String),
    /// The requested record was not found in the collection.
    /// The first argument is the record id, the second is the collection name.
    #[error("record {0} not found in collection {1}")]
    RecordNotFound(String, String),
    /// The record has an invalid structure (for example, not a BSON document).
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    /// An error occurred in the underlying storage backend.
    #[error("backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<BsonError> for StoreError {
    fn from(err: BsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for StoreError {
    fn from(err: SerdeJsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
