//! Core traits for record representation and serialization.
//!
//! Every entity persisted by the directory (care homes and their
//! sub-records) implements [`Record`], which ties a type to its identity
//! and its standalone collection. [`RecordExt`] supplies the BSON/JSON
//! conversions used at the storage boundary.

use bson::{Bson, Uuid, de::deserialize_from_bson, ser::serialize_to_bson};
use serde::{Deserialize, Serialize};
use serde_json::{Value, from_value, to_value};

use crate::error::StoreResult;

/// Trait implemented by every entity persisted in the directory.
///
/// A record must carry a unique identifier assigned at creation and name
/// the collection its standalone rows live in.
///
/// # Example
///
/// ```ignore
/// use carewell_core::record::Record;
/// use bson::Uuid;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Review {
///     pub id: Uuid,
///     pub home_id: Uuid,
///     pub comment: String,
/// }
///
/// impl Record for Review {
///     fn id(&self) -> &Uuid {
///         &self.id
///     }
///
///     fn collection_name() -> &'static str {
///         "reviews"
///     }
/// }
/// ```
pub trait Record: Serialize + for<'de> Deserialize<'de> + Send + Sync + Clone + 'static {
    /// Returns a reference to this record's unique identifier.
    fn id(&self) -> &Uuid;

    /// Returns the name of the collection this record's standalone rows
    /// are stored in. Should be a static, lowercase identifier
    /// (e.g. "care_homes", "reviews").
    fn collection_name() -> &'static str;
}

/// Extension trait providing serialization utilities for records.
///
/// Automatically implemented for all [`Record`] types.
pub trait RecordExt: Record {
    /// Converts this record to a BSON value for storage.
    fn to_bson(&self) -> StoreResult<Bson>;

    /// Restores a record from a BSON value.
    fn from_bson(bson: Bson) -> StoreResult<Self>;

    /// Converts this record to a JSON value.
    fn to_json(&self) -> StoreResult<Value>;

    /// Restores a record from a JSON value.
    fn from_json(value: Value) -> StoreResult<Self>;
}

impl<R: Record> RecordExt for R {
    fn to_bson(&self) -> StoreResult<Bson> {
        Ok(serialize_to_bson(self)?)
    }

    fn from_bson(bson: Bson) -> StoreResult<Self> {
        Ok(deserialize_from_bson(bson)?)
    }

    fn to_json(&self) -> StoreResult<Value> {
        Ok(to_value(self)?)
    }

    fn from_json(value: Value) -> StoreResult<Self> {
        Ok(from_value(value)?)
    }
}
