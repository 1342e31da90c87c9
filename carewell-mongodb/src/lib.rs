//! MongoDB backend for the carewell record store.
//!
//! Implements the carewell-core `StoreBackend` trait over the official
//! async MongoDB driver, making MongoDB the production storage
//! collaborator for the directory. Predicates translate to native
//! MongoDB query documents, including regex-based case-insensitive
//! search matching.
//!
//! To use this backend, enable the `mongodb` feature of the facade crate:
//!
//! ```toml
//! [dependencies]
//! carewell = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use carewell_core::backend::StoreBackendBuilder;
//! use carewell_mongodb::MongoDbStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = MongoDbStore::builder("mongodb://localhost:27017", "carewell")
//!     .build()
//!     .await?;
//! # Ok(()) }
//! ```

#[allow(unused_extern_crates)]
extern crate self as carewell_mongodb;

pub mod query;
pub mod sanitizer;
pub mod store;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
