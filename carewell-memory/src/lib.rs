//! In-memory record store backend for carewell.
//!
//! A thread-safe implementation of the carewell-core `StoreBackend` trait
//! holding everything in process memory behind async-aware read-write
//! locks. It backs the test suite and local development; production
//! deployments use the MongoDB backend.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes via async RwLock
//! - **Full query support** - Filtering, sorting, offset pagination, counts
//! - **Deterministic ordering** - Insertion sequence breaks sort-key ties

#[allow(unused_extern_crates)]
extern crate self as carewell_memory;

pub mod evaluator;
pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
