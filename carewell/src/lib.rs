//! carewell: a care-home directory backend over a pluggable document store.
//!
//! Administrators register care homes and attach sub-records (awards,
//! services, teams, facilities, news/events, reviews); clients search
//! and paginate the resulting directory.
//!
//! # Features
//!
//! - **Typed domain model** ([`domain`]) - The care-home aggregate and its six sub-record kinds
//! - **Directory service** ([`directory`]) - Validated creates, paginated search, dual-write attach with rollback
//! - **Two-tier search** ([`search`]) - Free-text substring search OR'd across fields, exact filters AND'd
//! - **Pluggable storage** - In-memory backend for tests and development, MongoDB for production
//!
//! # Quick start
//!
//! ```ignore
//! use carewell::{prelude::*, memory::InMemoryStore};
//! use carewell::domain::{NewCareHome, Review, SubRecord};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let directory = DirectoryService::new(InMemoryStore::new());
//!
//!     let home = directory.add_care_home(new_home()).await?;
//!
//!     // Attach a review: embedded in the parent and stored standalone.
//!     directory
//!         .attach_sub_record(SubRecord::Review(Review::new(
//!             home.id, "Ann", 5, "Lovely staff",
//!         )))
//!         .await?;
//!
//!     // Search and paginate the directory.
//!     let page = PageRequest::builder().with_limit(20).build();
//!     let filters = CareHomeFilters {
//!         search_term: Some("oak".into()),
//!         ..Default::default()
//!     };
//!     let listing = directory.list_care_homes(&page, &filters).await?;
//!     println!("{} of {} homes", listing.data.len(), listing.meta.total);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - Fast in-memory storage for development and testing
//! - [`mongodb`] - Persistent MongoDB backend (requires the `mongodb` feature)

pub mod directory;
pub mod domain;
pub mod prelude;
pub mod search;

pub use carewell_core::{backend, collection, error, page, query, record, store};

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend implementations.
pub mod memory {
    pub use carewell_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use carewell_mongodb::{MongoDbStore, MongoDbStoreBuilder};
}
