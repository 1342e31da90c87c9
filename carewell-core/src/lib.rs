//! Storage-agnostic core of the carewell care-home directory.
//!
//! This crate provides everything the directory service needs from its
//! document store without naming a concrete storage engine:
//!
//! - **Record traits** ([`record`]) - Identity and serialization of persisted entities
//! - **Backend abstraction** ([`backend`]) - The record store contract backends implement
//! - **Query and filtering** ([`query`]) - Predicate AST, builder, and visitor
//! - **Collections** ([`collection`]) - Typed per-entity collection handles
//! - **Record store** ([`store`]) - Owning wrapper handing out collections
//! - **Pagination** ([`page`]) - Page resolution and the listing envelope
//! - **Error handling** ([`error`]) - Store error and result types
//!
//! # Example
//!
//! ```ignore
//! use carewell_core::{record::Record, store::RecordStore};
//! use bson::Uuid;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct CareHome {
//!     pub id: Uuid,
//!     pub title: String,
//! }
//!
//! impl Record for CareHome {
//!     fn id(&self) -> &Uuid {
//!         &self.id
//!     }
//!
//!     fn collection_name() -> &'static str {
//!         "care_homes"
//!     }
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as carewell_core;

pub mod backend;
pub mod collection;
pub mod error;
pub mod page;
pub mod query;
pub mod record;
pub mod store;
