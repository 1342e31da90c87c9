//! Convenient re-exports of commonly used carewell types.
//!
//! ```ignore
//! use carewell::prelude::*;
//! ```

pub use carewell_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    collection::TypedCollection,
    error::{StoreError, StoreResult},
    page::{Listing, PageMeta, PageRequest, SortOrder},
    query::{Expr, FieldOp, Filter, Query, QueryBuilder, QueryVisitor, Sort, SortDirection},
    record::{Record, RecordExt},
    store::RecordStore,
};

pub use crate::{
    directory::{DirectoryError, DirectoryResult, DirectoryService},
    domain::{
        Award, CareHome, CareService, CareTeam, Facility, NewCareHome, NewsEvent, Performance,
        Review, RoomInfo, SubRecord,
    },
    search::{CareHomeFilters, SEARCHABLE_FIELDS},
};
