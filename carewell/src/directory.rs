//! The directory service orchestrating all care-home operations.
//!
//! Every operation is either a validated create or a filtered, paginated
//! read. The one piece with a real consistency contract is
//! [`DirectoryService::attach_sub_record`], which performs the
//! deliberate dual write (embedded copy in the parent plus a standalone
//! row) with a compensating rollback: if the standalone write fails after
//! the parent was updated, the parent is restored to its pre-attach
//! snapshot so no partially-applied state survives.
//!
//! Concurrent attaches against the same parent are not serialized here;
//! the later parent write wins on the embedded slot while both standalone
//! rows are created. See DESIGN.md for the reasoning.

use bson::Uuid;
use thiserror::Error;
use tracing::{debug, info, warn};

use carewell_core::{
    backend::StoreBackend,
    error::StoreError,
    page::{Listing, PageRequest},
    query::Query,
    store::RecordStore,
};

use crate::{
    domain::{Award, CareHome, CareService, CareTeam, Facility, NewCareHome, NewsEvent, Review, SubRecord},
    search::CareHomeFilters,
};

/// Errors surfaced by directory operations.
///
/// All errors propagate directly to the caller; no retry or local
/// recovery happens in the service.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// The referenced care home does not exist.
    #[error("care home not found: {0}")]
    NotFound(Uuid),
    /// The input failed validation before any write was attempted.
    #[error("validation failed: {0}")]
    Validation(String),
    /// The underlying record store failed; propagated unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A specialized `Result` type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// The care-home directory service over a pluggable storage backend.
///
/// # Example
///
/// ```ignore
/// use carewell::{directory::DirectoryService, memory::InMemoryStore};
///
/// let directory = DirectoryService::new(InMemoryStore::new());
/// let home = directory.add_care_home(new_home).await?;
/// ```
#[derive(Debug)]
pub struct DirectoryService<B: StoreBackend> {
    store: RecordStore<B>,
}

impl<B: StoreBackend> DirectoryService<B> {
    /// Creates a directory service on top of the given backend.
    pub fn new(backend: B) -> Self {
        Self { store: RecordStore::new(backend) }
    }

    /// The underlying record store.
    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    /// Registers a new care home and returns it with its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Validation`] if a required text field is
    /// empty, or a store error if persistence fails.
    pub async fn add_care_home(&self, new: NewCareHome) -> DirectoryResult<CareHome> {
        for (field, value) in [
            ("title", &new.title),
            ("location", &new.location),
            ("owner", &new.owner),
        ] {
            if value.trim().is_empty() {
                return Err(DirectoryError::Validation(format!(
                    "{field} must not be empty"
                )));
            }
        }

        let home = CareHome::create(new);
        self.store.collection::<CareHome>().insert(&home).await?;
        info!(home_id = %home.id, title = %home.title, "care home registered");

        Ok(home)
    }

    /// Retrieves a single care home by id.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::NotFound`] if no home with the id exists.
    pub async fn get_care_home(&self, id: Uuid) -> DirectoryResult<CareHome> {
        self.store
            .collection::<CareHome>()
            .find(id)
            .await?
            .ok_or(DirectoryError::NotFound(id))
    }

    /// Lists care homes matching the filters, one page at a time.
    ///
    /// The returned envelope guarantees `data.len() <= page.limit`, data
    /// sorted by the resolved sort key and direction, and a `total` that
    /// reflects the same filter as the page being served. Pagination is
    /// stateless offset pagination.
    pub async fn list_care_homes(
        &self,
        page: &PageRequest,
        filters: &CareHomeFilters,
    ) -> DirectoryResult<Listing<CareHome>> {
        let homes = self.store.collection::<CareHome>();
        let predicate = filters.predicate();

        let query = Query::builder()
            .maybe_filter(predicate.clone())
            .sort(page.sort_by.clone(), page.sort_order.into())
            .offset(page.offset())
            .limit(page.limit)
            .build();

        let data = homes.query(query).await?;
        let total = homes.count(predicate).await?;
        debug!(
            page = page.page,
            limit = page.limit,
            total,
            returned = data.len(),
            "care home listing served"
        );

        Ok(Listing::new(page, total, data))
    }

    /// Attaches a sub-record to its parent care home.
    ///
    /// Performs the dual write: the embedded copy is applied to the
    /// parent (overwrite for single-slot kinds, append for reviews) and
    /// persisted, then the standalone row is inserted into the
    /// sub-record's own collection. Returns the attached sub-record.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::NotFound`] before any write if the
    /// parent does not exist. If the standalone insert fails after the
    /// parent write, the parent is rolled back to its pre-attach state
    /// and the original error is returned.
    pub async fn attach_sub_record(&self, sub: SubRecord) -> DirectoryResult<SubRecord> {
        let home_id = sub.home_id();
        let homes = self.store.collection::<CareHome>();

        let mut home = homes
            .find(home_id)
            .await?
            .ok_or(DirectoryError::NotFound(home_id))?;

        let snapshot = home.clone();
        sub.apply_to(&mut home);
        homes.replace(&home).await?;

        if let Err(err) = self.insert_standalone(&sub).await {
            // Compensate: restore the parent so the embedded copy does
            // not survive without its standalone row.
            if let Err(rollback_err) = homes.replace(&snapshot).await {
                warn!(
                    home_id = %home_id,
                    kind = sub.kind(),
                    error = %rollback_err,
                    "parent rollback failed after standalone write error"
                );
            }
            return Err(err.into());
        }

        info!(home_id = %home_id, kind = sub.kind(), "sub-record attached");

        Ok(sub)
    }

    /// Inserts the standalone row for a sub-record into its own
    /// collection, dispatching on the kind tag.
    async fn insert_standalone(&self, sub: &SubRecord) -> Result<(), StoreError> {
        match sub {
            SubRecord::Award(r) => self.store.collection::<Award>().insert(r).await,
            SubRecord::Services(r) => self.store.collection::<CareService>().insert(r).await,
            SubRecord::Team(r) => self.store.collection::<CareTeam>().insert(r).await,
            SubRecord::Facilities(r) => self.store.collection::<Facility>().insert(r).await,
            SubRecord::NewsEvent(r) => self.store.collection::<NewsEvent>().insert(r).await,
            SubRecord::Review(r) => self.store.collection::<Review>().insert(r).await,
        }
    }
}
