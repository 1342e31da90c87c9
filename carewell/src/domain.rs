//! Domain model of the care-home directory.
//!
//! [`CareHome`] is the aggregate root. Six sub-record kinds reference a
//! care home by `home_id` and are stored twice on purpose: embedded in
//! the parent document for the read path, and as standalone rows in their
//! own collections for independent listing and maintenance.
//!
//! All slots except reviews hold at most one sub-record and are
//! overwritten by the latest attach; reviews accumulate in call order.

use bson::{DateTime, Uuid};
use serde::{Deserialize, Serialize};

use carewell_core::record::Record;

/// Room capacity and composition of a care home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomInfo {
    /// Total number of rooms.
    pub total_rooms: u32,
    /// Free-text description of the room types on offer.
    pub room_types: String,
}

/// Inspection performance rubric, one free-text grade per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    pub caring: String,
    pub effective: String,
    pub responsive: String,
    pub safe: String,
}

/// The aggregate root: one registered care facility.
///
/// Created once via
/// [`DirectoryService::add_care_home`](crate::directory::DirectoryService::add_care_home);
/// sub-record slots are populated afterwards through attach operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareHome {
    /// Unique identifier, generated at creation.
    pub id: Uuid,
    /// Creation timestamp; the default listing sort key.
    pub created_at: DateTime,
    pub title: String,
    pub location: String,
    pub owner: String,
    /// Reference to the facility's main image.
    pub image: String,
    pub price: String,
    pub room: RoomInfo,
    pub person_in_charge: String,
    pub local_authority: String,
    /// Minimum age accepted for admission.
    pub admission_min_age: u32,
    pub performance: Performance,
    pub logo: Option<String>,
    pub quote: Option<String>,
    /// Single-slot embedded sub-records, overwritten by the latest attach.
    pub award: Option<Award>,
    pub services: Option<CareService>,
    pub team: Option<CareTeam>,
    pub facilities: Option<Facility>,
    pub news_event: Option<NewsEvent>,
    /// Append-only review sequence, in attach order.
    pub reviews: Vec<Review>,
}

/// Input for registering a care home: everything the caller supplies,
/// without the generated identity fields or sub-record slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCareHome {
    pub title: String,
    pub location: String,
    pub owner: String,
    pub image: String,
    pub price: String,
    pub room: RoomInfo,
    pub person_in_charge: String,
    pub local_authority: String,
    pub admission_min_age: u32,
    pub performance: Performance,
    pub logo: Option<String>,
    pub quote: Option<String>,
}

impl CareHome {
    /// Materializes a new care home from its registration input,
    /// assigning identity and empty sub-record slots.
    pub fn create(new: NewCareHome) -> Self {
        Self {
            id: Uuid::new(),
            created_at: DateTime::now(),
            title: new.title,
            location: new.location,
            owner: new.owner,
            image: new.image,
            price: new.price,
            room: new.room,
            person_in_charge: new.person_in_charge,
            local_authority: new.local_authority,
            admission_min_age: new.admission_min_age,
            performance: new.performance,
            logo: new.logo,
            quote: new.quote,
            award: None,
            services: None,
            team: None,
            facilities: None,
            news_event: None,
            reviews: Vec::new(),
        }
    }
}

impl Record for CareHome {
    fn id(&self) -> &Uuid {
        &self.id
    }

    fn collection_name() -> &'static str {
        "care_homes"
    }
}

/// An award or recognition held by a care home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub id: Uuid,
    pub home_id: Uuid,
    pub created_at: DateTime,
    pub title: String,
    pub awarded_by: String,
    pub year: u16,
}

impl Award {
    pub fn new(home_id: Uuid, title: impl Into<String>, awarded_by: impl Into<String>, year: u16) -> Self {
        Self {
            id: Uuid::new(),
            home_id,
            created_at: DateTime::now(),
            title: title.into(),
            awarded_by: awarded_by.into(),
            year,
        }
    }
}

impl Record for Award {
    fn id(&self) -> &Uuid {
        &self.id
    }

    fn collection_name() -> &'static str {
        "awards"
    }
}

/// The set of care services a home provides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareService {
    pub id: Uuid,
    pub home_id: Uuid,
    pub created_at: DateTime,
    pub description: String,
    pub offerings: Vec<String>,
}

impl CareService {
    pub fn new(home_id: Uuid, description: impl Into<String>, offerings: Vec<String>) -> Self {
        Self {
            id: Uuid::new(),
            home_id,
            created_at: DateTime::now(),
            description: description.into(),
            offerings,
        }
    }
}

impl Record for CareService {
    fn id(&self) -> &Uuid {
        &self.id
    }

    fn collection_name() -> &'static str {
        "care_services"
    }
}

/// The staff team of a care home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareTeam {
    pub id: Uuid,
    pub home_id: Uuid,
    pub created_at: DateTime,
    pub lead: String,
    pub headcount: u32,
    pub description: String,
}

impl CareTeam {
    pub fn new(home_id: Uuid, lead: impl Into<String>, headcount: u32, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new(),
            home_id,
            created_at: DateTime::now(),
            lead: lead.into(),
            headcount,
            description: description.into(),
        }
    }
}

impl Record for CareTeam {
    fn id(&self) -> &Uuid {
        &self.id
    }

    fn collection_name() -> &'static str {
        "care_teams"
    }
}

/// The facilities and amenities available at a care home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: Uuid,
    pub home_id: Uuid,
    pub created_at: DateTime,
    pub amenities: Vec<String>,
}

impl Facility {
    pub fn new(home_id: Uuid, amenities: Vec<String>) -> Self {
        Self {
            id: Uuid::new(),
            home_id,
            created_at: DateTime::now(),
            amenities,
        }
    }
}

impl Record for Facility {
    fn id(&self) -> &Uuid {
        &self.id
    }

    fn collection_name() -> &'static str {
        "facilities"
    }
}

/// A news item or upcoming event published by a care home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsEvent {
    pub id: Uuid,
    pub home_id: Uuid,
    pub created_at: DateTime,
    pub title: String,
    pub body: String,
    pub event_date: Option<DateTime>,
}

impl NewsEvent {
    pub fn new(home_id: Uuid, title: impl Into<String>, body: impl Into<String>, event_date: Option<DateTime>) -> Self {
        Self {
            id: Uuid::new(),
            home_id,
            created_at: DateTime::now(),
            title: title.into(),
            body: body.into(),
            event_date,
        }
    }
}

impl Record for NewsEvent {
    fn id(&self) -> &Uuid {
        &self.id
    }

    fn collection_name() -> &'static str {
        "news_events"
    }
}

/// A visitor or relative review of a care home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub home_id: Uuid,
    pub created_at: DateTime,
    pub reviewer: String,
    /// Rating out of five.
    pub rating: u8,
    pub comment: String,
}

impl Review {
    pub fn new(home_id: Uuid, reviewer: impl Into<String>, rating: u8, comment: impl Into<String>) -> Self {
        Self {
            id: Uuid::new(),
            home_id,
            created_at: DateTime::now(),
            reviewer: reviewer.into(),
            rating,
            comment: comment.into(),
        }
    }
}

impl Record for Review {
    fn id(&self) -> &Uuid {
        &self.id
    }

    fn collection_name() -> &'static str {
        "reviews"
    }
}

/// A sub-record to attach to a care home, tagged by kind.
///
/// Each variant knows its parent-slot policy: every kind overwrites its
/// single slot except reviews, which append. The standalone-row side of
/// the dual write is dispatched on this same tag, so attach logic exists
/// once rather than once per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SubRecord {
    Award(Award),
    Services(CareService),
    Team(CareTeam),
    Facilities(Facility),
    NewsEvent(NewsEvent),
    Review(Review),
}

impl SubRecord {
    /// The id of the parent care home this sub-record references.
    pub fn home_id(&self) -> Uuid {
        match self {
            SubRecord::Award(r) => r.home_id,
            SubRecord::Services(r) => r.home_id,
            SubRecord::Team(r) => r.home_id,
            SubRecord::Facilities(r) => r.home_id,
            SubRecord::NewsEvent(r) => r.home_id,
            SubRecord::Review(r) => r.home_id,
        }
    }

    /// A short kind label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            SubRecord::Award(_) => "award",
            SubRecord::Services(_) => "services",
            SubRecord::Team(_) => "team",
            SubRecord::Facilities(_) => "facilities",
            SubRecord::NewsEvent(_) => "news_event",
            SubRecord::Review(_) => "review",
        }
    }

    /// Applies the embedded side of the dual write to the parent:
    /// overwrite the matching slot, or append for reviews.
    pub fn apply_to(&self, home: &mut CareHome) {
        match self {
            SubRecord::Award(r) => home.award = Some(r.clone()),
            SubRecord::Services(r) => home.services = Some(r.clone()),
            SubRecord::Team(r) => home.team = Some(r.clone()),
            SubRecord::Facilities(r) => home.facilities = Some(r.clone()),
            SubRecord::NewsEvent(r) => home.news_event = Some(r.clone()),
            SubRecord::Review(r) => home.reviews.push(r.clone()),
        }
    }
}
