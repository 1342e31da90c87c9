//! Pagination types for directory listings.
//!
//! [`PageRequest`] normalizes loosely-specified pagination options into a
//! concrete page/limit/sort resolution, and [`Listing`] is the response
//! envelope returned by every listing operation:
//! `{ meta: { page, limit, total }, data: [...] }`.

use serde::{Deserialize, Serialize};

use crate::query::SortDirection;

/// Default page number when none is supplied.
pub const DEFAULT_PAGE: usize = 1;
/// Default page size when none is supplied.
pub const DEFAULT_LIMIT: usize = 10;
/// Default sort key: newest records first.
pub const DEFAULT_SORT_BY: &str = "created_at";

/// Resolved pagination parameters for a listing request.
///
/// Pages are 1-indexed. Missing or unspecified options fall back to
/// defaults silently; there are no error conditions.
///
/// # Example
///
/// ```ignore
/// use carewell_core::page::PageRequest;
///
/// let request = PageRequest::builder().with_page(3).with_limit(20).build();
/// assert_eq!(request.offset(), 40);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PageRequest {
    /// The page number (1-indexed).
    pub page: usize,
    /// Number of records per page.
    pub limit: usize,
    /// The field to sort by.
    pub sort_by: String,
    /// The sort direction.
    pub sort_order: SortOrder,
}

/// Serializable sort order carried on pagination requests.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl From<SortOrder> for SortDirection {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => SortDirection::Asc,
            SortOrder::Desc => SortDirection::Desc,
        }
    }
}

impl PageRequest {
    /// Creates a new builder for constructing a page request from
    /// optional inputs.
    pub fn builder() -> PageRequestBuilder {
        PageRequestBuilder::new()
    }

    /// Number of records to skip for this page: `(page - 1) * limit`.
    ///
    /// A zero page (possible when a request is deserialized from raw
    /// parameters, bypassing the builder) is treated as the first page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1) * self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_order: SortOrder::Desc,
        }
    }
}

/// Builder resolving optional pagination inputs against the defaults.
///
/// This is the seam where raw request parameters (all optional) become a
/// fully-resolved [`PageRequest`].
#[derive(Debug, Clone, Default)]
pub struct PageRequestBuilder {
    page: Option<usize>,
    limit: Option<usize>,
    sort_by: Option<String>,
    sort_order: Option<SortOrder>,
}

impl PageRequestBuilder {
    /// Creates a new builder with no options set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page number (1-indexed). Zero is treated as unset.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = (page > 0).then_some(page);
        self
    }

    /// Sets the page size. Zero is treated as unset.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = (limit > 0).then_some(limit);
        self
    }

    /// Sets the sort field.
    pub fn with_sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    /// Sets the sort order.
    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    /// Builds the resolved request, falling back to defaults for any
    /// unset option.
    pub fn build(self) -> PageRequest {
        PageRequest {
            page: self.page.unwrap_or(DEFAULT_PAGE),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
            sort_by: self
                .sort_by
                .unwrap_or_else(|| DEFAULT_SORT_BY.to_string()),
            sort_order: self.sort_order.unwrap_or(SortOrder::Desc),
        }
    }
}

/// Pagination metadata attached to a [`Listing`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    /// The page that was served (1-indexed).
    pub page: usize,
    /// The page size that was applied.
    pub limit: usize,
    /// Total number of records matching the active filter.
    pub total: u64,
}

/// Response envelope for listing operations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Listing<T> {
    /// Pagination metadata for this page.
    pub meta: PageMeta,
    /// The records on this page, at most `meta.limit` of them.
    pub data: Vec<T>,
}

impl<T> Listing<T> {
    /// Assembles a listing envelope from a served page and its metadata.
    pub fn new(request: &PageRequest, total: u64, data: Vec<T>) -> Self {
        Self {
            meta: PageMeta {
                page: request.page,
                limit: request.limit,
                total,
            },
            data,
        }
    }
}
