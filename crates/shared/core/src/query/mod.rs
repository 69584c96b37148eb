//! Query state and the wire-query builder

use crate::entities::ZipCode;
use crate::values::{Cursor, SortSpec};

/// Page size for the grid view
pub const GRID_PAGE_SIZE: u32 = 12;

/// Page size for the map view's zip-restricted search
pub const MAP_PAGE_SIZE: u32 = 50;

/// Zip-code fetch limit for bounds queries. Inherited behavior: effectively
/// "all zip codes in view"; a very large viewport may truncate.
pub const BOUNDS_ZIP_LIMIT: u32 = 10_000;

/// Desired filter/sort state driving the filter-driven fetch stream.
///
/// Created with defaults, mutated through reconciler operations, reset to
/// defaults on an explicit clear.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryState {
    pub breed: Option<String>,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub sort: SortSpec,
}

impl QueryState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// `age_min <= age_max` must hold whenever both bounds are present
    pub fn ages_valid(age_min: Option<u32>, age_max: Option<u32>) -> bool {
        match (age_min, age_max) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }
}

/// Wire-ready search query built from a `QueryState`.
///
/// Pure data; the gateway decides how it is serialized onto the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterQuery {
    pub breeds: Vec<String>,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub zip_codes: Vec<ZipCode>,
    pub size: u32,
    pub sort: SortSpec,
}

impl FilterQuery {
    /// Build a wire query from the current state.
    ///
    /// Unset filters are omitted entirely (the service must not receive an
    /// empty filter). Page size comes from the caller: grid and map views
    /// use different sizes.
    pub fn from_state(state: &QueryState, size: u32) -> Self {
        Self {
            breeds: state.breed.iter().cloned().collect(),
            age_min: state.age_min,
            age_max: state.age_max,
            zip_codes: Vec::new(),
            size,
            sort: state.sort,
        }
    }

    /// Restrict the search to a fixed zip-code set (map mode)
    pub fn with_zip_codes(mut self, zip_codes: Vec<ZipCode>) -> Self {
        self.zip_codes = zip_codes;
        self
    }
}

/// A search either derives from fresh filters or resumes from a
/// continuation token. The token already encodes its own filters and
/// offset, so the two must never be mixed within one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    Filters(FilterQuery),
    Resume(Cursor),
}
