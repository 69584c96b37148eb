//! Pawfinder Core Domain
//!
//! Pure domain types for the pawfinder browsing core.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod query;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{Dog, DogId, Location, SearchPage, ZipCode};
pub use query::{
    BOUNDS_ZIP_LIMIT, FilterQuery, GRID_PAGE_SIZE, MAP_PAGE_SIZE, QueryState, SearchRequest,
};
pub use values::{Bounds, Cursor, GeoPoint, ParseSortError, SortDirection, SortField, SortSpec};
