//! Pawfinder Ports
//!
//! Port definitions (traits) for the pawfinder browsing core.
//! These define the boundary between the engine and the remote catalog.

mod catalog;
mod error;

pub use catalog::Catalog;
pub use error::{CatalogError, CatalogResult};
