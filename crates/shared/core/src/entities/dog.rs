use serde::{Deserialize, Serialize};

use super::ZipCode;

/// Unique identifier for a dog, issued by the catalog service.
/// Opaque: the service defines the format, we only pass it around.
pub type DogId = String;

/// A full adoptable-dog record as returned by the catalog.
///
/// Immutable once fetched; identified by `id`. Field names match the wire
/// format (`img`, `zip_code`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub id: DogId,
    /// Photo URL
    pub img: String,
    pub name: String,
    pub age: u32,
    pub zip_code: ZipCode,
    pub breed: String,
}
