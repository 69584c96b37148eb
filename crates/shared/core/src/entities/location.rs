use serde::{Deserialize, Serialize};

/// ZIP code, the join key between dogs and locations
pub type ZipCode = String;

/// Location metadata for a ZIP code.
///
/// Immutable; keyed by `zip_code` for O(1) joins against `Dog::zip_code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub zip_code: ZipCode,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub state: String,
    pub county: String,
}
