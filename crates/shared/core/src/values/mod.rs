//! Value types: cursors, sort specifications, geographic coordinates

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque continuation token returned by the search endpoint.
///
/// The only contract is "pass it back verbatim to resume". The embedded
/// `from=` field is decoded on a best-effort basis for display purposes
/// only; nothing else about the internal format may be relied on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw token as received
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Query-string portion of the token.
    ///
    /// Tokens may arrive as a full path ("/dogs/search?size=12&from=12");
    /// the resume request appends everything from the first '?' on.
    pub fn query_string(&self) -> &str {
        match self.0.find('?') {
            Some(i) => &self.0[i..],
            None => &self.0,
        }
    }

    /// Best-effort decode of the numeric `from` offset embedded in the
    /// token. Returns 0 when absent or unparseable.
    pub fn offset(&self) -> u64 {
        self.query_string()
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "from")
            .and_then(|(_, value)| value.parse().ok())
            .unwrap_or(0)
    }
}

/// Sortable fields supported by the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Breed,
    Name,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Breed => "breed",
            SortField::Name => "name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Sort specification, serialized as `"<field>:<asc|desc>"` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn ascending(field: SortField) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    /// Toggle semantics: selecting the active field flips the direction,
    /// selecting the other field activates it ascending.
    pub fn toggled(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.direction.flipped())
        } else {
            Self::ascending(field)
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field.as_str(), self.direction.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid sort specification: {0}")]
pub struct ParseSortError(pub String);

impl FromStr for SortSpec {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = s
            .split_once(':')
            .ok_or_else(|| ParseSortError(s.to_string()))?;
        let field = match field {
            "breed" => SortField::Breed,
            "name" => SortField::Name,
            _ => return Err(ParseSortError(s.to_string())),
        };
        let direction = match direction {
            "asc" => SortDirection::Ascending,
            "desc" => SortDirection::Descending,
            _ => return Err(ParseSortError(s.to_string())),
        };
        Ok(SortSpec::new(field, direction))
    }
}

/// A point on the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Map viewport: north-east and south-west corners.
/// Drives the bounds-driven fetch stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub north_east: GeoPoint,
    pub south_west: GeoPoint,
}

impl Bounds {
    pub fn new(north_east: GeoPoint, south_west: GeoPoint) -> Self {
        Self {
            north_east,
            south_west,
        }
    }

    /// Rectangle containment; does not handle antimeridian crossings
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.south_west.lat
            && lat <= self.north_east.lat
            && lng >= self.south_west.lng
            && lng <= self.north_east.lng
    }
}
