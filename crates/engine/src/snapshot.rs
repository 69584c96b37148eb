//! Snapshot - the result set currently presented

use std::collections::HashMap;

use pawfinder_core::{Cursor, Dog, Location, ZipCode};

/// The result set currently presented to the presentation layer.
///
/// `dogs` keeps the server sort order. After a settled cycle, `locations`
/// holds exactly the distinct zip codes of `dogs`. While a cycle is in
/// flight the previous data stays visible with `loading = true`; a failed
/// cycle flips `loading` back without touching anything else.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub dogs: Vec<Dog>,
    pub locations: HashMap<ZipCode, Location>,
    /// Count of all matches server-side
    pub total: u64,
    pub next: Option<Cursor>,
    pub prev: Option<Cursor>,
    pub loading: bool,
    /// Index of the first shown result within the total ordering
    pub offset: u64,
}

impl Snapshot {
    /// 1-based "showing X-Y of total" range; (0, 0) when empty
    pub fn shown_range(&self) -> (u64, u64) {
        if self.dogs.is_empty() {
            (0, 0)
        } else {
            (self.offset + 1, self.offset + self.dogs.len() as u64)
        }
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some() && self.offset + (self.dogs.len() as u64) < self.total
    }

    pub fn has_prev(&self) -> bool {
        self.prev.is_some() && self.offset > 0
    }
}
