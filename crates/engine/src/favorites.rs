//! Favorites ledger

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use pawfinder_core::DogId;

/// In-memory set of favorited dog ids.
///
/// Independent of the fetch streams: it survives query changes and is
/// cleared only by explicit user action. No network effect, unbounded.
#[derive(Debug, Default)]
pub struct FavoritesLedger {
    ids: Mutex<HashSet<DogId>>,
}

impl FavoritesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership for `id`; returns true when the id is now a favorite
    pub fn toggle(&self, id: &str) -> bool {
        let mut ids = self.lock();
        if ids.remove(id) {
            false
        } else {
            ids.insert(id.to_string());
            true
        }
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Current membership as a set
    pub fn snapshot(&self) -> HashSet<DogId> {
        self.lock().clone()
    }

    /// Current membership as a list, for the match request body
    pub fn to_vec(&self) -> Vec<DogId> {
        self.lock().iter().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<DogId>> {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
