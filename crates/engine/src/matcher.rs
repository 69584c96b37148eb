//! Match orchestrator

use std::sync::Arc;

use log::info;
use pawfinder_core::{Dog, DogId};
use pawfinder_ports::Catalog;

use crate::error::{Error, Result};

/// Resolves a set of favorite ids into a single recommended dog.
///
/// The ranking itself is remote: this component submits the candidate ids
/// to the catalog's match endpoint, then resolves the returned id through
/// the same batch-detail path the reconcilers use. It mutates neither the
/// favorites ledger nor any snapshot.
pub struct MatchOrchestrator {
    catalog: Arc<dyn Catalog>,
}

impl MatchOrchestrator {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }

    /// Generate a match from `favorites`.
    ///
    /// Calling with an empty set is a precondition violation and fails
    /// before any network call is issued.
    pub async fn find_match(&self, favorites: &[DogId]) -> Result<Dog> {
        if favorites.is_empty() {
            return Err(Error::EmptyFavorites);
        }

        let id = self.catalog.match_dog(favorites).await?;
        info!("Catalog matched {} out of {} favorites", id, favorites.len());

        let mut dogs = self.catalog.dogs(std::slice::from_ref(&id)).await?;
        if dogs.is_empty() {
            return Err(Error::MatchNotFound(id));
        }
        Ok(dogs.remove(0))
    }
}
