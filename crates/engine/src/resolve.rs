//! Shared record/location resolution (stages two and three of a fetch cycle)

use std::collections::HashMap;

use pawfinder_core::{Dog, DogId, Location, ZipCode};
use pawfinder_ports::{Catalog, CatalogResult};

/// Resolved page contents: full records in server order plus the exact
/// location mapping for their zip codes.
#[derive(Debug, Clone, Default)]
pub struct ResolvedPage {
    pub dogs: Vec<Dog>,
    pub locations: HashMap<ZipCode, Location>,
}

/// Resolve an id page to full records and their location metadata.
///
/// The order of `ids` is the server sort and is preserved as-is; no local
/// re-sort happens anywhere downstream. The location fetch covers the
/// deduplicated zip set of the fetched records, nothing more. An empty id
/// list short-circuits without issuing any call.
pub async fn resolve_page(catalog: &dyn Catalog, ids: &[DogId]) -> CatalogResult<ResolvedPage> {
    if ids.is_empty() {
        return Ok(ResolvedPage::default());
    }

    let dogs = catalog.dogs(ids).await?;

    let mut zips: Vec<ZipCode> = Vec::new();
    for dog in &dogs {
        if !zips.contains(&dog.zip_code) {
            zips.push(dog.zip_code.clone());
        }
    }

    let locations = catalog
        .locations(&zips)
        .await?
        .into_iter()
        .map(|location| (location.zip_code.clone(), location))
        .collect();

    Ok(ResolvedPage { dogs, locations })
}
