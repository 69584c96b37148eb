use async_trait::async_trait;
use pawfinder_core::{Bounds, Dog, DogId, Location, SearchPage, SearchRequest, ZipCode};

use crate::error::CatalogResult;

/// Port for the remote shelter catalog.
///
/// Implemented by the HTTP gateway in production and by the in-memory
/// simulator in tests. All operations are plain request/response; the
/// session credential established by `login` rides along implicitly on the
/// transport.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Establish a session. On success the transport holds the credential
    /// and attaches it to every subsequent call.
    async fn login(&self, name: &str, email: &str) -> CatalogResult<()>;

    /// Full list of available breed names, server-ordered
    async fn breeds(&self) -> CatalogResult<Vec<String>>;

    /// One page of matching dog ids plus continuation tokens
    async fn search(&self, request: &SearchRequest) -> CatalogResult<SearchPage>;

    /// Full records for a list of ids, order-preserving
    async fn dogs(&self, ids: &[DogId]) -> CatalogResult<Vec<Dog>>;

    /// Location metadata for a set of zip codes
    async fn locations(&self, zip_codes: &[ZipCode]) -> CatalogResult<Vec<Location>>;

    /// Zip-code locations inside a geographic bounding box
    async fn locations_within(&self, bounds: &Bounds, size: u32) -> CatalogResult<Vec<Location>>;

    /// Generate a single recommended match from a set of candidate ids
    async fn match_dog(&self, ids: &[DogId]) -> CatalogResult<DogId>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Ensure the port stays object-safe; the engine holds `Arc<dyn Catalog>`
    fn _assert_catalog_object_safe(_: &dyn Catalog) {}
}
