//! REST client for the shelter catalog service
//!
//! Infrastructure component - handles HTTP communication, the session
//! cookie jar, and status normalization. Everything above this file speaks
//! `CatalogError`, never raw transport errors.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use pawfinder_core::{Bounds, Dog, DogId, Location, SearchPage, SearchRequest, ZipCode};
use pawfinder_ports::{Catalog, CatalogError, CatalogResult};
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};

use crate::config::GatewayConfig;
use crate::error::RestError;
use crate::wire::{self, GeoSearchRequest, GeoSearchResponse, LoginRequest, MatchResponse};

/// REST API client for the shelter catalog.
///
/// Holds a cookie jar so the HttpOnly session credential established by
/// `login` is attached to every subsequent call.
#[derive(Clone)]
pub struct ShelterClient {
    client: Client,
    base_url: String,
}

impl ShelterClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, RestError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RestError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, RestError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).query(params).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RestError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.post(&url).json(body).send().await?;
        self.handle_response(resp).await
    }

    /// POST whose success body is not JSON (login answers plain "OK")
    async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), RestError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.post(&url).json(body).send().await?;
        self.check_status(resp).await.map(|_| ())
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, RestError> {
        let text = self.check_status(resp).await?;
        serde_json::from_str(&text).map_err(|e| RestError::Parse(e.to_string()))
    }

    async fn check_status(&self, resp: reqwest::Response) -> Result<String, RestError> {
        let status = resp.status();
        let text = resp.text().await?;

        if status.as_u16() == 401 {
            return Err(RestError::Unauthorized);
        }
        if status.is_server_error() {
            return Err(RestError::Server {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            warn!("Catalog rejected request: HTTP {} - {}", status, text);
            return Err(RestError::Client {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }
}

#[async_trait]
impl Catalog for ShelterClient {
    async fn login(&self, name: &str, email: &str) -> CatalogResult<()> {
        debug!("Logging in as {}", name);
        self.post_unit("/auth/login", &LoginRequest { name, email })
            .await
            .map_err(CatalogError::from)
    }

    async fn breeds(&self) -> CatalogResult<Vec<String>> {
        self.get("/dogs/breeds").await.map_err(CatalogError::from)
    }

    async fn search(&self, request: &SearchRequest) -> CatalogResult<SearchPage> {
        let result = match request {
            SearchRequest::Filters(query) => {
                self.get_with_params("/dogs/search", &wire::search_params(query))
                    .await
            }
            // The token encodes its own filters and offset; it is appended
            // verbatim, never re-derived from current state.
            SearchRequest::Resume(cursor) => {
                let path = format!("/dogs/search{}", cursor.query_string());
                self.get(&path).await
            }
        };
        result.map_err(CatalogError::from)
    }

    async fn dogs(&self, ids: &[DogId]) -> CatalogResult<Vec<Dog>> {
        self.post("/dogs", ids).await.map_err(CatalogError::from)
    }

    async fn locations(&self, zip_codes: &[ZipCode]) -> CatalogResult<Vec<Location>> {
        self.post("/locations", zip_codes)
            .await
            .map_err(CatalogError::from)
    }

    async fn locations_within(&self, bounds: &Bounds, size: u32) -> CatalogResult<Vec<Location>> {
        let body = GeoSearchRequest::new(bounds, size);
        let resp: GeoSearchResponse = self
            .post("/locations/search", &body)
            .await
            .map_err(CatalogError::from)?;
        Ok(resp.results)
    }

    async fn match_dog(&self, ids: &[DogId]) -> CatalogResult<DogId> {
        let resp: MatchResponse = self
            .post("/dogs/match", ids)
            .await
            .map_err(CatalogError::from)?;
        Ok(resp.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_default_config;
    use pawfinder_core::Cursor;

    #[test]
    fn test_client_builds_from_default_config() {
        let config = load_default_config().unwrap();
        let client = ShelterClient::new(&config).unwrap();
        assert!(!client.base_url.ends_with('/'));
    }

    #[test]
    fn test_resume_path_uses_token_verbatim() {
        let cursor = Cursor::new("/dogs/search?size=12&sort=breed:asc&from=12");
        let path = format!("/dogs/search{}", cursor.query_string());
        assert_eq!(path, "/dogs/search?size=12&sort=breed:asc&from=12");
    }
}
