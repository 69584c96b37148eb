//! The simulator itself

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use pawfinder_core::{
    Bounds, Cursor, Dog, DogId, FilterQuery, GRID_PAGE_SIZE, Location, SearchPage, SearchRequest,
    SortDirection, SortField, SortSpec, ZipCode,
};
use pawfinder_ports::{Catalog, CatalogError, CatalogResult};
use tokio::time::sleep;

/// Catalog endpoints, for counters and fault injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Breeds,
    Search,
    Dogs,
    Locations,
    LocationsWithin,
    Match,
}

#[derive(Debug, Default)]
struct CallCounters {
    login: AtomicUsize,
    breeds: AtomicUsize,
    search: AtomicUsize,
    dogs: AtomicUsize,
    locations: AtomicUsize,
    locations_within: AtomicUsize,
    matches: AtomicUsize,
}

impl CallCounters {
    fn cell(&self, endpoint: Endpoint) -> &AtomicUsize {
        match endpoint {
            Endpoint::Login => &self.login,
            Endpoint::Breeds => &self.breeds,
            Endpoint::Search => &self.search,
            Endpoint::Dogs => &self.dogs,
            Endpoint::Locations => &self.locations,
            Endpoint::LocationsWithin => &self.locations_within,
            Endpoint::Match => &self.matches,
        }
    }
}

struct SimState {
    dogs: Vec<Dog>,
    locations: Vec<Location>,
    logged_in: bool,
    require_login: bool,
    latency: Option<Duration>,
    failures: HashMap<Endpoint, VecDeque<CatalogError>>,
}

/// In-memory shelter catalog
pub struct ShelterSim {
    state: Mutex<SimState>,
    counters: CallCounters,
}

impl ShelterSim {
    pub fn new(dogs: Vec<Dog>, locations: Vec<Location>) -> Self {
        Self {
            state: Mutex::new(SimState {
                dogs,
                locations,
                logged_in: false,
                require_login: false,
                latency: None,
                failures: HashMap::new(),
            }),
            counters: CallCounters::default(),
        }
    }

    /// Simulator seeded with the standard fixture herd
    pub fn seeded() -> Self {
        let (dogs, locations) = crate::fixtures::herd(26);
        Self::new(dogs, locations)
    }

    /// Delay applied to every call; `None` answers immediately
    pub fn set_latency(&self, latency: Option<Duration>) {
        self.lock().latency = latency;
    }

    /// Queue a failure for the next call to `endpoint`
    pub fn fail_next(&self, endpoint: Endpoint, error: CatalogError) {
        self.lock()
            .failures
            .entry(endpoint)
            .or_default()
            .push_back(error);
    }

    /// When enabled, every endpoint except login answers 401 until a login
    /// succeeds
    pub fn require_login(&self, required: bool) {
        self.lock().require_login = required;
    }

    /// Drop the session, as the real service does on cookie expiry
    pub fn logout(&self) {
        self.lock().logged_in = false;
    }

    /// Number of calls made to `endpoint` so far
    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.counters.cell(endpoint).load(Ordering::SeqCst)
    }

    /// Per-call bookkeeping: counter, latency, scripted failures, session
    async fn begin(&self, endpoint: Endpoint) -> CatalogResult<()> {
        self.counters.cell(endpoint).fetch_add(1, Ordering::SeqCst);

        let (latency, failure, unauthorized) = {
            let mut state = self.lock();
            let failure = state
                .failures
                .get_mut(&endpoint)
                .and_then(|queue| queue.pop_front());
            let unauthorized =
                state.require_login && !state.logged_in && endpoint != Endpoint::Login;
            (state.latency, failure, unauthorized)
        };

        if let Some(latency) = latency {
            sleep(latency).await;
        }
        if let Some(error) = failure {
            return Err(error);
        }
        if unauthorized {
            return Err(CatalogError::SessionExpired);
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn matches_filters(dog: &Dog, query: &FilterQuery) -> bool {
    if !query.breeds.is_empty() && !query.breeds.contains(&dog.breed) {
        return false;
    }
    if query.age_min.is_some_and(|min| dog.age < min) {
        return false;
    }
    if query.age_max.is_some_and(|max| dog.age > max) {
        return false;
    }
    if !query.zip_codes.is_empty() && !query.zip_codes.contains(&dog.zip_code) {
        return false;
    }
    true
}

fn run_search(state: &SimState, query: &FilterQuery, from: u64) -> SearchPage {
    let mut matches: Vec<&Dog> = state
        .dogs
        .iter()
        .filter(|dog| matches_filters(dog, query))
        .collect();

    matches.sort_by(|a, b| {
        let ordering = match query.sort.field {
            SortField::Breed => a.breed.cmp(&b.breed),
            SortField::Name => a.name.cmp(&b.name),
        };
        match query.sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    let total = matches.len() as u64;
    let size = query.size as u64;
    let result_ids: Vec<DogId> = matches
        .iter()
        .skip(from as usize)
        .take(query.size as usize)
        .map(|dog| dog.id.clone())
        .collect();

    let next = (from + size < total).then(|| encode_cursor(query, from + size));
    let prev = (from > 0).then(|| encode_cursor(query, from.saturating_sub(size)));

    SearchPage {
        result_ids,
        total,
        next,
        prev,
    }
}

/// Continuation token in the shape the real service returns. The token
/// carries the full query, so resuming never consults current filters.
fn encode_cursor(query: &FilterQuery, from: u64) -> Cursor {
    let mut token = format!(
        "/dogs/search?size={}&sort={}&from={}",
        query.size, query.sort, from
    );
    for breed in &query.breeds {
        token.push_str(&format!("&breeds={breed}"));
    }
    if let Some(min) = query.age_min {
        token.push_str(&format!("&ageMin={min}"));
    }
    if let Some(max) = query.age_max {
        token.push_str(&format!("&ageMax={max}"));
    }
    for zip in &query.zip_codes {
        token.push_str(&format!("&zipCodes={zip}"));
    }
    Cursor::new(token)
}

fn decode_cursor(cursor: &Cursor) -> CatalogResult<(FilterQuery, u64)> {
    let mut query = FilterQuery {
        breeds: Vec::new(),
        age_min: None,
        age_max: None,
        zip_codes: Vec::new(),
        size: GRID_PAGE_SIZE,
        sort: SortSpec::default(),
    };
    let mut from = 0u64;

    let bad = |token: &Cursor| CatalogError::Client {
        status: 400,
        message: format!("invalid cursor: {}", token.as_str()),
    };

    for (key, value) in cursor
        .query_string()
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
    {
        match key {
            "size" => query.size = value.parse().map_err(|_| bad(cursor))?,
            "sort" => query.sort = value.parse().map_err(|_| bad(cursor))?,
            "from" => from = value.parse().map_err(|_| bad(cursor))?,
            "breeds" => query.breeds.push(value.to_string()),
            "ageMin" => query.age_min = Some(value.parse().map_err(|_| bad(cursor))?),
            "ageMax" => query.age_max = Some(value.parse().map_err(|_| bad(cursor))?),
            "zipCodes" => query.zip_codes.push(value.to_string()),
            _ => {}
        }
    }

    Ok((query, from))
}

#[async_trait]
impl Catalog for ShelterSim {
    async fn login(&self, _name: &str, _email: &str) -> CatalogResult<()> {
        self.begin(Endpoint::Login).await?;
        self.lock().logged_in = true;
        Ok(())
    }

    async fn breeds(&self) -> CatalogResult<Vec<String>> {
        self.begin(Endpoint::Breeds).await?;
        let state = self.lock();
        let mut breeds: Vec<String> = state.dogs.iter().map(|dog| dog.breed.clone()).collect();
        breeds.sort();
        breeds.dedup();
        Ok(breeds)
    }

    async fn search(&self, request: &SearchRequest) -> CatalogResult<SearchPage> {
        self.begin(Endpoint::Search).await?;
        let (query, from) = match request {
            SearchRequest::Filters(query) => (query.clone(), 0),
            SearchRequest::Resume(cursor) => decode_cursor(cursor)?,
        };
        let state = self.lock();
        Ok(run_search(&state, &query, from))
    }

    async fn dogs(&self, ids: &[DogId]) -> CatalogResult<Vec<Dog>> {
        self.begin(Endpoint::Dogs).await?;
        let state = self.lock();
        // Order-preserving, like the real service
        Ok(ids
            .iter()
            .filter_map(|id| state.dogs.iter().find(|dog| &dog.id == id).cloned())
            .collect())
    }

    async fn locations(&self, zip_codes: &[ZipCode]) -> CatalogResult<Vec<Location>> {
        self.begin(Endpoint::Locations).await?;
        let state = self.lock();
        Ok(zip_codes
            .iter()
            .filter_map(|zip| {
                state
                    .locations
                    .iter()
                    .find(|location| &location.zip_code == zip)
                    .cloned()
            })
            .collect())
    }

    async fn locations_within(&self, bounds: &Bounds, size: u32) -> CatalogResult<Vec<Location>> {
        self.begin(Endpoint::LocationsWithin).await?;
        let state = self.lock();
        Ok(state
            .locations
            .iter()
            .filter(|location| bounds.contains(location.latitude, location.longitude))
            .take(size as usize)
            .cloned()
            .collect())
    }

    async fn match_dog(&self, ids: &[DogId]) -> CatalogResult<DogId> {
        self.begin(Endpoint::Match).await?;
        ids.first().cloned().ok_or(CatalogError::Client {
            status: 400,
            message: "empty id list".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use pawfinder_core::QueryState;

    fn filters(size: u32) -> SearchRequest {
        SearchRequest::Filters(FilterQuery::from_state(&QueryState::default(), size))
    }

    #[tokio::test]
    async fn test_pagination_cursors() {
        let (dogs, locations) = fixtures::herd(30);
        let sim = ShelterSim::new(dogs, locations);

        let first = sim.search(&filters(12)).await.unwrap();
        assert_eq!(first.result_ids.len(), 12);
        assert_eq!(first.total, 30);
        assert!(first.prev.is_none());

        let next = first.next.expect("first page has a next cursor");
        assert_eq!(next.offset(), 12);

        let second = sim.search(&SearchRequest::Resume(next)).await.unwrap();
        assert_eq!(second.result_ids.len(), 12);
        assert_eq!(second.prev.as_ref().map(Cursor::offset), Some(0));
        assert_eq!(second.next.as_ref().map(Cursor::offset), Some(24));

        let third = sim
            .search(&SearchRequest::Resume(second.next.unwrap()))
            .await
            .unwrap();
        assert_eq!(third.result_ids.len(), 6);
        assert!(third.next.is_none());
    }

    #[tokio::test]
    async fn test_cursor_carries_filters() {
        let (dogs, locations) = fixtures::herd(30);
        let sim = ShelterSim::new(dogs, locations);

        let state = QueryState {
            breed: Some("Boxer".to_string()),
            ..QueryState::default()
        };
        let request = SearchRequest::Filters(FilterQuery::from_state(&state, 4));
        let first = sim.search(&request).await.unwrap();
        let total = first.total;
        assert!(total < 30);

        // Resuming must keep the breed restriction without re-sending it
        let second = sim
            .search(&SearchRequest::Resume(first.next.unwrap()))
            .await
            .unwrap();
        assert_eq!(second.total, total);
    }

    #[tokio::test]
    async fn test_sort_orders_results() {
        let (dogs, locations) = fixtures::herd(10);
        let sim = ShelterSim::new(dogs.clone(), locations);

        let state = QueryState {
            sort: "name:desc".parse().unwrap(),
            ..QueryState::default()
        };
        let request = SearchRequest::Filters(FilterQuery::from_state(&state, 50));
        let page = sim.search(&request).await.unwrap();

        let mut names: Vec<String> = dogs.iter().map(|dog| dog.name.clone()).collect();
        names.sort();
        names.reverse();
        let got: Vec<String> = page
            .result_ids
            .iter()
            .map(|id| dogs.iter().find(|dog| &dog.id == id).unwrap().name.clone())
            .collect();
        assert_eq!(got, names);
    }

    #[tokio::test]
    async fn test_scripted_failure_consumed_once() {
        let sim = ShelterSim::seeded();
        sim.fail_next(Endpoint::Breeds, CatalogError::Server { status: 503 });

        assert_eq!(
            sim.breeds().await,
            Err(CatalogError::Server { status: 503 })
        );
        assert!(sim.breeds().await.is_ok());
        assert_eq!(sim.calls(Endpoint::Breeds), 2);
    }

    #[tokio::test]
    async fn test_session_gate() {
        let sim = ShelterSim::seeded();
        sim.require_login(true);

        assert_eq!(sim.breeds().await, Err(CatalogError::SessionExpired));
        sim.login("tester", "tester@example.com").await.unwrap();
        assert!(sim.breeds().await.is_ok());

        sim.logout();
        assert_eq!(sim.breeds().await, Err(CatalogError::SessionExpired));
    }
}
