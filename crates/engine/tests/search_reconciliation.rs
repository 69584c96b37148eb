//! Integration tests: SearchReconciler <-> ShelterSim
//!
//! Exercises the filter-driven fetch stream end to end: filter changes,
//! debounced age inputs, pagination cursors, single-flight staleness, and
//! failure semantics.

use std::sync::Arc;
use std::time::Duration;

use pawfinder_core::{Dog, Location, SortField};
use pawfinder_engine::{EngineEvent, SearchReconciler};
use pawfinder_ports::CatalogError;
use shelter_sim::{Endpoint, ShelterSim, fixtures};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::sleep;

fn dog(id: &str, name: &str, age: u32, zip: &str, breed: &str) -> Dog {
    Dog {
        id: id.to_string(),
        img: format!("https://images.example/{id}.jpg"),
        name: name.to_string(),
        age,
        zip_code: zip.to_string(),
        breed: breed.to_string(),
    }
}

fn location(zip: &str, lat: f64, lng: f64) -> Location {
    Location {
        zip_code: zip.to_string(),
        latitude: lat,
        longitude: lng,
        city: "Testville".to_string(),
        state: "TS".to_string(),
        county: "Test".to_string(),
    }
}

/// Two in-range Boxers plus decoys that the filters must exclude
fn boxer_sim() -> ShelterSim {
    ShelterSim::new(
        vec![
            dog("a", "Ace", 3, "10001", "Boxer"),
            dog("b", "Biscuit", 4, "10002", "Boxer"),
            dog("c", "Cosmo", 3, "19104", "Husky"),
            dog("d", "Duke", 9, "60614", "Boxer"),
        ],
        vec![
            location("10001", 40.7506, -73.9972),
            location("10002", 40.7157, -73.9863),
            location("19104", 39.9597, -75.2024),
            location("60614", 41.9227, -87.6533),
        ],
    )
}

#[tokio::test(start_paused = true)]
async fn test_filtered_search_resolves_records_and_locations() {
    let _ = env_logger::try_init();
    let sim = Arc::new(boxer_sim());
    let (search, _events) = SearchReconciler::new(sim.clone());

    search.toggle_sort(SortField::Name).await;
    search.age_min_input(Some(2));
    search.age_max_input(Some(5));
    sleep(Duration::from_millis(600)).await;
    search.set_breed(Some("Boxer".to_string())).await;

    let query = search.query();
    assert_eq!(query.age_min, Some(2));
    assert_eq!(query.age_max, Some(5));
    assert_eq!(query.sort.to_string(), "name:asc");

    let snapshot = search.snapshot();
    let ids: Vec<&str> = snapshot.dogs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(snapshot.total, 2);
    assert!(!snapshot.loading);

    let mut zips: Vec<&str> = snapshot.locations.keys().map(String::as_str).collect();
    zips.sort();
    assert_eq!(zips, vec!["10001", "10002"]);
}

#[tokio::test]
async fn test_snapshot_preserves_server_order() {
    let (dogs, locations) = fixtures::herd(20);
    let sim = Arc::new(ShelterSim::new(dogs, locations));
    let (search, _events) = SearchReconciler::new(sim.clone());

    search.toggle_sort(SortField::Name).await;
    let names: Vec<String> = search
        .snapshot()
        .dogs
        .iter()
        .map(|d| d.name.clone())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted, "ascending server order must be kept as-is");

    // Toggling the active field flips to descending
    search.toggle_sort(SortField::Name).await;
    let names: Vec<String> = search
        .snapshot()
        .dogs
        .iter()
        .map(|d| d.name.clone())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    sorted.reverse();
    assert_eq!(names, sorted, "descending server order must be kept as-is");
}

#[tokio::test]
async fn test_set_sort_replaces_specification() {
    let (dogs, locations) = fixtures::herd(10);
    let sim = Arc::new(ShelterSim::new(dogs, locations));
    let (search, _events) = SearchReconciler::new(sim.clone());

    search.set_sort("name:desc".parse().unwrap()).await;
    assert_eq!(search.query().sort.to_string(), "name:desc");

    let names: Vec<String> = search
        .snapshot()
        .dogs
        .iter()
        .map(|d| d.name.clone())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    sorted.reverse();
    assert_eq!(names, sorted);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_age_input_commits_once_with_final_value() {
    let (dogs, locations) = fixtures::herd(20);
    let sim = Arc::new(ShelterSim::new(dogs, locations));
    let (search, _events) = SearchReconciler::new(sim.clone());
    let baseline = sim.calls(Endpoint::Search);

    search.age_min_input(Some(1));
    sleep(Duration::from_millis(100)).await;
    search.age_min_input(Some(2));
    sleep(Duration::from_millis(100)).await;
    search.age_min_input(Some(3));

    sleep(Duration::from_millis(700)).await;

    assert_eq!(sim.calls(Endpoint::Search), baseline + 1);
    assert_eq!(search.query().age_min, Some(3));
}

#[tokio::test(start_paused = true)]
async fn test_invalid_age_range_is_not_committed() {
    let (dogs, locations) = fixtures::herd(20);
    let sim = Arc::new(ShelterSim::new(dogs, locations));
    let (search, _events) = SearchReconciler::new(sim.clone());
    let baseline = sim.calls(Endpoint::Search);

    search.age_min_input(Some(8));
    search.age_max_input(Some(2));
    sleep(Duration::from_millis(700)).await;

    assert_eq!(sim.calls(Endpoint::Search), baseline);
    assert_eq!(search.query().age_min, None);
    assert_eq!(search.query().age_max, None);
}

#[tokio::test(start_paused = true)]
async fn test_stale_cycle_result_is_discarded() {
    let _ = env_logger::try_init();
    let sim = Arc::new(boxer_sim());
    let (search, _events) = SearchReconciler::new(sim.clone());

    // First trigger answers slowly, second immediately; the slow result
    // arrives last and must be dropped.
    sim.set_latency(Some(Duration::from_millis(200)));
    let slow = {
        let search = Arc::clone(&search);
        tokio::spawn(async move { search.set_breed(Some("Boxer".to_string())).await })
    };
    sleep(Duration::from_millis(50)).await;

    sim.set_latency(None);
    search.set_breed(Some("Husky".to_string())).await;
    slow.await.unwrap();

    let snapshot = search.snapshot();
    assert_eq!(search.query().breed.as_deref(), Some("Husky"));
    assert!(snapshot.dogs.iter().all(|d| d.breed == "Husky"));
    assert!(!snapshot.loading);
}

#[tokio::test]
async fn test_cursor_round_trip_returns_to_original_offset() {
    let (dogs, locations) = fixtures::herd(30);
    let sim = Arc::new(ShelterSim::new(dogs, locations));
    let (search, _events) = SearchReconciler::new(sim.clone());

    search.refresh().await;
    assert_eq!(search.snapshot().offset, 0);
    assert_eq!(search.snapshot().dogs.len(), 12);

    search.page_next().await;
    let snapshot = search.snapshot();
    assert_eq!(snapshot.offset, 12);
    assert_eq!(snapshot.shown_range(), (13, 24));

    search.page_prev().await;
    assert_eq!(search.snapshot().offset, 0);
}

#[tokio::test]
async fn test_empty_result_short_circuits() {
    let sim = Arc::new(boxer_sim());
    let (search, _events) = SearchReconciler::new(sim.clone());

    search.set_breed(Some("Chihuahua".to_string())).await;

    let snapshot = search.snapshot();
    assert!(snapshot.dogs.is_empty());
    assert!(snapshot.locations.is_empty());
    assert_eq!(snapshot.total, 0);
    // Stages two and three must not run at all
    assert_eq!(sim.calls(Endpoint::Dogs), 0);
    assert_eq!(sim.calls(Endpoint::Locations), 0);
}

#[tokio::test]
async fn test_session_expiry_leaves_snapshot_intact() {
    let _ = env_logger::try_init();
    let sim = Arc::new(boxer_sim());
    let (search, mut events) = SearchReconciler::new(sim.clone());

    search.refresh().await;
    let before = search.snapshot();
    assert!(!before.dogs.is_empty());

    // 401 in stage two of the next cycle
    sim.fail_next(Endpoint::Dogs, CatalogError::SessionExpired);
    search.set_breed(Some("Boxer".to_string())).await;

    let after = search.snapshot();
    let before_ids: Vec<&str> = before.dogs.iter().map(|d| d.id.as_str()).collect();
    let after_ids: Vec<&str> = after.dogs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(after_ids, before_ids);
    assert_eq!(after.total, before.total);
    assert!(!after.loading);

    assert_eq!(events.try_recv(), Ok(EngineEvent::SessionExpired));
    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn test_server_error_emits_one_notification() {
    let sim = Arc::new(boxer_sim());
    let (search, mut events) = SearchReconciler::new(sim.clone());

    search.refresh().await;
    let before = search.snapshot();

    sim.fail_next(Endpoint::Search, CatalogError::Server { status: 503 });
    search.refresh().await;

    let after = search.snapshot();
    assert_eq!(after.dogs.len(), before.dogs.len());
    assert!(!after.loading);

    assert!(matches!(events.try_recv(), Ok(EngineEvent::SearchFailed(_))));
    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn test_client_error_is_logged_but_silent() {
    let sim = Arc::new(boxer_sim());
    let (search, mut events) = SearchReconciler::new(sim.clone());

    sim.fail_next(
        Endpoint::Search,
        CatalogError::Client {
            status: 404,
            message: "not found".to_string(),
        },
    );
    search.refresh().await;

    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
    assert!(!search.snapshot().loading);
}
