//! Demo runner: one scripted browsing session.
//!
//! Runs against the in-memory simulator by default; set
//! `PAWFINDER_BASE_URL` to browse a live catalog service through the REST
//! gateway instead.

use std::sync::Arc;

use log::info;
use pawfinder_core::SortField;
use pawfinder_engine::{FavoritesLedger, MatchOrchestrator, SearchReconciler};
use pawfinder_ports::Catalog;
use pawfinder_runner::{RunnerConfig, bootstrap};
use shelter_sim::ShelterSim;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    bootstrap::init_logging();
    let config = RunnerConfig::from_env()?;

    let catalog: Arc<dyn Catalog> = if std::env::var_os("PAWFINDER_BASE_URL").is_some() {
        Arc::new(bootstrap::connect(&config).await?)
    } else {
        let sim = ShelterSim::seeded();
        sim.login(&config.name, &config.email).await?;
        info!("Using the in-memory catalog simulator");
        Arc::new(sim)
    };

    let breeds = catalog.breeds().await?;
    info!("{} breeds available", breeds.len());

    let (search, _events) = SearchReconciler::new(Arc::clone(&catalog));
    search.toggle_sort(SortField::Name).await;
    search.set_breed(Some("Boxer".to_string())).await;

    let snapshot = search.snapshot();
    let (from, to) = snapshot.shown_range();
    info!("Showing {}-{} of {} dogs", from, to, snapshot.total);
    for dog in &snapshot.dogs {
        let city = snapshot
            .locations
            .get(&dog.zip_code)
            .map(|location| location.city.as_str())
            .unwrap_or("unknown");
        info!("  {} the {}, age {}, {}", dog.name, dog.breed, dog.age, city);
    }

    let favorites = FavoritesLedger::new();
    for dog in snapshot.dogs.iter().take(2) {
        favorites.toggle(&dog.id);
    }
    info!("Favorited {} dogs", favorites.len());

    let matcher = MatchOrchestrator::new(Arc::clone(&catalog));
    let matched = matcher.find_match(&favorites.to_vec()).await?;
    info!("Matched: {} the {}", matched.name, matched.breed);

    Ok(())
}
