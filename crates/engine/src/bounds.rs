//! Bounds-driven map reconciler
//!
//! Independent fetch stream for the map view: zip codes within the
//! viewport first, then a zip-restricted search, then the shared
//! record/location resolution. Same single-flight discard rule as the
//! filter stream, with its own sequence counter and snapshot.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, warn};
use pawfinder_core::{
    BOUNDS_ZIP_LIMIT, Bounds, FilterQuery, MAP_PAGE_SIZE, QueryState, SearchPage, SearchRequest,
    ZipCode,
};
use pawfinder_ports::{Catalog, CatalogError};
use tokio::sync::{mpsc, watch};

use crate::event::EngineEvent;
use crate::resolve::{self, ResolvedPage};
use crate::snapshot::Snapshot;

/// Reconciler for the bounds-driven fetch stream (map view)
pub struct BoundsReconciler {
    catalog: Arc<dyn Catalog>,
    snapshot: Mutex<Snapshot>,
    /// Newest cycle number for this stream
    cycle: AtomicU64,
    snapshot_tx: watch::Sender<Snapshot>,
    events: mpsc::UnboundedSender<EngineEvent>,
}

impl BoundsReconciler {
    pub fn new(catalog: Arc<dyn Catalog>) -> (Arc<Self>, mpsc::UnboundedReceiver<EngineEvent>) {
        let (snapshot_tx, _) = watch::channel(Snapshot::default());
        let (events, events_rx) = mpsc::unbounded_channel();
        let reconciler = Arc::new(Self {
            catalog,
            snapshot: Mutex::new(Snapshot::default()),
            cycle: AtomicU64::new(0),
            snapshot_tx,
            events,
        });
        (reconciler, events_rx)
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.lock().clone()
    }

    /// Subscribe to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    /// The viewport moved; reload the dogs within it
    pub async fn set_bounds(&self, bounds: Bounds) {
        let cycle = self.cycle.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Bounds cycle {} started", cycle);
        self.set_loading(true);

        let outcome = self.fetch(&bounds).await;

        if self.cycle.load(Ordering::SeqCst) != cycle {
            debug!("Bounds cycle {} superseded, result discarded", cycle);
            return;
        }

        match outcome {
            Ok(Some((page, resolved))) => {
                debug!(
                    "Bounds cycle {} settled: {} dogs of {}",
                    cycle,
                    resolved.dogs.len(),
                    page.total
                );
                self.apply(Snapshot {
                    dogs: resolved.dogs,
                    locations: resolved.locations,
                    total: page.total,
                    next: page.next,
                    prev: page.prev,
                    loading: false,
                    offset: 0,
                });
            }
            // No zip codes in view: empty snapshot, later stages skipped
            Ok(None) => {
                debug!("Bounds cycle {} settled: no zip codes in view", cycle);
                self.apply(Snapshot::default());
            }
            Err(error) => {
                self.set_loading(false);
                self.notify_failure(error);
            }
        }
    }

    async fn fetch(
        &self,
        bounds: &Bounds,
    ) -> Result<Option<(SearchPage, ResolvedPage)>, CatalogError> {
        let zips: Vec<ZipCode> = self
            .catalog
            .locations_within(bounds, BOUNDS_ZIP_LIMIT)
            .await?
            .into_iter()
            .map(|location| location.zip_code)
            .collect();

        if zips.is_empty() {
            return Ok(None);
        }

        let query =
            FilterQuery::from_state(&QueryState::default(), MAP_PAGE_SIZE).with_zip_codes(zips);
        let page = self.catalog.search(&SearchRequest::Filters(query)).await?;
        let resolved = resolve::resolve_page(self.catalog.as_ref(), &page.result_ids).await?;
        Ok(Some((page, resolved)))
    }

    fn apply(&self, snapshot: Snapshot) {
        {
            let mut current = self.lock();
            *current = snapshot.clone();
        }
        self.snapshot_tx.send_replace(snapshot);
    }

    fn set_loading(&self, loading: bool) {
        let updated = {
            let mut current = self.lock();
            if current.loading == loading {
                None
            } else {
                current.loading = loading;
                Some(current.clone())
            }
        };
        if let Some(snapshot) = updated {
            self.snapshot_tx.send_replace(snapshot);
        }
    }

    fn notify_failure(&self, error: CatalogError) {
        match error {
            CatalogError::SessionExpired => {
                warn!("Bounds cycle failed: session expired");
                let _ = self.events.send(EngineEvent::SessionExpired);
            }
            CatalogError::Client { status, message } => {
                warn!("Catalog rejected bounds search (HTTP {}): {}", status, message);
            }
            other => {
                warn!("Bounds cycle failed: {}", other);
                let _ = self.events.send(EngineEvent::SearchFailed(other.to_string()));
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
