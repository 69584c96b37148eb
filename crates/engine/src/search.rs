//! Filter-driven search reconciler
//!
//! Owns the grid view's query state and turns triggering events into
//! three-stage fetch cycles (ids -> records -> locations). Each cycle takes
//! a sequence number at trigger time; only the newest cycle's result is
//! ever applied, so a slow response can never overwrite a newer one. There
//! is no network-level cancellation, only discard-on-arrival.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use log::{debug, warn};
use pawfinder_core::{
    FilterQuery, GRID_PAGE_SIZE, QueryState, SearchPage, SearchRequest, SortField, SortSpec,
};
use pawfinder_ports::{Catalog, CatalogError};
use tokio::sync::{mpsc, watch};

use crate::debounce::Debouncer;
use crate::event::EngineEvent;
use crate::resolve::{self, ResolvedPage};
use crate::snapshot::Snapshot;

/// Quiescence window for the numeric age inputs
pub const AGE_DEBOUNCE: Duration = Duration::from_millis(500);

struct Inner {
    query: QueryState,
    /// Raw age keystrokes awaiting the debounce commit
    age_min_input: Option<u32>,
    age_max_input: Option<u32>,
    snapshot: Snapshot,
    debouncer: Debouncer,
}

/// Reconciler for the filter-driven fetch stream.
///
/// Constructed behind an `Arc` so the debounce timer can call back into it;
/// the paired receiver carries failure/session events to the presentation
/// layer.
pub struct SearchReconciler {
    catalog: Arc<dyn Catalog>,
    page_size: u32,
    inner: Mutex<Inner>,
    /// Newest cycle number for this stream
    cycle: AtomicU64,
    snapshot_tx: watch::Sender<Snapshot>,
    events: mpsc::UnboundedSender<EngineEvent>,
}

impl SearchReconciler {
    pub fn new(catalog: Arc<dyn Catalog>) -> (Arc<Self>, mpsc::UnboundedReceiver<EngineEvent>) {
        Self::with_page_size(catalog, GRID_PAGE_SIZE)
    }

    pub fn with_page_size(
        catalog: Arc<dyn Catalog>,
        page_size: u32,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<EngineEvent>) {
        let (snapshot_tx, _) = watch::channel(Snapshot::default());
        let (events, events_rx) = mpsc::unbounded_channel();
        let reconciler = Arc::new(Self {
            catalog,
            page_size,
            inner: Mutex::new(Inner {
                query: QueryState::default(),
                age_min_input: None,
                age_max_input: None,
                snapshot: Snapshot::default(),
                debouncer: Debouncer::new(AGE_DEBOUNCE),
            }),
            cycle: AtomicU64::new(0),
            snapshot_tx,
            events,
        });
        (reconciler, events_rx)
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot.clone()
    }

    /// Subscribe to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Current committed query state
    pub fn query(&self) -> QueryState {
        self.lock().query.clone()
    }

    /// Select or clear the breed filter; commits immediately
    pub async fn set_breed(&self, breed: Option<String>) {
        {
            let mut inner = self.lock();
            inner.query.breed = breed;
        }
        self.run_fresh().await;
    }

    /// Replace the sort specification; commits immediately
    pub async fn set_sort(&self, sort: SortSpec) {
        {
            let mut inner = self.lock();
            inner.query.sort = sort;
        }
        self.run_fresh().await;
    }

    /// Sort toggle: the active field flips direction, another field is
    /// selected ascending. Commits immediately.
    pub async fn toggle_sort(&self, field: SortField) {
        {
            let mut inner = self.lock();
            inner.query.sort = inner.query.sort.toggled(field);
        }
        self.run_fresh().await;
    }

    /// Record a raw age-minimum keystroke; commits after the quiescence
    /// window with no further input
    pub fn age_min_input(self: &Arc<Self>, value: Option<u32>) {
        let mut inner = self.lock();
        inner.age_min_input = value;
        self.arm_debounce(&mut inner);
    }

    /// Record a raw age-maximum keystroke; commits after the quiescence
    /// window with no further input
    pub fn age_max_input(self: &Arc<Self>, value: Option<u32>) {
        let mut inner = self.lock();
        inner.age_max_input = value;
        self.arm_debounce(&mut inner);
    }

    /// Reset filters and sort to defaults and reload
    pub async fn clear_filters(&self) {
        {
            let mut inner = self.lock();
            inner.debouncer.cancel();
            inner.age_min_input = None;
            inner.age_max_input = None;
            inner.query.reset();
        }
        self.run_fresh().await;
    }

    /// Explicit reload with the current filters (fresh cycle, offset 0)
    pub async fn refresh(&self) {
        self.run_fresh().await;
    }

    /// Advance to the next page, if a continuation token is available
    pub async fn page_next(&self) {
        let cursor = self.lock().snapshot.next.clone();
        if let Some(cursor) = cursor {
            self.run_cycle(SearchRequest::Resume(cursor)).await;
        }
    }

    /// Return to the previous page, if a continuation token is available
    pub async fn page_prev(&self) {
        let cursor = self.lock().snapshot.prev.clone();
        if let Some(cursor) = cursor {
            self.run_cycle(SearchRequest::Resume(cursor)).await;
        }
    }

    /// The debounce timer holds only a weak reference: tearing the
    /// reconciler down mid-wait drops the timer and no stale commit fires.
    fn arm_debounce(self: &Arc<Self>, inner: &mut Inner) {
        let weak: Weak<Self> = Arc::downgrade(self);
        inner.debouncer.schedule(async move {
            if let Some(reconciler) = weak.upgrade() {
                reconciler.commit_ages().await;
            }
        });
    }

    /// Commit the debounced age bounds and trigger a fresh cycle
    async fn commit_ages(&self) {
        {
            let mut inner = self.lock();
            let (min, max) = (inner.age_min_input, inner.age_max_input);
            if !QueryState::ages_valid(min, max) {
                warn!("Ignoring age bounds {:?}..{:?}: min exceeds max", min, max);
                return;
            }
            if inner.query.age_min == min && inner.query.age_max == max {
                return;
            }
            inner.query.age_min = min;
            inner.query.age_max = max;
        }
        self.run_fresh().await;
    }

    async fn run_fresh(&self) {
        let request = {
            let inner = self.lock();
            SearchRequest::Filters(FilterQuery::from_state(&inner.query, self.page_size))
        };
        self.run_cycle(request).await;
    }

    async fn run_cycle(&self, request: SearchRequest) {
        // Newest trigger wins: a later cycle bumps the counter and this
        // cycle's result is discarded on arrival.
        let cycle = self.cycle.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Search cycle {} started", cycle);
        self.set_loading(true);

        let outcome = self.fetch(&request).await;

        if self.cycle.load(Ordering::SeqCst) != cycle {
            debug!("Search cycle {} superseded, result discarded", cycle);
            return;
        }

        match outcome {
            Ok((page, resolved)) => {
                let offset = match &request {
                    SearchRequest::Resume(cursor) => cursor.offset(),
                    SearchRequest::Filters(_) => 0,
                };
                debug!(
                    "Search cycle {} settled: {} dogs at offset {} of {}",
                    cycle,
                    resolved.dogs.len(),
                    offset,
                    page.total
                );
                self.apply(Snapshot {
                    dogs: resolved.dogs,
                    locations: resolved.locations,
                    total: page.total,
                    next: page.next,
                    prev: page.prev,
                    loading: false,
                    offset,
                });
            }
            Err(error) => {
                self.set_loading(false);
                self.notify_failure(error);
            }
        }
    }

    /// Stages one to three; each stage runs only after its predecessor
    /// succeeds.
    async fn fetch(
        &self,
        request: &SearchRequest,
    ) -> Result<(SearchPage, ResolvedPage), CatalogError> {
        let page = self.catalog.search(request).await?;
        let resolved = resolve::resolve_page(self.catalog.as_ref(), &page.result_ids).await?;
        Ok((page, resolved))
    }

    fn apply(&self, snapshot: Snapshot) {
        {
            let mut inner = self.lock();
            inner.snapshot = snapshot.clone();
        }
        self.snapshot_tx.send_replace(snapshot);
    }

    fn set_loading(&self, loading: bool) {
        let updated = {
            let mut inner = self.lock();
            if inner.snapshot.loading == loading {
                None
            } else {
                inner.snapshot.loading = loading;
                Some(inner.snapshot.clone())
            }
        };
        if let Some(snapshot) = updated {
            self.snapshot_tx.send_replace(snapshot);
        }
    }

    fn notify_failure(&self, error: CatalogError) {
        match error {
            CatalogError::SessionExpired => {
                warn!("Search cycle failed: session expired");
                let _ = self.events.send(EngineEvent::SessionExpired);
            }
            // Other 4xx are logged, non-fatal, and raise no notification
            CatalogError::Client { status, message } => {
                warn!("Catalog rejected search (HTTP {}): {}", status, message);
            }
            other => {
                warn!("Search cycle failed: {}", other);
                let _ = self.events.send(EngineEvent::SearchFailed(other.to_string()));
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
