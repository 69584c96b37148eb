//! Pawfinder Engine
//!
//! The search-state reconciliation core. Sits between the presentation
//! layer and the catalog port, responsible for:
//! - **Search reconciliation**: filter/sort/pagination state resolved into
//!   debounced, single-flight fetch cycles
//! - **Map reconciliation**: bounds-driven fetch cycles on an independent
//!   stream
//! - **Favorites**: in-memory ledger with toggle semantics
//! - **Matching**: a set of favorite ids resolved to one recommended dog
//!
//! ## Architecture
//!
//! ```text
//! Presentation (out of scope) ──input──► ┌───────────────────────────────┐
//!                                        │            Engine             │
//!                                        │  ┌─────────────────────────┐  │
//!                                        │  │ SearchReconciler        │  │
//!                                        │  │ - QueryState + debounce │  │
//!                                        │  │ - cycle seq / discard   │  │
//!                                        │  └────────────┬────────────┘  │
//!                                        │  ┌────────────▼────────────┐  │
//!                                        │  │ resolve: ids -> dogs    │  │
//!                                        │  │          -> locations   │  │
//!                                        │  └─────────────────────────┘  │
//!                                        │  BoundsReconciler (map view)  │
//!                                        │  FavoritesLedger              │
//!                                        │  MatchOrchestrator            │
//!                                        └───────────────┬───────────────┘
//!                                                        │ Catalog port
//!                                                Gateway / simulator
//! ```
//!
//! Snapshots flow to the presentation layer over a watch channel; failures
//! and session expiry flow over an event channel. The engine renders
//! nothing and owns no persistence.

pub mod bounds;
pub mod debounce;
pub mod error;
pub mod event;
pub mod favorites;
pub mod matcher;
pub mod resolve;
pub mod search;
pub mod snapshot;

// Re-export main types
pub use bounds::BoundsReconciler;
pub use debounce::Debouncer;
pub use error::{Error, Result};
pub use event::EngineEvent;
pub use favorites::FavoritesLedger;
pub use matcher::MatchOrchestrator;
pub use resolve::{ResolvedPage, resolve_page};
pub use search::{AGE_DEBOUNCE, SearchReconciler};
pub use snapshot::Snapshot;
