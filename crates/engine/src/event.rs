//! Engine events surfaced to the presentation layer

/// Out-of-band notifications emitted by the reconcilers.
///
/// A failed cycle emits at most one event. `SessionExpired` is the signal
/// to redirect to re-authentication; `SearchFailed` surfaces a transient
/// notification while the previous snapshot stays visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SessionExpired,
    SearchFailed(String),
}
