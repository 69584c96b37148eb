//! Pawfinder Runner
//!
//! Wiring and bootstrap for a browsing session: logger initialization,
//! configuration, gateway construction, and login. The `pawfinder-demo`
//! binary drives one scripted session against the in-memory simulator.

pub mod bootstrap;

pub use bootstrap::{BootstrapError, RunnerConfig, connect, init_logging};
