//! Shelter Catalog Simulator
//!
//! In-memory implementation of the `Catalog` port for integration tests and
//! the demo runner. Behaves like the real service where it matters:
//! - deterministic filtering, sorting, and pagination over seeded fixtures
//! - continuation tokens in the real wire format
//!   (`/dogs/search?size=12&sort=breed:asc&from=12&...`), carrying their own
//!   filters so resuming never consults current state
//! - per-endpoint call counters, injectable latency, and a scripted failure
//!   queue for exercising failure and staleness paths
//! - an optional session flag so expired-session (401) behavior can be
//!   reproduced

pub mod fixtures;
pub mod sim;

pub use sim::{Endpoint, ShelterSim};
