//! Pawfinder Gateway
//!
//! REST adapter for the shelter catalog service. Provides:
//! - `ShelterClient`, a reqwest-based implementation of the `Catalog` port
//! - Wire query/body serialization for the catalog endpoints
//! - HTTP-status normalization into the `CatalogError` taxonomy
//! - JSON configuration with an embedded default
//!
//! ## Architecture
//!
//! ```text
//! Engine (reconcilers, match)
//!        │
//!        │ Catalog port (async trait)
//!   ┌────▼────────┐
//!   │ShelterClient│  cookie session, status mapping
//!   └────┬────────┘
//!        │ HTTPS
//!   Shelter catalog service
//! ```
//!
//! The session credential is an HttpOnly cookie set by `POST /auth/login`;
//! the client keeps a cookie jar so it is attached to every call.

pub mod config;
pub mod error;
pub mod rest;
pub mod wire;

// Re-export commonly used types
pub use config::{
    ConfigError, GatewayConfig, load_config, load_config_from_str, load_default_config,
};
pub use error::RestError;
pub use rest::ShelterClient;
