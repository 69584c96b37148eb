//! Error types for the gateway crate

use pawfinder_ports::CatalogError;
use thiserror::Error;

/// Transport-level errors raised by the REST client before normalization
#[derive(Error, Debug)]
pub enum RestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Session expired (HTTP 401)")]
    Unauthorized,

    #[error("Server error: HTTP {status}")]
    Server { status: u16 },

    #[error("Client error: HTTP {status} - {body}")]
    Client { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Convert infrastructure RestError to the port-level taxonomy
impl From<RestError> for CatalogError {
    fn from(err: RestError) -> Self {
        match err {
            RestError::Http(e) => CatalogError::Network(e.to_string()),
            RestError::Unauthorized => CatalogError::SessionExpired,
            RestError::Server { status } => CatalogError::Server { status },
            RestError::Client { status, body } => CatalogError::Client {
                status,
                message: body,
            },
            RestError::Parse(msg) => CatalogError::Decode(msg),
        }
    }
}
