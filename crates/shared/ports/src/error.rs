use thiserror::Error;

/// Failure taxonomy for catalog operations.
///
/// Every transport or service failure is normalized into one of these
/// before it reaches the engine; raw transport errors never cross this
/// boundary. Session expiry (HTTP 401) is kept distinct because it triggers
/// a navigation side effect rather than a notification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Session expired")]
    SessionExpired,

    #[error("Server error (HTTP {status})")]
    Server { status: u16 },

    #[error("Client error (HTTP {status}): {message}")]
    Client { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
