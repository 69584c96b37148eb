//! Engine errors

use pawfinder_ports::CatalogError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Cannot generate a match from an empty favorites set")]
    EmptyFavorites,

    #[error("Matched dog {0} has no catalog record")]
    MatchNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
