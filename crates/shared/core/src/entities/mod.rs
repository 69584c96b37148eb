//! Domain entities: immutable records as the catalog service returns them

mod dog;
mod location;
mod page;

pub use dog::{Dog, DogId};
pub use location::{Location, ZipCode};
pub use page::SearchPage;
