//! Repository layer for character sheets.
//!
//! Character records change constantly and go through a [`CharacterStore`].
//! Catalog definitions are administrator-managed reference data and are read
//! through a [`CatalogStore`].

mod file;
mod memory;
mod traits;

pub use file::FileCharacterStore;
pub use memory::{InMemoryCatalog, InMemoryCharacterStore};
pub use traits::{CatalogStore, CharacterStore};
