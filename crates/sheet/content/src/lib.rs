//! Data-driven catalog and configuration loaders.
//!
//! Administrators maintain catalogs (items, item properties, skills, spells) as
//! RON files and rule defaults as TOML. Everything here deserializes straight
//! into `sheet-core` types; content never appears in character records except
//! as catalog ids.

pub mod loaders;

pub use loaders::{CatalogLoader, ConfigLoader, ContentFactory, LoadResult};
