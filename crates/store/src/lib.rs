//! Persistence and orchestration for character sheets.
//!
//! This crate stores [`sheet_core::CharacterRecord`]s, resolves catalog
//! definitions, and exposes [`SheetService`], which applies access rules and
//! association seeding on top of the pure engine in `sheet-core`.
//!
//! Modules:
//! - [`repository`]: `CharacterStore`/`CatalogStore` contracts with in-memory
//!   and JSON file implementations
//! - [`service`]: the actor-aware operations hosts call
//! - [`config`]: environment-driven store configuration

pub mod config;
pub mod error;
pub mod repository;
pub mod service;

pub use config::StoreConfig;
pub use error::{CatalogKind, Result, StoreError};
pub use repository::{
    CatalogStore, CharacterStore, FileCharacterStore, InMemoryCatalog, InMemoryCharacterStore,
};
pub use service::SheetService;
