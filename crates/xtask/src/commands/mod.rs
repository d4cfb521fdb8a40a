//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod list_characters;
mod load_catalog;
mod read_sheet;

pub use list_characters::ListCharacters;
pub use load_catalog::LoadCatalog;
pub use read_sheet::ReadSheet;
