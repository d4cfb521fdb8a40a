//! Directory and file resolution for xtask commands
//!
//! Command-line flags win over the environment (`SHEET_DATA_DIR`,
//! `SHEET_CATALOG_PATH`, possibly from `.env`), which wins over the platform
//! data directory.

use anyhow::{Context, Result};
use sheet_content::CatalogLoader;
use sheet_core::Catalog;
use sheet_store::StoreConfig;
use std::path::PathBuf;

/// Directory holding `character_{id}.json` files.
pub fn data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| StoreConfig::from_env().data_dir)
}

/// Catalog to resolve names against, if one is configured.
pub fn catalog_path(flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| StoreConfig::from_env().catalog_path)
}

/// Loads the configured catalog, or an empty one when none is configured.
pub fn load_catalog(flag: Option<PathBuf>) -> Result<Catalog> {
    match catalog_path(flag) {
        Some(path) => CatalogLoader::load(&path)
            .with_context(|| format!("Failed to load catalog: {}", path.display())),
        None => Ok(Catalog::default()),
    }
}
