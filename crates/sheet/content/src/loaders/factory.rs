//! Content factory for loading everything from one data directory.

use std::path::{Path, PathBuf};

use sheet_core::{Catalog, SheetConfig};

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult};

/// Content factory that loads sheet content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── sheet.toml
/// └── catalog.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "sheet.toml";
    pub const CATALOG_FILE: &'static str = "catalog.ron";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load `sheet.toml`, or defaults when the file does not exist.
    pub fn load_config(&self) -> LoadResult<SheetConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            Ok(SheetConfig::default())
        }
    }

    /// Load `catalog.ron`.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        CatalogLoader::load(&self.data_dir.join(Self::CATALOG_FILE))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().expect("defaults"), SheetConfig::default());
        assert!(factory.load_catalog().is_err());
    }

    #[test]
    fn loads_shipped_data() {
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../data");
        let factory = ContentFactory::new(data);
        let catalog = factory.load_catalog().expect("shipped catalog is valid");
        assert!(!catalog.items.is_empty());
        assert!(!catalog.spells.is_empty());
        factory.load_config().expect("shipped config is valid");
    }
}
