//! Store configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Where character files and the catalog live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding one `character_{id}.json` per character.
    pub data_dir: PathBuf,
    /// RON catalog file. `None` means an empty catalog.
    pub catalog_path: Option<PathBuf>,
}

impl StoreConfig {
    pub const DATA_DIR_VAR: &'static str = "SHEET_DATA_DIR";
    pub const CATALOG_PATH_VAR: &'static str = "SHEET_CATALOG_PATH";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            catalog_path: None,
        }
    }

    pub fn with_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SHEET_DATA_DIR` - Directory for character files (default: platform data dir)
    /// - `SHEET_CATALOG_PATH` - RON catalog to load (default: none)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>(Self::DATA_DIR_VAR) {
            config.data_dir = dir;
        }

        config.catalog_path = read_env::<PathBuf>(Self::CATALOG_PATH_VAR);

        config
    }

    /// Platform data directory for character sheets.
    ///
    /// - macOS: `~/Library/Application Support/sheet`
    /// - Linux: `~/.local/share/sheet` (or `$XDG_DATA_HOME/sheet`)
    /// - Windows: `%APPDATA%\sheet`
    /// - Fallback: `./sheet_data`
    pub fn default_data_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "sheet")
            .map(|dirs| dirs.data_dir().join("characters"))
            .unwrap_or_else(|| PathBuf::from("./sheet_data"))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(Self::default_data_dir())
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let value = env::var(key).ok()?;
    if value.trim().is_empty() {
        return None;
    }
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let config = StoreConfig::new("/srv/sheets").with_catalog("/srv/catalog.ron");
        assert_eq!(config.data_dir, PathBuf::from("/srv/sheets"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/catalog.ron")));
    }

    #[test]
    fn default_dir_is_absolute_or_fallback() {
        let dir = StoreConfig::default_data_dir();
        assert!(dir.is_absolute() || dir == PathBuf::from("./sheet_data"));
    }
}
