//! File-based CharacterStore implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use sheet_core::{CharacterId, CharacterRecord};

use super::CharacterStore;
use crate::error::{Result, StoreError};

/// Stores each character as its own pretty-printed JSON file.
///
/// # File Format
///
/// Records are stored as `character_{id}.json`, using the same camelCase
/// shape clients exchange, so files stay readable and hand-editable.
/// Writes go to a temp file first and are renamed into place.
///
/// Writes through one store value are serialized, so an [`update`] is atomic
/// with respect to every other write made through the same store. Separate
/// processes sharing a directory are still last-write-wins per file.
///
/// [`update`]: CharacterStore::update
pub struct FileCharacterStore {
    base_dir: PathBuf,
    writes: Mutex<()>,
}

impl FileCharacterStore {
    /// Create a store rooted at `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            writes: Mutex::new(()),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn record_path(&self, id: CharacterId) -> PathBuf {
        self.base_dir.join(format!("character_{}.json", id.0))
    }

    fn lock_writes(&self) -> Result<MutexGuard<'_, ()>> {
        self.writes.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn write_record(&self, record: &CharacterRecord) -> Result<()> {
        let path = self.record_path(record.id);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(&record.clone().normalized())?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved character[{}] to {}", record.id, path.display());

        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<CharacterId>> {
        let mut ids = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(id_str) = filename
                    .strip_prefix("character_")
                    .and_then(|s| s.strip_suffix(".json"))
                && let Ok(id) = id_str.parse::<u64>()
            {
                ids.push(CharacterId(id));
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}

impl CharacterStore for FileCharacterStore {
    fn load(&self, id: CharacterId) -> Result<Option<CharacterRecord>> {
        let path = self.record_path(id);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let record: CharacterRecord = serde_json::from_slice(&bytes)?;

        tracing::debug!("Loaded character[{}] from {}", id, path.display());

        Ok(Some(record.normalized()))
    }

    fn save(&self, record: &CharacterRecord) -> Result<()> {
        let _guard = self.lock_writes()?;
        self.write_record(record)
    }

    fn delete(&self, id: CharacterId) -> Result<bool> {
        let _guard = self.lock_writes()?;
        let path = self.record_path(id);

        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path)?;
        tracing::debug!("Deleted character[{}]", id);
        Ok(true)
    }

    fn list(&self) -> Result<Vec<CharacterRecord>> {
        let mut records = Vec::new();
        for id in self.list_ids()? {
            if let Some(record) = self.load(id)? {
                records.push(record);
            }
        }
        Ok(records)
    }

    fn exists(&self, id: CharacterId) -> Result<bool> {
        Ok(self.record_path(id).exists())
    }

    fn next_id(&self) -> Result<CharacterId> {
        let max = self.list_ids()?.last().map(|id| id.0);
        Ok(CharacterId(max.map_or(1, |id| id + 1)))
    }

    fn update<T, F>(&self, id: CharacterId, f: F) -> Result<(CharacterRecord, T)>
    where
        F: FnOnce(&mut CharacterRecord) -> Result<T>,
    {
        let _guard = self.lock_writes()?;
        let mut record = self.load(id)?.ok_or(StoreError::NotFound { id })?;
        let value = f(&mut record)?;
        let record = record.normalized();
        self.write_record(&record)?;
        Ok((record, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_core::AccountId;
    use tempfile::TempDir;

    #[test]
    fn ignores_foreign_files() {
        let dir = TempDir::new().unwrap();
        let store = FileCharacterStore::new(dir.path()).unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        fs::write(dir.path().join("character_x.json"), "{}").unwrap();

        store
            .save(&CharacterRecord::new(CharacterId(3), AccountId(1), "Ria"))
            .unwrap();

        assert_eq!(store.list_ids().unwrap(), vec![CharacterId(3)]);
        assert_eq!(store.next_id().unwrap(), CharacterId(4));
        assert!(!dir.path().join("character_3.json.tmp").exists());
    }
}
