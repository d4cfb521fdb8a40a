//! Store contracts for character records and catalog definitions.

use sheet_core::{
    CatalogId, CharacterId, CharacterPatch, CharacterRecord, ItemDefinition,
    ItemPropertyDefinition, SkillDefinition, SpellDefinition,
};

use crate::error::{Result, StoreError};

/// Persistence for character records.
///
/// Every record handed out by a store is normalized, so callers can resolve it
/// directly. Concurrent writers are last-write-wins per call; [`update`] runs
/// a whole read-modify-write as one call, so edits to different fields of the
/// same record never overwrite each other.
///
/// [`update`]: CharacterStore::update
pub trait CharacterStore: Send + Sync {
    /// Load a character by id.
    fn load(&self, id: CharacterId) -> Result<Option<CharacterRecord>>;

    /// Insert or replace a record.
    fn save(&self, record: &CharacterRecord) -> Result<()>;

    /// Delete a record. Returns false if it did not exist.
    fn delete(&self, id: CharacterId) -> Result<bool>;

    /// All stored records, ordered by id.
    fn list(&self) -> Result<Vec<CharacterRecord>>;

    fn exists(&self, id: CharacterId) -> Result<bool> {
        Ok(self.load(id)?.is_some())
    }

    /// Store a new record, failing if the id is taken.
    fn insert(&self, record: &CharacterRecord) -> Result<()> {
        if self.exists(record.id)? {
            return Err(StoreError::AlreadyExists { id: record.id });
        }
        self.save(record)
    }

    /// Smallest id greater than every stored id.
    fn next_id(&self) -> Result<CharacterId> {
        let max = self.list()?.iter().map(|record| record.id.0).max();
        Ok(CharacterId(max.map_or(1, |id| id + 1)))
    }

    /// Runs `f` on the stored record and saves the normalized result.
    ///
    /// Nothing is written when `f` fails. The default reads and writes in two
    /// steps; stores shared between sessions override it so that no other
    /// write can land in between.
    fn update<T, F>(&self, id: CharacterId, f: F) -> Result<(CharacterRecord, T)>
    where
        F: FnOnce(&mut CharacterRecord) -> Result<T>,
    {
        let mut record = self.load(id)?.ok_or(StoreError::NotFound { id })?;
        let value = f(&mut record)?;
        let record = record.normalized();
        self.save(&record)?;
        Ok((record, value))
    }

    /// Applies `patch` to the stored record and returns the stored result.
    fn apply_partial_update(
        &self,
        id: CharacterId,
        patch: &CharacterPatch,
    ) -> Result<CharacterRecord> {
        self.update(id, |record| {
            *record = patch.apply(record);
            Ok(())
        })
        .map(|(record, ())| record)
    }
}

/// Read access to administrator-managed definitions.
pub trait CatalogStore: Send + Sync {
    fn item(&self, id: CatalogId) -> Result<Option<ItemDefinition>>;

    fn property(&self, id: CatalogId) -> Result<Option<ItemPropertyDefinition>>;

    fn skill(&self, id: CatalogId) -> Result<Option<SkillDefinition>>;

    fn spell(&self, id: CatalogId) -> Result<Option<SpellDefinition>>;
}
