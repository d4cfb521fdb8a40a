//! In-memory store implementations.

use std::collections::BTreeMap;
use std::sync::RwLock;

use sheet_core::{
    Catalog, CatalogId, CharacterId, CharacterRecord, ItemDefinition, ItemPropertyDefinition,
    SkillDefinition, SpellDefinition,
};

use super::{CatalogStore, CharacterStore};
use crate::error::{Result, StoreError};

/// Character store backed by a locked map. Contents are lost on drop.
#[derive(Default)]
pub struct InMemoryCharacterStore {
    records: RwLock<BTreeMap<CharacterId, CharacterRecord>>,
}

impl InMemoryCharacterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = CharacterRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.id, record.normalized()))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }
}

impl CharacterStore for InMemoryCharacterStore {
    fn load(&self, id: CharacterId) -> Result<Option<CharacterRecord>> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.get(&id).cloned())
    }

    fn save(&self, record: &CharacterRecord) -> Result<()> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        records.insert(record.id, record.clone().normalized());
        Ok(())
    }

    fn delete(&self, id: CharacterId) -> Result<bool> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.remove(&id).is_some())
    }

    fn list(&self) -> Result<Vec<CharacterRecord>> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.values().cloned().collect())
    }

    fn insert(&self, record: &CharacterRecord) -> Result<()> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        if records.contains_key(&record.id) {
            return Err(StoreError::AlreadyExists { id: record.id });
        }
        records.insert(record.id, record.clone().normalized());
        Ok(())
    }

    fn next_id(&self) -> Result<CharacterId> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        let next = records.keys().next_back().map_or(1, |id| id.0 + 1);
        Ok(CharacterId(next))
    }

    // Read-modify-write under one write lock.
    fn update<T, F>(&self, id: CharacterId, f: F) -> Result<(CharacterRecord, T)>
    where
        F: FnOnce(&mut CharacterRecord) -> Result<T>,
    {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        let mut record = records.get(&id).cloned().ok_or(StoreError::NotFound { id })?;
        let value = f(&mut record)?;
        let record = record.normalized();
        records.insert(id, record.clone());
        Ok((record, value))
    }
}

/// Catalog held in memory. The whole catalog can be swapped at runtime.
#[derive(Default)]
pub struct InMemoryCatalog {
    catalog: RwLock<Catalog>,
}

impl InMemoryCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(catalog),
        }
    }

    /// Replaces every definition (e.g. after reloading the catalog file).
    pub fn replace(&self, catalog: Catalog) -> Result<()> {
        let mut current = self.catalog.write().map_err(|_| StoreError::LockPoisoned)?;
        *current = catalog;
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&Catalog) -> Option<&T>) -> Result<Option<T>>
    where
        T: Clone,
    {
        let catalog = self.catalog.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(f(&catalog).cloned())
    }
}

impl CatalogStore for InMemoryCatalog {
    fn item(&self, id: CatalogId) -> Result<Option<ItemDefinition>> {
        self.read(|catalog| catalog.item(id))
    }

    fn property(&self, id: CatalogId) -> Result<Option<ItemPropertyDefinition>> {
        self.read(|catalog| catalog.property(id))
    }

    fn skill(&self, id: CatalogId) -> Result<Option<SkillDefinition>> {
        self.read(|catalog| catalog.skill(id))
    }

    fn spell(&self, id: CatalogId) -> Result<Option<SpellDefinition>> {
        self.read(|catalog| catalog.spell(id))
    }
}
