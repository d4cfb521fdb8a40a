//! Sheet service: access rules, catalog assignment and resource edits on top
//! of a [`CharacterStore`] and a [`CatalogStore`].
//!
//! Every mutating call follows the same path through
//! [`CharacterStore::update`]: check the actor's access against the stored
//! record, apply the change, save it, and hand the stored record back so
//! callers resolve a fresh [`SheetView`] from it. The whole step is one store
//! call, so a concurrent edit to another field is never overwritten, and a
//! call that fails leaves the stored record untouched.

use sheet_core::{
    Account, AccountId, AssignOutcome, CatalogId, CharacterId, CharacterPatch, CharacterRecord,
    CharacterSummary, InstanceId, ItemDefinition, ItemInstance, ItemInstanceUpdate,
    ItemPropertyDefinition, RestKind, RestSummary, SheetConfig, SheetView, SkillDefinition, Source,
    SpellDefinition, apply_rest,
};
use tracing::{info, warn};

use crate::error::{CatalogKind, Result, StoreError};
use crate::repository::{CatalogStore, CharacterStore};

pub struct SheetService<S, C> {
    characters: S,
    catalog: C,
    config: SheetConfig,
}

impl<S, C> SheetService<S, C>
where
    S: CharacterStore,
    C: CatalogStore,
{
    pub fn new(characters: S, catalog: C) -> Self {
        Self {
            characters,
            catalog,
            config: SheetConfig::default(),
        }
    }

    /// Defaults applied to newly created characters.
    pub fn with_config(mut self, config: SheetConfig) -> Self {
        self.config = config;
        self
    }

    pub fn characters(&self) -> &S {
        &self.characters
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    // ===== characters =====

    /// Creates an empty level-1 character owned by `owner`. Administrators only.
    pub fn create_character(
        &self,
        actor: &Account,
        owner: AccountId,
        name: impl Into<String>,
    ) -> Result<CharacterRecord> {
        self.require_admin(actor)?;

        let id = self.characters.next_id()?;
        let record = CharacterRecord::from_config(id, owner, name, &self.config);
        self.characters.insert(&record)?;

        info!(character = %id, owner = %owner, "created character");
        Ok(record)
    }

    pub fn get_character(&self, actor: &Account, id: CharacterId) -> Result<CharacterRecord> {
        self.load_for(actor, id)
    }

    /// The character with every derived statistic resolved.
    pub fn view(&self, actor: &Account, id: CharacterId) -> Result<SheetView> {
        let record = self.load_for(actor, id)?;
        Ok(SheetView::resolve(&record))
    }

    /// Summaries of the characters `actor` may see.
    ///
    /// Administrators see every character, with the owner's username filled
    /// in from `owner_name`. Players see only their own characters.
    pub fn list_characters(
        &self,
        actor: &Account,
        owner_name: impl Fn(AccountId) -> Option<String>,
    ) -> Result<Vec<CharacterSummary>> {
        let records = self.characters.list()?;

        let summaries = if actor.is_admin() {
            records
                .iter()
                .map(|record| {
                    let summary = record.summary();
                    match owner_name(record.owner) {
                        Some(username) => summary.with_owner(username),
                        None => summary,
                    }
                })
                .collect()
        } else {
            records
                .iter()
                .filter(|record| record.owner == actor.id)
                .map(CharacterRecord::summary)
                .collect()
        };

        Ok(summaries)
    }

    /// Applies a partial update. Owner or administrator.
    pub fn update_character(
        &self,
        actor: &Account,
        id: CharacterId,
        patch: &CharacterPatch,
    ) -> Result<CharacterRecord> {
        self.modify_record(actor, id, |record| *record = patch.apply(record))
    }

    /// Deletes a character. Administrators only.
    pub fn delete_character(&self, actor: &Account, id: CharacterId) -> Result<()> {
        self.require_admin(actor)?;
        if !self.characters.delete(id)? {
            return Err(StoreError::NotFound { id });
        }
        info!(character = %id, "deleted character");
        Ok(())
    }

    // ===== catalog assignment (administrators) =====

    /// Assigns each listed item once, in order. Unknown ids fail the whole
    /// call before anything is written.
    pub fn assign_items(
        &self,
        actor: &Account,
        id: CharacterId,
        item_ids: &[CatalogId],
    ) -> Result<(CharacterRecord, Vec<AssignOutcome>)> {
        self.require_admin(actor)?;

        let items = item_ids
            .iter()
            .map(|&item_id| -> Result<(ItemDefinition, Vec<ItemPropertyDefinition>)> {
                let def = self.item_definition(item_id)?;
                let properties = self.property_definitions(&def)?;
                Ok((def, properties))
            })
            .collect::<Result<Vec<_>>>()?;

        let (record, outcomes) = self.modify(actor, id, |record| {
            Ok(items
                .iter()
                .map(|(def, properties)| record.assign_item(def, properties))
                .collect::<Vec<_>>())
        })?;

        info!(character = %id, count = outcomes.len(), "assigned items");
        Ok((record, outcomes))
    }

    /// Assigns skills granted by `source`. Skills already held are skipped.
    pub fn assign_skills(
        &self,
        actor: &Account,
        id: CharacterId,
        skill_ids: &[CatalogId],
        source: Source,
    ) -> Result<(CharacterRecord, Vec<AssignOutcome>)> {
        self.require_admin(actor)?;

        let skills = skill_ids
            .iter()
            .map(|&skill_id| self.skill_definition(skill_id))
            .collect::<Result<Vec<_>>>()?;

        let (record, outcomes) = self.modify(actor, id, |record| {
            Ok(skills
                .iter()
                .map(|def| record.assign_skill(def, source))
                .collect::<Vec<_>>())
        })?;

        info!(character = %id, %source, count = outcomes.len(), "assigned skills");
        Ok((record, outcomes))
    }

    /// Assigns spells granted by `source`. Spells already known are skipped.
    pub fn assign_spells(
        &self,
        actor: &Account,
        id: CharacterId,
        spell_ids: &[CatalogId],
        source: Source,
    ) -> Result<(CharacterRecord, Vec<AssignOutcome>)> {
        self.require_admin(actor)?;

        let spells = spell_ids
            .iter()
            .map(|&spell_id| self.spell_definition(spell_id))
            .collect::<Result<Vec<_>>>()?;

        let (record, outcomes) = self.modify(actor, id, |record| {
            Ok(spells
                .iter()
                .map(|def| record.assign_spell(def, source))
                .collect::<Vec<_>>())
        })?;

        info!(character = %id, %source, count = outcomes.len(), "assigned spells");
        Ok((record, outcomes))
    }

    /// Removes every instance of each listed item. Fails with
    /// [`StoreError::NotAssociated`] if one of them is not held.
    pub fn remove_items(
        &self,
        actor: &Account,
        id: CharacterId,
        item_ids: &[CatalogId],
    ) -> Result<CharacterRecord> {
        self.require_admin(actor)?;
        let (record, ()) = self.modify(actor, id, |record| {
            for &item_id in item_ids {
                if record.remove_item(item_id) == 0 {
                    return Err(not_associated(id, CatalogKind::Item, item_id));
                }
            }
            Ok(())
        })?;
        info!(character = %id, count = item_ids.len(), "removed items");
        Ok(record)
    }

    /// Removes one held instance of an item. Administrators only.
    pub fn remove_item_instance(
        &self,
        actor: &Account,
        id: CharacterId,
        instance: InstanceId,
    ) -> Result<CharacterRecord> {
        self.require_admin(actor)?;
        let (record, ()) = self.modify(actor, id, |record| {
            if record.remove_item_instance(instance) {
                Ok(())
            } else {
                Err(unknown_instance(id, CatalogKind::Item, instance))
            }
        })?;
        info!(character = %id, %instance, "removed item instance");
        Ok(record)
    }

    pub fn remove_skills(
        &self,
        actor: &Account,
        id: CharacterId,
        skill_ids: &[CatalogId],
    ) -> Result<CharacterRecord> {
        self.require_admin(actor)?;
        let (record, ()) = self.modify(actor, id, |record| {
            for &skill_id in skill_ids {
                if !record.remove_skill(skill_id) {
                    return Err(not_associated(id, CatalogKind::Skill, skill_id));
                }
            }
            Ok(())
        })?;
        info!(character = %id, count = skill_ids.len(), "removed skills");
        Ok(record)
    }

    pub fn remove_spells(
        &self,
        actor: &Account,
        id: CharacterId,
        spell_ids: &[CatalogId],
    ) -> Result<CharacterRecord> {
        self.require_admin(actor)?;
        let (record, ()) = self.modify(actor, id, |record| {
            for &spell_id in spell_ids {
                if !record.remove_spell(spell_id) {
                    return Err(not_associated(id, CatalogKind::Spell, spell_id));
                }
            }
            Ok(())
        })?;
        info!(character = %id, count = spell_ids.len(), "removed spells");
        Ok(record)
    }

    // ===== held items, skills and spells (owner or administrator) =====

    pub fn update_item(
        &self,
        actor: &Account,
        id: CharacterId,
        instance: InstanceId,
        update: &ItemInstanceUpdate,
    ) -> Result<CharacterRecord> {
        self.edit_item(actor, id, instance, |item| {
            update.apply(item);
            Ok(())
        })
    }

    /// `uses += delta` on one held item instance, clamped to its pool.
    /// Instances without a uses counter report [`StoreError::NoUsesCounter`].
    pub fn adjust_item_uses(
        &self,
        actor: &Account,
        id: CharacterId,
        instance: InstanceId,
        delta: i32,
    ) -> Result<CharacterRecord> {
        self.edit_item(actor, id, instance, |item| {
            if item.adjust_uses(delta) {
                Ok(())
            } else {
                Err(StoreError::NoUsesCounter {
                    character: id,
                    instance,
                })
            }
        })
    }

    pub fn set_property_uses(
        &self,
        actor: &Account,
        id: CharacterId,
        instance: InstanceId,
        property: InstanceId,
        value: i32,
    ) -> Result<CharacterRecord> {
        self.edit_item(actor, id, instance, |item| {
            if item.set_property_uses(property, value) {
                Ok(())
            } else {
                Err(unknown_instance(id, CatalogKind::ItemProperty, property))
            }
        })
    }

    pub fn adjust_property_uses(
        &self,
        actor: &Account,
        id: CharacterId,
        instance: InstanceId,
        property: InstanceId,
        delta: i32,
    ) -> Result<CharacterRecord> {
        self.edit_item(actor, id, instance, |item| {
            if item.adjust_property_uses(property, delta) {
                Ok(())
            } else {
                Err(unknown_instance(id, CatalogKind::ItemProperty, property))
            }
        })
    }

    pub fn set_skill_uses(
        &self,
        actor: &Account,
        id: CharacterId,
        skill_id: CatalogId,
        value: i32,
    ) -> Result<CharacterRecord> {
        self.edit_association(actor, id, CatalogKind::Skill, skill_id, |record| {
            record.set_skill_uses(skill_id, value)
        })
    }

    pub fn adjust_skill_uses(
        &self,
        actor: &Account,
        id: CharacterId,
        skill_id: CatalogId,
        delta: i32,
    ) -> Result<CharacterRecord> {
        self.edit_association(actor, id, CatalogKind::Skill, skill_id, |record| {
            record.adjust_skill_uses(skill_id, delta)
        })
    }

    pub fn toggle_skill_favourite(
        &self,
        actor: &Account,
        id: CharacterId,
        skill_id: CatalogId,
    ) -> Result<CharacterRecord> {
        self.edit_association(actor, id, CatalogKind::Skill, skill_id, |record| {
            record.toggle_skill_favourite(skill_id)
        })
    }

    pub fn toggle_spell_prepared(
        &self,
        actor: &Account,
        id: CharacterId,
        spell_id: CatalogId,
    ) -> Result<CharacterRecord> {
        self.edit_association(actor, id, CatalogKind::Spell, spell_id, |record| {
            record.toggle_spell_prepared(spell_id)
        })
    }

    pub fn toggle_spell_favourite(
        &self,
        actor: &Account,
        id: CharacterId,
        spell_id: CatalogId,
    ) -> Result<CharacterRecord> {
        self.edit_association(actor, id, CatalogKind::Spell, spell_id, |record| {
            record.toggle_spell_favourite(spell_id)
        })
    }

    // ===== spell slots and known spells =====
    //
    // Levels outside 0..=9 are ignored, as the tracker operations are total.

    pub fn adjust_spell_slots(
        &self,
        actor: &Account,
        id: CharacterId,
        level: u8,
        delta: i32,
    ) -> Result<CharacterRecord> {
        self.modify_record(actor, id, |record| record.spell_slots.adjust(level, delta))
    }

    /// Clicks the slot dot at `index`; see [`sheet_core::SpellSlotTrack::toggle`].
    pub fn toggle_spell_slot(
        &self,
        actor: &Account,
        id: CharacterId,
        level: u8,
        index: u32,
    ) -> Result<CharacterRecord> {
        self.modify_record(actor, id, |record| record.spell_slots.toggle(level, index))
    }

    pub fn set_spell_slot_max(
        &self,
        actor: &Account,
        id: CharacterId,
        level: u8,
        max: u32,
    ) -> Result<CharacterRecord> {
        self.modify_record(actor, id, |record| record.spell_slots.set_max(level, max))
    }

    pub fn set_known_spells(
        &self,
        actor: &Account,
        id: CharacterId,
        level: u8,
        value: i32,
    ) -> Result<CharacterRecord> {
        self.modify_record(actor, id, |record| record.known_spells.set(level, value))
    }

    // ===== rests =====

    /// Refills every pool restored by `rest`. Owner or administrator.
    pub fn rest(
        &self,
        actor: &Account,
        id: CharacterId,
        rest: RestKind,
    ) -> Result<(CharacterRecord, RestSummary)> {
        let (record, summary) = self.modify(actor, id, |record| {
            let (rested, summary) = apply_rest(std::mem::take(record), rest);
            *record = rested;
            Ok(summary)
        })?;
        info!(character = %id, %rest, ?summary, "applied rest");
        Ok((record, summary))
    }

    // ===== helpers =====

    fn require_admin(&self, actor: &Account) -> Result<()> {
        actor.require_admin().map_err(|err| {
            warn!(account = %actor.id, "{}", err);
            StoreError::from(err)
        })
    }

    fn load_for(&self, actor: &Account, id: CharacterId) -> Result<CharacterRecord> {
        let record = self
            .characters
            .load(id)?
            .ok_or(StoreError::NotFound { id })?;
        check_access(actor, &record)?;
        Ok(record)
    }

    // Access is checked against the record the store is about to change.
    fn modify<T>(
        &self,
        actor: &Account,
        id: CharacterId,
        f: impl FnOnce(&mut CharacterRecord) -> Result<T>,
    ) -> Result<(CharacterRecord, T)> {
        self.characters.update(id, |record| {
            check_access(actor, record)?;
            f(record)
        })
    }

    fn modify_record(
        &self,
        actor: &Account,
        id: CharacterId,
        f: impl FnOnce(&mut CharacterRecord),
    ) -> Result<CharacterRecord> {
        self.modify(actor, id, |record| {
            f(record);
            Ok(())
        })
        .map(|(record, ())| record)
    }

    fn edit_association(
        &self,
        actor: &Account,
        id: CharacterId,
        kind: CatalogKind,
        target: CatalogId,
        f: impl FnOnce(&mut CharacterRecord) -> bool,
    ) -> Result<CharacterRecord> {
        self.modify(actor, id, |record| {
            if f(record) {
                Ok(())
            } else {
                Err(not_associated(id, kind, target))
            }
        })
        .map(|(record, ())| record)
    }

    fn edit_item(
        &self,
        actor: &Account,
        id: CharacterId,
        instance: InstanceId,
        f: impl FnOnce(&mut ItemInstance) -> Result<()>,
    ) -> Result<CharacterRecord> {
        self.modify(actor, id, |record| match record.item_mut(instance) {
            Some(item) => f(item),
            None => Err(unknown_instance(id, CatalogKind::Item, instance)),
        })
        .map(|(record, ())| record)
    }

    fn item_definition(&self, id: CatalogId) -> Result<ItemDefinition> {
        self.catalog.item(id)?.ok_or(StoreError::UnknownCatalogEntry {
            kind: CatalogKind::Item,
            id,
        })
    }

    fn property_definitions(&self, item: &ItemDefinition) -> Result<Vec<ItemPropertyDefinition>> {
        item.properties
            .iter()
            .map(|&id| {
                self.catalog
                    .property(id)?
                    .ok_or(StoreError::UnknownCatalogEntry {
                        kind: CatalogKind::ItemProperty,
                        id,
                    })
            })
            .collect()
    }

    fn skill_definition(&self, id: CatalogId) -> Result<SkillDefinition> {
        self.catalog.skill(id)?.ok_or(StoreError::UnknownCatalogEntry {
            kind: CatalogKind::Skill,
            id,
        })
    }

    fn spell_definition(&self, id: CatalogId) -> Result<SpellDefinition> {
        self.catalog.spell(id)?.ok_or(StoreError::UnknownCatalogEntry {
            kind: CatalogKind::Spell,
            id,
        })
    }
}

fn not_associated(character: CharacterId, kind: CatalogKind, id: CatalogId) -> StoreError {
    StoreError::NotAssociated {
        character,
        kind,
        id,
    }
}

fn unknown_instance(character: CharacterId, kind: CatalogKind, instance: InstanceId) -> StoreError {
    StoreError::UnknownInstance {
        character,
        kind,
        instance,
    }
}

fn check_access(actor: &Account, record: &CharacterRecord) -> Result<()> {
    match actor.check_access(record) {
        Ok(_grant) => Ok(()),
        Err(err) => {
            warn!(account = %actor.id, character = %record.id, "{}", err);
            Err(err.into())
        }
    }
}
