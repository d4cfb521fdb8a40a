//! Join records between a character and catalog definitions, and the rules
//! for seeding them when an administrator assigns catalog entries.

use super::record::{CharacterRecord, InstanceId};
use crate::catalog::{
    CatalogId, ItemDefinition, ItemPropertyDefinition, SkillDefinition, Source, SpellDefinition,
};
use crate::resources::ResourcePool;

/// Result of assigning one catalog entry to a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum AssignOutcome {
    /// A new association was created.
    Added,
    /// A stackable item already held gained one quantity.
    Stacked,
    /// Already associated; nothing changed.
    AlreadyPresent,
}

/// Uses counter of one property on a held item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ItemPropertyInstance {
    #[cfg_attr(feature = "serde", serde(default))]
    pub instance_id: InstanceId,
    pub property_id: CatalogId,
    pub uses: ResourcePool,
}

impl ItemPropertyInstance {
    /// Full pool of `base_max_uses` (absent = 0, a passive property). The
    /// instance id is assigned when the owning item is given to a character.
    pub fn from_definition(def: &ItemPropertyDefinition) -> Self {
        Self {
            instance_id: InstanceId::UNASSIGNED,
            property_id: def.id,
            uses: ResourcePool::full(def.base_max_uses.unwrap_or(0), def.reset_on),
        }
    }
}

/// An item held by a character.
///
/// Two copies of a non-stackable item are separate instances with their own
/// uses, so edits address an instance by `instance_id`, never by `item_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ItemInstance {
    #[cfg_attr(feature = "serde", serde(default))]
    pub instance_id: InstanceId,
    pub item_id: CatalogId,
    /// `None` for items without a uses counter.
    #[cfg_attr(feature = "serde", serde(default))]
    pub uses: Option<ResourcePool>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attuned: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipped: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub favourite: bool,
    pub quantity: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub properties: Vec<ItemPropertyInstance>,
}

impl ItemInstance {
    /// Quantity 1, full uses, one property instance per property definition.
    pub fn from_definition(def: &ItemDefinition, properties: &[ItemPropertyDefinition]) -> Self {
        Self {
            instance_id: InstanceId::UNASSIGNED,
            item_id: def.id,
            uses: def.max_uses.map(|max| ResourcePool::full(max, def.reset_on)),
            attuned: false,
            equipped: false,
            favourite: false,
            quantity: 1,
            properties: properties
                .iter()
                .map(ItemPropertyInstance::from_definition)
                .collect(),
        }
    }

    pub fn property_mut(&mut self, instance: InstanceId) -> Option<&mut ItemPropertyInstance> {
        self.properties
            .iter_mut()
            .find(|property| property.instance_id == instance)
    }

    /// `uses += delta`, clamped. False if the item has no uses counter.
    pub fn adjust_uses(&mut self, delta: i32) -> bool {
        match self.uses.as_mut() {
            Some(uses) => {
                *uses = uses.adjust(delta);
                true
            }
            None => false,
        }
    }

    /// Sets a property's uses to `value`, clamped to its pool.
    pub fn set_property_uses(&mut self, property: InstanceId, value: i32) -> bool {
        self.with_property(property, |uses| uses.set_current(value))
    }

    pub fn adjust_property_uses(&mut self, property: InstanceId, delta: i32) -> bool {
        self.with_property(property, |uses| uses.adjust(delta))
    }

    fn with_property(
        &mut self,
        property: InstanceId,
        f: impl FnOnce(ResourcePool) -> ResourcePool,
    ) -> bool {
        match self.property_mut(property) {
            Some(property) => {
                property.uses = f(property.uses);
                true
            }
            None => false,
        }
    }
}

/// Partial update of a held item. Absent fields are left untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ItemInstanceUpdate {
    /// Absolute uses, clamped to the item's pool.
    pub current_uses: Option<i32>,
    pub quantity: Option<u32>,
    pub equipped: Option<bool>,
    pub attuned: Option<bool>,
    pub favourite: Option<bool>,
}

impl ItemInstanceUpdate {
    pub fn apply(&self, item: &mut ItemInstance) {
        if let Some(value) = self.current_uses {
            item.uses = item.uses.map(|pool| pool.set_current(value));
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(equipped) = self.equipped {
            item.equipped = equipped;
        }
        if let Some(attuned) = self.attuned {
            item.attuned = attuned;
        }
        if let Some(favourite) = self.favourite {
            item.favourite = favourite;
        }
    }
}

/// A catalog skill (feat, class feature, racial trait) held by a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SkillInstance {
    pub skill_id: CatalogId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub source: Source,
    #[cfg_attr(feature = "serde", serde(default))]
    pub favourite: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub uses: ResourcePool,
}

impl SkillInstance {
    /// Full uses pool; a max of 0 marks a passive skill.
    pub fn from_definition(def: &SkillDefinition, source: Source) -> Self {
        Self {
            skill_id: def.id,
            source,
            favourite: false,
            uses: ResourcePool::full(def.max_uses.unwrap_or(0), def.reset_on),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SpellAssociation {
    pub spell_id: CatalogId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub source: Source,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prepared: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub favourite: bool,
}

impl SpellAssociation {
    /// New spells start unprepared.
    pub fn from_definition(def: &SpellDefinition, source: Source) -> Self {
        Self {
            spell_id: def.id,
            source,
            prepared: false,
            favourite: false,
        }
    }
}

impl CharacterRecord {
    // ===== items =====

    /// Gives the character one of `def`.
    ///
    /// A stackable item already held gains one quantity; a non-stackable one
    /// gets a fresh numbered instance with its own uses and a counter for
    /// each of `properties` (the definitions behind `def.properties`).
    pub fn assign_item(
        &mut self,
        def: &ItemDefinition,
        properties: &[ItemPropertyDefinition],
    ) -> AssignOutcome {
        if def.stackable {
            if let Some(held) = self.items.iter_mut().find(|item| item.item_id == def.id) {
                held.quantity = held.quantity.saturating_add(1);
                return AssignOutcome::Stacked;
            }
        }
        let mut item = ItemInstance::from_definition(def, properties);
        item.instance_id = self.allocate_instance_id();
        for property in &mut item.properties {
            property.instance_id = self.allocate_instance_id();
        }
        self.items.push(item);
        AssignOutcome::Added
    }

    /// Removes every instance of the item. Returns how many were removed.
    pub fn remove_item(&mut self, item_id: CatalogId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.item_id != item_id);
        before - self.items.len()
    }

    /// Removes one held instance, leaving other copies of the item alone.
    pub fn remove_item_instance(&mut self, instance: InstanceId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.instance_id != instance);
        before != self.items.len()
    }

    pub fn item(&self, instance: InstanceId) -> Option<&ItemInstance> {
        self.items.iter().find(|item| item.instance_id == instance)
    }

    pub fn item_mut(&mut self, instance: InstanceId) -> Option<&mut ItemInstance> {
        self.items.iter_mut().find(|item| item.instance_id == instance)
    }

    /// Applies `update` to one held instance. Returns false if the character
    /// holds no such instance.
    pub fn update_item(&mut self, instance: InstanceId, update: &ItemInstanceUpdate) -> bool {
        match self.item_mut(instance) {
            Some(item) => {
                update.apply(item);
                true
            }
            None => false,
        }
    }

    // ===== skills =====

    pub fn assign_skill(&mut self, def: &SkillDefinition, source: Source) -> AssignOutcome {
        if self.extra_skills.iter().any(|skill| skill.skill_id == def.id) {
            return AssignOutcome::AlreadyPresent;
        }
        self.extra_skills
            .push(SkillInstance::from_definition(def, source));
        AssignOutcome::Added
    }

    pub fn remove_skill(&mut self, skill_id: CatalogId) -> bool {
        let before = self.extra_skills.len();
        self.extra_skills.retain(|skill| skill.skill_id != skill_id);
        before != self.extra_skills.len()
    }

    /// Sets the skill's remaining uses, clamped to its pool.
    pub fn set_skill_uses(&mut self, skill_id: CatalogId, value: i32) -> bool {
        self.with_skill(skill_id, |skill| skill.uses = skill.uses.set_current(value))
    }

    pub fn adjust_skill_uses(&mut self, skill_id: CatalogId, delta: i32) -> bool {
        self.with_skill(skill_id, |skill| skill.uses = skill.uses.adjust(delta))
    }

    pub fn toggle_skill_favourite(&mut self, skill_id: CatalogId) -> bool {
        self.with_skill(skill_id, |skill| skill.favourite = !skill.favourite)
    }

    fn with_skill(&mut self, skill_id: CatalogId, f: impl FnOnce(&mut SkillInstance)) -> bool {
        match self
            .extra_skills
            .iter_mut()
            .find(|skill| skill.skill_id == skill_id)
        {
            Some(skill) => {
                f(skill);
                true
            }
            None => false,
        }
    }

    // ===== spells =====

    pub fn assign_spell(&mut self, def: &SpellDefinition, source: Source) -> AssignOutcome {
        if self.spells.iter().any(|spell| spell.spell_id == def.id) {
            return AssignOutcome::AlreadyPresent;
        }
        self.spells
            .push(SpellAssociation::from_definition(def, source));
        AssignOutcome::Added
    }

    pub fn remove_spell(&mut self, spell_id: CatalogId) -> bool {
        let before = self.spells.len();
        self.spells.retain(|spell| spell.spell_id != spell_id);
        before != self.spells.len()
    }

    pub fn toggle_spell_prepared(&mut self, spell_id: CatalogId) -> bool {
        self.with_spell(spell_id, |spell| spell.prepared = !spell.prepared)
    }

    pub fn toggle_spell_favourite(&mut self, spell_id: CatalogId) -> bool {
        self.with_spell(spell_id, |spell| spell.favourite = !spell.favourite)
    }

    pub fn prepared_spells(&self) -> usize {
        self.spells.iter().filter(|spell| spell.prepared).count()
    }

    fn with_spell(&mut self, spell_id: CatalogId, f: impl FnOnce(&mut SpellAssociation)) -> bool {
        match self.spells.iter_mut().find(|spell| spell.spell_id == spell_id) {
            Some(spell) => {
                f(spell);
                true
            }
            None => false,
        }
    }
}
