//! SheetView - every displayed value of a character, computed from one record.
//!
//! A view is a plain value computed in a single pass. It holds no cache and is
//! never persisted: after an edit, resolve a fresh view from the stored record.

use super::abilities::Ability;
use super::proficiency::{SKILL_GROUPS, SkillKey};
use super::resolver::{
    resolve_carry_capacity, resolve_initiative, resolve_proficiency_bonus, resolve_skill_value,
    resolve_spell_save_dc, resolve_spellcasting_modifier,
};
use crate::character::CharacterRecord;
use crate::resources::ResourcePool;

/// A resolved skill, saving throw or passive score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillValue {
    pub key: SkillKey,
    pub value: i32,
    pub proficient: bool,
    pub manual: bool,
}

/// One ability block on the sheet: score, modifier, saving throw and skills.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupView {
    pub ability: Ability,
    pub score: i32,
    pub modifier: i32,
    pub saving_throw: SkillValue,
    pub skills: Vec<SkillValue>,
}

/// Fully resolved sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetView {
    /// Ability blocks in [`Ability::ALL`] order.
    pub groups: Vec<GroupView>,
    pub proficiency_bonus: i32,
    pub initiative: i32,
    pub spellcasting_ability: Option<Ability>,
    pub spellcasting_modifier: i32,
    pub spell_save_dc: i32,
    pub carry_capacity: i32,
    pub actual_weight: i32,
    pub hit_points: ResourcePool,
    pub temp_hp: u32,
    pub hit_dice: ResourcePool,
    pub hit_die: String,
}

impl SheetView {
    /// Resolves every displayed value from `record`.
    pub fn resolve(record: &CharacterRecord) -> Self {
        let proficiency_bonus = resolve_proficiency_bonus(record);

        let value_of = |key: SkillKey, modifier: i32| {
            let entry = record.skills.entry(key);
            SkillValue {
                key,
                value: resolve_skill_value(&entry, modifier, proficiency_bonus),
                proficient: entry.proficient,
                manual: entry.manual,
            }
        };

        let groups = SKILL_GROUPS
            .iter()
            .map(|group| {
                let score = record.abilities.get(group.ability);
                let modifier = record.abilities.modifier(group.ability);
                GroupView {
                    ability: group.ability,
                    score,
                    modifier,
                    saving_throw: value_of(group.saving_throw, modifier),
                    skills: group
                        .skills
                        .iter()
                        .map(|&key| value_of(key, modifier))
                        .collect(),
                }
            })
            .collect();

        Self {
            groups,
            proficiency_bonus,
            initiative: resolve_initiative(record),
            spellcasting_ability: record.spellcasting_ability,
            spellcasting_modifier: resolve_spellcasting_modifier(record),
            spell_save_dc: resolve_spell_save_dc(record),
            carry_capacity: resolve_carry_capacity(record),
            actual_weight: record.actual_weight,
            hit_points: record.hit_points.pool,
            temp_hp: record.hit_points.temp,
            hit_dice: record.hit_dice.pool,
            hit_die: record.hit_dice.die.clone(),
        }
    }

    pub fn group(&self, ability: Ability) -> Option<&GroupView> {
        self.groups.iter().find(|group| group.ability == ability)
    }

    /// Resolved value of any skill key.
    pub fn skill(&self, key: SkillKey) -> Option<i32> {
        self.groups.iter().find_map(|group| {
            if group.saving_throw.key == key {
                return Some(group.saving_throw.value);
            }
            group
                .skills
                .iter()
                .find(|skill| skill.key == key)
                .map(|skill| skill.value)
        })
    }

    /// True when the carried weight is above capacity.
    pub fn is_encumbered(&self) -> bool {
        self.actual_weight > self.carry_capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{AccountId, CharacterId};
    use crate::stats::{Overridable, SkillEntry, resolve_skill};

    #[test]
    fn view_matches_individual_resolvers() {
        let mut record = CharacterRecord::new(CharacterId(3), AccountId(1), "Vey");
        record.abilities.intelligence = 17;
        record.abilities.dexterity = 8;
        record.level = 9;
        record.skills.set(SkillKey::Arcana, SkillEntry::proficient());
        record.skills.set(SkillKey::Nature, SkillEntry::manual(-4));
        record.spellcasting_ability = Some(Ability::Intelligence);

        let view = SheetView::resolve(&record);

        assert_eq!(view.groups.len(), Ability::COUNT);
        for key in SkillKey::ALL {
            assert_eq!(view.skill(key), Some(resolve_skill(&record, key)), "{key}");
        }
        assert_eq!(view.skill(SkillKey::Arcana), Some(3 + 4));
        assert_eq!(view.skill(SkillKey::Nature), Some(-4));
        assert_eq!(view.initiative, -1);
        assert_eq!(view.spellcasting_modifier, 7);
        assert_eq!(view.spell_save_dc, 15);
    }

    #[test]
    fn group_lookup_and_encumbrance() {
        let mut record = CharacterRecord::new(CharacterId(4), AccountId(1), "Ona");
        record.abilities.strength = 8;
        record.actual_weight = 41;
        record.proficiency_bonus = Overridable::manual(2);

        let view = SheetView::resolve(&record);
        let strength = view.group(Ability::Strength).map(|g| g.modifier);
        assert_eq!(strength, Some(-1));
        assert_eq!(view.carry_capacity, 40);
        assert!(view.is_encumbered());
    }
}
