//! Derived Statistic Resolver.
//!
//! Pure functions over a record snapshot. Every function here is total and
//! idempotent: the same record always yields the same value, and nothing is
//! written back. Arithmetic saturates so manual values at the `i32` extremes
//! cannot overflow.

use super::abilities::Ability;
use super::proficiency::{SkillEntry, SkillKey, proficiency_for_level};
use crate::character::CharacterRecord;
use crate::config::SheetConfig;

/// Displayed value of one skill entry.
///
/// A manual entry with a stored value returns that value. Otherwise the value
/// is the ability modifier, plus the proficiency bonus when proficient.
#[inline]
pub fn resolve_skill_value(
    entry: &SkillEntry,
    ability_modifier: i32,
    proficiency_bonus: i32,
) -> i32 {
    if let Some(value) = entry.override_value() {
        return value;
    }
    if entry.proficient {
        ability_modifier.saturating_add(proficiency_bonus)
    } else {
        ability_modifier
    }
}

/// Displayed value of `key` on `record`, using the owning ability from the
/// proficiency table and the resolved proficiency bonus.
pub fn resolve_skill(record: &CharacterRecord, key: SkillKey) -> i32 {
    resolve_skill_value(
        &record.skills.entry(key),
        record.abilities.modifier(key.ability()),
        resolve_proficiency_bonus(record),
    )
}

/// Manual value, or the level-table bonus.
pub fn resolve_proficiency_bonus(record: &CharacterRecord) -> i32 {
    record
        .proficiency_bonus
        .resolve(|| proficiency_for_level(record.level))
}

/// Manual value, or the dexterity modifier.
pub fn resolve_initiative(record: &CharacterRecord) -> i32 {
    record
        .initiative
        .resolve(|| record.abilities.modifier(Ability::Dexterity))
}

/// Manual value, or spellcasting ability modifier plus proficiency bonus.
///
/// With no spellcasting ability the ability term is 0.
pub fn resolve_spellcasting_modifier(record: &CharacterRecord) -> i32 {
    record
        .spellcasting_modifier
        .resolve(|| auto_spellcasting_modifier(record))
}

/// Manual value, or `8 +` the automatic spellcasting modifier.
///
/// The automatic DC ignores a manual spellcasting modifier.
pub fn resolve_spell_save_dc(record: &CharacterRecord) -> i32 {
    record.spell_save_dc.resolve(|| {
        SheetConfig::SPELL_DC_BASE.saturating_add(auto_spellcasting_modifier(record))
    })
}

/// Manual value, or strength score × 5.
pub fn resolve_carry_capacity(record: &CharacterRecord) -> i32 {
    record.carry_capacity.resolve(|| {
        record
            .abilities
            .strength
            .saturating_mul(SheetConfig::CARRY_MULTIPLIER)
    })
}

fn auto_spellcasting_modifier(record: &CharacterRecord) -> i32 {
    let ability_term = record
        .spellcasting_ability
        .map_or(0, |ability| record.abilities.modifier(ability));
    ability_term.saturating_add(resolve_proficiency_bonus(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{AccountId, CharacterId};
    use crate::stats::{AbilityScores, Overridable};

    fn record() -> CharacterRecord {
        CharacterRecord::new(CharacterId(1), AccountId(1), "Ilse")
    }

    #[test]
    fn skill_value_modes() {
        let plain = SkillEntry::default();
        assert_eq!(resolve_skill_value(&plain, 3, 2), 3);

        let proficient = SkillEntry::proficient();
        assert_eq!(resolve_skill_value(&proficient, 3, 2), 5);

        let manual = SkillEntry {
            value: Some(9),
            manual: true,
            proficient: true,
        };
        assert_eq!(resolve_skill_value(&manual, 3, 2), 9);
    }

    #[test]
    fn manual_without_value_falls_back_to_computed() {
        let entry = SkillEntry {
            value: None,
            manual: true,
            proficient: true,
        };
        assert_eq!(resolve_skill_value(&entry, -1, 2), 1);
    }

    #[test]
    fn non_manual_ignores_stored_value() {
        let entry = SkillEntry {
            value: Some(42),
            manual: false,
            proficient: false,
        };
        assert_eq!(resolve_skill_value(&entry, 2, 3), 2);
    }

    #[test]
    fn skill_uses_owning_ability() {
        let mut record = record();
        record.abilities = AbilityScores::default().with(Ability::Dexterity, 16);
        record.proficiency_bonus = Overridable::manual(2);
        record.skills.set(SkillKey::Stealth, SkillEntry::proficient());

        assert_eq!(resolve_skill(&record, SkillKey::Stealth), 5);
        assert_eq!(resolve_skill(&record, SkillKey::Acrobatics), 3);
        assert_eq!(resolve_skill(&record, SkillKey::Athletics), 0);
    }

    #[test]
    fn passive_perception_is_wisdom_based() {
        let mut record = record();
        record.abilities = AbilityScores::default().with(Ability::Wisdom, 14);
        record.level = 5;
        record
            .skills
            .set(SkillKey::PassivePerception, SkillEntry::proficient());
        assert_eq!(resolve_skill(&record, SkillKey::PassivePerception), 2 + 3);
    }

    #[test]
    fn proficiency_follows_level_unless_manual() {
        let mut record = record();
        record.level = 5;
        assert_eq!(resolve_proficiency_bonus(&record), 3);
        record.proficiency_bonus = Overridable::manual(7);
        assert_eq!(resolve_proficiency_bonus(&record), 7);
    }

    #[test]
    fn initiative_is_dex_modifier() {
        let mut record = record();
        record.abilities.dexterity = 14;
        assert_eq!(resolve_initiative(&record), 2);
        record.initiative = Overridable::manual(5);
        assert_eq!(resolve_initiative(&record), 5);
    }

    #[test]
    fn spellcasting_modifier_and_dc() {
        let mut record = record();
        record.abilities.charisma = 18;
        record.spellcasting_ability = Some(Ability::Charisma);
        record.proficiency_bonus = Overridable::manual(3);

        assert_eq!(resolve_spellcasting_modifier(&record), 7);
        assert_eq!(resolve_spell_save_dc(&record), 15);
    }

    #[test]
    fn dc_auto_ignores_manual_spellcasting_modifier() {
        let mut record = record();
        record.abilities.charisma = 18;
        record.spellcasting_ability = Some(Ability::Charisma);
        record.proficiency_bonus = Overridable::manual(3);
        record.spellcasting_modifier = Overridable::manual(10);

        assert_eq!(resolve_spellcasting_modifier(&record), 10);
        assert_eq!(resolve_spell_save_dc(&record), 15);

        record.spell_save_dc = Overridable::manual(20);
        assert_eq!(resolve_spell_save_dc(&record), 20);
    }

    #[test]
    fn no_spellcasting_ability_uses_proficiency_only() {
        let mut record = record();
        record.proficiency_bonus = Overridable::manual(2);
        assert_eq!(record.spellcasting_ability, None);
        assert_eq!(resolve_spellcasting_modifier(&record), 2);
        assert_eq!(resolve_spell_save_dc(&record), 10);
    }

    #[test]
    fn carry_capacity_is_strength_times_five() {
        let mut record = record();
        record.abilities.strength = 15;
        assert_eq!(resolve_carry_capacity(&record), 75);
        record.carry_capacity = Overridable::manual(200);
        assert_eq!(resolve_carry_capacity(&record), 200);
    }

    #[test]
    fn carry_capacity_saturates() {
        let mut record = record();
        record.abilities.strength = i32::MAX;
        assert_eq!(resolve_carry_capacity(&record), i32::MAX);
    }

    #[test]
    fn resolvers_are_idempotent() {
        let mut record = record();
        record.abilities.wisdom = 13;
        let first = resolve_skill(&record, SkillKey::Insight);
        let second = resolve_skill(&record, SkillKey::Insight);
        assert_eq!(first, second);
        assert_eq!(resolve_initiative(&record), resolve_initiative(&record));
    }
}
