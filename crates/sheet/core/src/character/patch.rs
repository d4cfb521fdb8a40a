use std::collections::BTreeMap;

use super::record::{CharacterRecord, Coins, HitDice, HitPoints};
use crate::resources::{KnownSpells, SpellSlotTrack};
use crate::stats::{Ability, Overridable, SkillEntry, SkillKey};

/// Partial update of a character. Only present fields are written.
///
/// Computed values are never part of a patch; overridable statistics carry
/// their manual flag and stored value together. Applying a patch always
/// yields a normalized record, so pool values sent with `current > max` are
/// clamped on the way in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct CharacterPatch {
    pub name: Option<String>,
    pub race: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "characterClass"))]
    pub class_name: Option<String>,
    pub background: Option<String>,
    pub alignment: Option<String>,
    pub size: Option<String>,
    pub icon_url: Option<String>,
    pub languages: Option<String>,
    pub other_proficiencies: Option<String>,

    pub level: Option<i32>,
    pub experience: Option<i32>,
    pub experience_to_next_level: Option<i32>,
    pub armor_class: Option<i32>,
    pub speed: Option<i32>,
    pub inspiration: Option<i32>,
    pub coins: Option<Coins>,

    pub strength: Option<i32>,
    pub dexterity: Option<i32>,
    pub constitution: Option<i32>,
    pub intelligence: Option<i32>,
    pub wisdom: Option<i32>,
    pub charisma: Option<i32>,

    pub proficiency_bonus: Option<Overridable<i32>>,
    /// Per-key replacement; keys not listed keep their entry.
    pub skills: BTreeMap<SkillKey, SkillEntry>,

    pub hit_points: Option<HitPoints>,
    pub hit_dice: Option<HitDice>,
    pub initiative: Option<Overridable<i32>>,
    pub actual_weight: Option<i32>,
    pub carry_capacity: Option<Overridable<i32>>,

    pub spellcasting_ability: Option<Ability>,
    pub spellcasting_modifier: Option<Overridable<i32>>,
    pub spell_save_dc: Option<Overridable<i32>>,
    pub max_prepared_spells: Option<i32>,
    pub spell_slots: Option<SpellSlotTrack>,
    pub known_spells: Option<KnownSpells>,
}

fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

impl CharacterPatch {
    /// Copy of `record` with every present field replaced, then normalized.
    pub fn apply(&self, record: &CharacterRecord) -> CharacterRecord {
        let mut next = record.clone();

        set(&mut next.name, &self.name);
        set(&mut next.race, &self.race);
        set(&mut next.class_name, &self.class_name);
        set(&mut next.background, &self.background);
        set(&mut next.alignment, &self.alignment);
        set(&mut next.size, &self.size);
        if let Some(url) = &self.icon_url {
            next.icon_url = Some(url.clone());
        }
        set(&mut next.languages, &self.languages);
        set(&mut next.other_proficiencies, &self.other_proficiencies);

        set(&mut next.level, &self.level);
        set(&mut next.experience, &self.experience);
        set(&mut next.experience_to_next_level, &self.experience_to_next_level);
        set(&mut next.armor_class, &self.armor_class);
        set(&mut next.speed, &self.speed);
        set(&mut next.inspiration, &self.inspiration);
        set(&mut next.coins, &self.coins);

        let scores = [
            (Ability::Strength, self.strength),
            (Ability::Dexterity, self.dexterity),
            (Ability::Constitution, self.constitution),
            (Ability::Intelligence, self.intelligence),
            (Ability::Wisdom, self.wisdom),
            (Ability::Charisma, self.charisma),
        ];
        for (ability, score) in scores {
            if let Some(score) = score {
                next.abilities.set(ability, score);
            }
        }

        set(&mut next.proficiency_bonus, &self.proficiency_bonus);
        for (&key, &entry) in &self.skills {
            next.skills.set(key, entry);
        }

        set(&mut next.hit_points, &self.hit_points);
        set(&mut next.hit_dice, &self.hit_dice);
        set(&mut next.initiative, &self.initiative);
        set(&mut next.actual_weight, &self.actual_weight);
        set(&mut next.carry_capacity, &self.carry_capacity);

        if let Some(ability) = self.spellcasting_ability {
            next.spellcasting_ability = Some(ability);
        }
        set(&mut next.spellcasting_modifier, &self.spellcasting_modifier);
        set(&mut next.spell_save_dc, &self.spell_save_dc);
        set(&mut next.max_prepared_spells, &self.max_prepared_spells);
        set(&mut next.spell_slots, &self.spell_slots);
        set(&mut next.known_spells, &self.known_spells);

        next.normalized()
    }

    /// True when applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_skill(mut self, key: SkillKey, entry: SkillEntry) -> Self {
        self.skills.insert(key, entry);
        self
    }

    pub fn with_score(mut self, ability: Ability, score: i32) -> Self {
        let slot = match ability {
            Ability::Strength => &mut self.strength,
            Ability::Dexterity => &mut self.dexterity,
            Ability::Constitution => &mut self.constitution,
            Ability::Intelligence => &mut self.intelligence,
            Ability::Wisdom => &mut self.wisdom,
            Ability::Charisma => &mut self.charisma,
        };
        *slot = Some(score);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{AccountId, CharacterId};
    use crate::resources::{ResetPolicy, ResourcePool};
    use crate::stats::{SheetView, resolve_initiative};

    fn record() -> CharacterRecord {
        let mut record = CharacterRecord::new(CharacterId(1), AccountId(1), "Gus");
        record.race = "Dwarf".into();
        record.abilities.dexterity = 12;
        record
    }

    #[test]
    fn absent_fields_are_untouched() {
        let before = record();
        let patch = CharacterPatch {
            name: Some("Gustav".into()),
            ..CharacterPatch::default()
        };
        let after = patch.apply(&before);
        assert_eq!(after.name, "Gustav");
        assert_eq!(after.race, "Dwarf");
        assert_eq!(after.abilities, before.abilities);
        assert_eq!(after.skills, before.skills);
    }

    #[test]
    fn empty_patch_is_identity() {
        let before = record();
        let patch = CharacterPatch::default();
        assert!(patch.is_empty());
        assert_eq!(patch.apply(&before), before);
    }

    #[test]
    fn pool_fields_replace_the_whole_pool() {
        let patch = CharacterPatch {
            hit_points: Some(HitPoints {
                pool: ResourcePool::new(6, 10, ResetPolicy::LongRest),
                temp: 4,
            }),
            ..CharacterPatch::default()
        };
        let after = patch.apply(&record());
        assert_eq!(after.hit_points.pool.current(), 6);
        assert_eq!(after.hit_points.pool.max(), 10);
        assert_eq!(after.hit_points.temp, 4);
    }

    #[test]
    fn skill_entries_patch_per_key() {
        let mut before = record();
        before
            .skills
            .set(SkillKey::Arcana, SkillEntry::proficient());
        let patch = CharacterPatch::default().with_skill(SkillKey::History, SkillEntry::manual(6));
        let after = patch.apply(&before);
        assert!(after.skills.entry(SkillKey::Arcana).proficient);
        assert_eq!(after.skills.entry(SkillKey::History), SkillEntry::manual(6));
    }

    #[test]
    fn edits_are_visible_to_the_next_resolve() {
        let before = record();
        assert_eq!(resolve_initiative(&before), 1);

        let patch = CharacterPatch::default().with_score(Ability::Dexterity, 18);
        let after = patch.apply(&before);
        assert_eq!(resolve_initiative(&after), 4);
        assert_eq!(SheetView::resolve(&after).initiative, 4);
    }

    #[test]
    fn manual_flag_travels_with_value() {
        let patch = CharacterPatch {
            initiative: Some(Overridable::manual(-3)),
            ..CharacterPatch::default()
        };
        let after = patch.apply(&record());
        assert_eq!(resolve_initiative(&after), -3);

        let patch = CharacterPatch {
            initiative: Some(Overridable::auto(-3)),
            ..CharacterPatch::default()
        };
        assert_eq!(resolve_initiative(&patch.apply(&after)), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_patch_with_oversized_current_is_clamped() {
        let patch: CharacterPatch = serde_json::from_str(
            r#"{"hitPoints":{"pool":{"current":30,"max":12,"resetOn":"LONG_REST"},"temp":0}}"#,
        )
        .unwrap();
        let after = patch.apply(&record());
        assert_eq!(after.hit_points.pool.current(), 12);
        assert_eq!(after.hit_points.pool.max(), 12);
    }
}
