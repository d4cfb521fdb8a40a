//! Proficiency Model - the fixed ability → {saving throw, skills} table and
//! per-skill proficiency entries.

use std::collections::BTreeMap;

use super::abilities::Ability;
use crate::config::SheetConfig;

/// Every skill-like value on the sheet: 18 skills, 6 saving throws and
/// passive perception.
///
/// Stored keys are camelCase (`"sleightOfHand"`, `"savingThrowWisdom"`).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum SkillKey {
    Athletics,
    Acrobatics,
    SleightOfHand,
    Stealth,
    Arcana,
    History,
    Investigation,
    Nature,
    Religion,
    AnimalHandling,
    Insight,
    Medicine,
    Perception,
    Survival,
    Deception,
    Intimidation,
    Performance,
    Persuasion,
    SavingThrowStrength,
    SavingThrowDexterity,
    SavingThrowConstitution,
    SavingThrowIntelligence,
    SavingThrowWisdom,
    SavingThrowCharisma,
    PassivePerception,
}

impl SkillKey {
    pub const COUNT: usize = 25;

    pub const ALL: [SkillKey; Self::COUNT] = [
        SkillKey::Athletics,
        SkillKey::Acrobatics,
        SkillKey::SleightOfHand,
        SkillKey::Stealth,
        SkillKey::Arcana,
        SkillKey::History,
        SkillKey::Investigation,
        SkillKey::Nature,
        SkillKey::Religion,
        SkillKey::AnimalHandling,
        SkillKey::Insight,
        SkillKey::Medicine,
        SkillKey::Perception,
        SkillKey::Survival,
        SkillKey::Deception,
        SkillKey::Intimidation,
        SkillKey::Performance,
        SkillKey::Persuasion,
        SkillKey::SavingThrowStrength,
        SkillKey::SavingThrowDexterity,
        SkillKey::SavingThrowConstitution,
        SkillKey::SavingThrowIntelligence,
        SkillKey::SavingThrowWisdom,
        SkillKey::SavingThrowCharisma,
        SkillKey::PassivePerception,
    ];

    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }

    /// Ability whose modifier feeds this skill, looked up in [`SKILL_GROUPS`].
    #[inline]
    pub const fn ability(self) -> Ability {
        SKILL_ABILITY[self.as_index()]
    }

    pub const fn is_saving_throw(self) -> bool {
        matches!(
            self,
            SkillKey::SavingThrowStrength
                | SkillKey::SavingThrowDexterity
                | SkillKey::SavingThrowConstitution
                | SkillKey::SavingThrowIntelligence
                | SkillKey::SavingThrowWisdom
                | SkillKey::SavingThrowCharisma
        )
    }
}

/// One row of the proficiency table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillGroup {
    pub ability: Ability,
    pub saving_throw: SkillKey,
    pub skills: &'static [SkillKey],
}

impl SkillGroup {
    /// Saving throw first, then skills in table order.
    pub fn keys(&self) -> impl Iterator<Item = SkillKey> + '_ {
        std::iter::once(self.saving_throw).chain(self.skills.iter().copied())
    }
}

/// Fixed ability → {saving throw, skills} table, in [`Ability::ALL`] order.
pub const SKILL_GROUPS: [SkillGroup; Ability::COUNT] = [
    SkillGroup {
        ability: Ability::Strength,
        saving_throw: SkillKey::SavingThrowStrength,
        skills: &[SkillKey::Athletics],
    },
    SkillGroup {
        ability: Ability::Dexterity,
        saving_throw: SkillKey::SavingThrowDexterity,
        skills: &[
            SkillKey::Acrobatics,
            SkillKey::SleightOfHand,
            SkillKey::Stealth,
        ],
    },
    SkillGroup {
        ability: Ability::Constitution,
        saving_throw: SkillKey::SavingThrowConstitution,
        skills: &[],
    },
    SkillGroup {
        ability: Ability::Intelligence,
        saving_throw: SkillKey::SavingThrowIntelligence,
        skills: &[
            SkillKey::Arcana,
            SkillKey::History,
            SkillKey::Investigation,
            SkillKey::Nature,
            SkillKey::Religion,
        ],
    },
    SkillGroup {
        ability: Ability::Wisdom,
        saving_throw: SkillKey::SavingThrowWisdom,
        skills: &[
            SkillKey::AnimalHandling,
            SkillKey::Insight,
            SkillKey::Medicine,
            SkillKey::Perception,
            SkillKey::Survival,
            SkillKey::PassivePerception,
        ],
    },
    SkillGroup {
        ability: Ability::Charisma,
        saving_throw: SkillKey::SavingThrowCharisma,
        skills: &[
            SkillKey::Deception,
            SkillKey::Intimidation,
            SkillKey::Performance,
            SkillKey::Persuasion,
        ],
    },
];

/// Inverse of [`SKILL_GROUPS`], built at compile time.
const SKILL_ABILITY: [Ability; SkillKey::COUNT] = {
    let mut table = [Ability::Strength; SkillKey::COUNT];
    let mut g = 0;
    while g < SKILL_GROUPS.len() {
        let group = SKILL_GROUPS[g];
        table[group.saving_throw.as_index()] = group.ability;
        let mut s = 0;
        while s < group.skills.len() {
            table[group.skills[s].as_index()] = group.ability;
            s += 1;
        }
        g += 1;
    }
    table
};

/// Table row for one ability.
#[inline]
pub fn resolve_skill_group(ability: Ability) -> &'static SkillGroup {
    &SKILL_GROUPS[ability.as_index()]
}

/// Automatic proficiency bonus for a character level: +2 at level 1, +1 every
/// four levels after that. Levels below 1 are treated as 1.
pub const fn proficiency_for_level(level: i32) -> i32 {
    let level = if level < 1 { 1 } else { level };
    SheetConfig::BASE_PROFICIENCY + (level - 1) / SheetConfig::PROFICIENCY_STEP_LEVELS
}

/// Stored state of one skill, saving throw or passive score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillEntry {
    /// Manual value. Read only when `manual` is set and this is `Some`.
    pub value: Option<i32>,
    pub manual: bool,
    pub proficient: bool,
}

impl SkillEntry {
    pub const fn proficient() -> Self {
        Self {
            value: Some(0),
            manual: false,
            proficient: true,
        }
    }

    pub const fn manual(value: i32) -> Self {
        Self {
            value: Some(value),
            manual: true,
            proficient: false,
        }
    }

    /// The stored value, if it overrides the computed one.
    #[inline]
    pub const fn override_value(&self) -> Option<i32> {
        if self.manual { self.value } else { None }
    }
}

impl Default for SkillEntry {
    fn default() -> Self {
        Self {
            value: Some(0),
            manual: false,
            proficient: false,
        }
    }
}

/// Per-key skill entries. Missing keys read as [`SkillEntry::default`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillSheet(BTreeMap<SkillKey, SkillEntry>);

impl SkillSheet {
    /// Sheet with no stored entries.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn entry(&self, key: SkillKey) -> SkillEntry {
        self.0.get(&key).copied().unwrap_or_default()
    }

    pub fn entry_mut(&mut self, key: SkillKey) -> &mut SkillEntry {
        self.0.entry(key).or_default()
    }

    pub fn set(&mut self, key: SkillKey, entry: SkillEntry) {
        self.0.insert(key, entry);
    }

    pub fn is_complete(&self) -> bool {
        self.0.len() == SkillKey::COUNT
    }

    /// Fills every missing key with the default entry.
    pub fn normalized(mut self) -> Self {
        for key in SkillKey::ALL {
            self.0.entry(key).or_default();
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillKey, &SkillEntry)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }
}

impl Default for SkillSheet {
    /// All 25 keys present with default entries.
    fn default() -> Self {
        Self::empty().normalized()
    }
}

impl FromIterator<(SkillKey, SkillEntry)> for SkillSheet {
    fn from_iter<I: IntoIterator<Item = (SkillKey, SkillEntry)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_belongs_to_exactly_one_group() {
        for key in SkillKey::ALL {
            let owners = SKILL_GROUPS
                .iter()
                .filter(|group| group.keys().any(|k| k == key))
                .count();
            assert_eq!(owners, 1, "{key} appears in {owners} groups");
        }
        let total: usize = SKILL_GROUPS.iter().map(|g| g.keys().count()).sum();
        assert_eq!(total, SkillKey::COUNT);
    }

    #[test]
    fn table_rows_match_ability_order() {
        for ability in Ability::ALL {
            assert_eq!(resolve_skill_group(ability).ability, ability);
        }
    }

    #[test]
    fn inverse_lookup_agrees_with_table() {
        assert_eq!(SkillKey::Athletics.ability(), Ability::Strength);
        assert_eq!(SkillKey::Stealth.ability(), Ability::Dexterity);
        assert_eq!(SkillKey::Religion.ability(), Ability::Intelligence);
        assert_eq!(SkillKey::PassivePerception.ability(), Ability::Wisdom);
        assert_eq!(SkillKey::Persuasion.ability(), Ability::Charisma);
        assert_eq!(
            SkillKey::SavingThrowConstitution.ability(),
            Ability::Constitution
        );
    }

    #[test]
    fn constitution_has_only_a_saving_throw() {
        let group = resolve_skill_group(Ability::Constitution);
        assert!(group.skills.is_empty());
        assert!(group.saving_throw.is_saving_throw());
    }

    #[test]
    fn proficiency_by_level() {
        assert_eq!(proficiency_for_level(0), 2);
        assert_eq!(proficiency_for_level(1), 2);
        assert_eq!(proficiency_for_level(4), 2);
        assert_eq!(proficiency_for_level(5), 3);
        assert_eq!(proficiency_for_level(9), 4);
        assert_eq!(proficiency_for_level(17), 6);
        assert_eq!(proficiency_for_level(20), 6);
    }

    #[test]
    fn skill_sheet_defaults_are_dense() {
        let sheet = SkillSheet::default();
        assert!(sheet.is_complete());
        assert_eq!(sheet.entry(SkillKey::Arcana), SkillEntry::default());
        assert_eq!(SkillEntry::default().value, Some(0));
    }

    #[test]
    fn missing_entries_read_as_default() {
        let mut sheet = SkillSheet::empty();
        assert_eq!(sheet.entry(SkillKey::Insight), SkillEntry::default());
        sheet.entry_mut(SkillKey::Insight).proficient = true;
        assert!(sheet.entry(SkillKey::Insight).proficient);
        assert!(!sheet.is_complete());
        assert!(sheet.normalized().is_complete());
    }

    #[test]
    fn skill_key_names_are_camel_case() {
        assert_eq!(SkillKey::SleightOfHand.to_string(), "sleightOfHand");
        assert_eq!(
            "savingThrowWisdom".parse::<SkillKey>(),
            Ok(SkillKey::SavingThrowWisdom)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn skill_sheet_serializes_as_map() {
        let mut sheet = SkillSheet::empty();
        sheet.set(SkillKey::AnimalHandling, SkillEntry::proficient());
        let json = serde_json::to_string(&sheet).unwrap();
        assert_eq!(
            json,
            r#"{"animalHandling":{"value":0,"manual":false,"proficient":true}}"#
        );
    }
}
