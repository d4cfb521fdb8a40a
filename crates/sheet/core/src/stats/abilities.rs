//! Ability Model - the six stored scores and their derived modifiers.
//!
//! Scores are the Single Source of Truth for every automatic statistic on the
//! sheet. Modifiers are never stored: `modifier(score) = floor((score - 10) / 2)`.

/// The six abilities of a character.
///
/// Stored records use SCREAMING_SNAKE_CASE names (`"STRENGTH"`), which is also
/// how the spellcasting ability is persisted. Parsing is case-insensitive.
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
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// Number of abilities.
    pub const COUNT: usize = 6;

    /// All abilities in sheet order.
    pub const ALL: [Ability; Self::COUNT] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Position of this ability in [`Ability::ALL`].
    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }

    /// Three-letter label used on printed sheets.
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }
}

/// Modifier for an ability score: `floor((score - 10) / 2)`.
///
/// Total over all `i32` inputs. Uses floor division, so odd scores below 10
/// round down (`modifier(7) == -2`).
#[inline]
pub const fn modifier(score: i32) -> i32 {
    ((score as i64 - 10).div_euclid(2)) as i32
}

/// Renders a modifier with an explicit sign (`+3`, `-1`, `+0`).
pub fn format_modifier(value: i32) -> String {
    if value >= 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

/// Six named ability scores.
///
/// Scores are unbounded integers; the rules engine never rejects a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityScores {
    pub const fn new(
        strength: i32,
        dexterity: i32,
        constitution: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
    ) -> Self {
        Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
        }
    }

    /// Every ability set to the same score.
    pub const fn uniform(score: i32) -> Self {
        Self::new(score, score, score, score, score, score)
    }

    pub const fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, ability: Ability, score: i32) {
        match ability {
            Ability::Strength => self.strength = score,
            Ability::Dexterity => self.dexterity = score,
            Ability::Constitution => self.constitution = score,
            Ability::Intelligence => self.intelligence = score,
            Ability::Wisdom => self.wisdom = score,
            Ability::Charisma => self.charisma = score,
        }
    }

    /// Builder-style variant of [`AbilityScores::set`].
    pub fn with(mut self, ability: Ability, score: i32) -> Self {
        self.set(ability, score);
        self
    }

    /// Derived modifier of one ability.
    pub const fn modifier(&self, ability: Ability) -> i32 {
        modifier(self.get(ability))
    }
}

impl Default for AbilityScores {
    /// All 10 (modifier +0).
    fn default() -> Self {
        Self::uniform(10)
    }
}
