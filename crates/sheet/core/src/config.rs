/// Rule constants and tunable defaults for new character sheets.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SheetConfig {
    /// Score given to every ability when a character is created.
    pub default_ability_score: i32,

    /// Hit die recorded on new characters (free text, e.g. `"1d8"`).
    pub default_hit_die: String,
}

impl SheetConfig {
    // ===== fixed rule constants =====
    /// Spell levels tracked per character (cantrips = level 0 through level 9).
    pub const SPELL_LEVELS: usize = 10;
    /// Coin denominations: copper, silver, electrum, gold, platinum.
    pub const COIN_KINDS: usize = 5;
    /// Carrying capacity per point of strength.
    pub const CARRY_MULTIPLIER: i32 = 5;
    /// Base of the spell save DC before the spellcasting modifier.
    pub const SPELL_DC_BASE: i32 = 8;
    /// Proficiency bonus at level 1.
    pub const BASE_PROFICIENCY: i32 = 2;
    /// Levels per +1 proficiency step.
    pub const PROFICIENCY_STEP_LEVELS: i32 = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ABILITY_SCORE: i32 = 10;
    pub const DEFAULT_HIT_DIE: &'static str = "";

    pub fn new() -> Self {
        Self {
            default_ability_score: Self::DEFAULT_ABILITY_SCORE,
            default_hit_die: Self::DEFAULT_HIT_DIE.to_string(),
        }
    }

    pub fn with_default_ability_score(mut self, score: i32) -> Self {
        self.default_ability_score = score;
        self
    }

    pub fn with_default_hit_die(mut self, die: impl Into<String>) -> Self {
        self.default_hit_die = die.into();
        self
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = SheetConfig::new().with_default_ability_score(12);
        assert_eq!(config.default_ability_score, 12);
        assert_eq!(config.default_hit_die, SheetConfig::DEFAULT_HIT_DIE);
        assert_eq!(SheetConfig::default(), SheetConfig::new());
    }
}
