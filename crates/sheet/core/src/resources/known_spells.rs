use crate::config::SheetConfig;

/// How many spells of each level (0..=9) the character knows.
///
/// Counts never go below zero; there is no upper bound and no rest touches them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct KnownSpells([u32; SheetConfig::SPELL_LEVELS]);

impl KnownSpells {
    pub const fn new(counts: [u32; SheetConfig::SPELL_LEVELS]) -> Self {
        Self(counts)
    }

    pub fn get(&self, level: u8) -> Option<u32> {
        self.0.get(level as usize).copied()
    }

    /// Stores `max(value, 0)`. Unknown levels are ignored.
    pub fn set(&mut self, level: u8, value: i32) {
        if let Some(count) = self.0.get_mut(level as usize) {
            *count = value.max(0) as u32;
        }
    }

    pub fn adjust(&mut self, level: u8, delta: i32) {
        if let Some(count) = self.0.get_mut(level as usize) {
            *count = (*count as i64 + delta as i64).clamp(0, u32::MAX as i64) as u32;
        }
    }

    pub fn as_array(&self) -> &[u32; SheetConfig::SPELL_LEVELS] {
        &self.0
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|&count| count as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_values_floor_at_zero() {
        let mut known = KnownSpells::default();
        known.set(1, 4);
        known.set(2, -3);
        assert_eq!(known.get(1), Some(4));
        assert_eq!(known.get(2), Some(0));

        known.adjust(1, -10);
        assert_eq!(known.get(1), Some(0));
        known.adjust(1, 2);
        assert_eq!(known.get(1), Some(2));
    }

    #[test]
    fn out_of_range_level_is_ignored() {
        let mut known = KnownSpells::default();
        known.set(10, 5);
        known.adjust(200, 5);
        assert_eq!(known, KnownSpells::default());
        assert_eq!(known.get(10), None);
        assert_eq!(known.total(), 0);
    }
}
