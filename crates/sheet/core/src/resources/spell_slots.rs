use super::pool::{ResetPolicy, ResourcePool};
use crate::config::SheetConfig;

/// Slots for one spell level (0 = cantrips).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SpellSlot {
    pub level: u8,
    pub current_slots: u32,
    pub max_slots: u32,
}

impl SpellSlot {
    pub const fn empty(level: u8) -> Self {
        Self {
            level,
            current_slots: 0,
            max_slots: 0,
        }
    }

    /// This level viewed as a pool (refilled on a long rest).
    pub const fn as_pool(&self) -> ResourcePool {
        ResourcePool::new(self.current_slots, self.max_slots, SpellSlotTrack::RESET)
    }

    fn from_pool(level: u8, pool: ResourcePool) -> Self {
        Self {
            level,
            current_slots: pool.current(),
            max_slots: pool.max(),
        }
    }
}

/// Spell slots for levels 0 through 9, one entry per level.
///
/// Operations on a level outside 0..=9 do nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpellSlotTrack(Vec<SpellSlot>);

impl SpellSlotTrack {
    /// Reset policy shared by every spell slot.
    pub const RESET: ResetPolicy = ResetPolicy::LongRest;

    pub fn new() -> Self {
        Self(
            (0..SheetConfig::SPELL_LEVELS as u8)
                .map(SpellSlot::empty)
                .collect(),
        )
    }

    pub fn get(&self, level: u8) -> Option<SpellSlot> {
        self.0.iter().find(|slot| slot.level == level).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpellSlot> {
        self.0.iter()
    }

    /// `current += delta`, clamped to `[0, max]`.
    pub fn adjust(&mut self, level: u8, delta: i32) {
        self.update(level, |pool| pool.adjust(delta));
    }

    /// Sets the maximum, pulling current down if needed.
    pub fn set_max(&mut self, level: u8, max: u32) {
        self.update(level, |pool| pool.set_max(max));
    }

    pub fn set_current(&mut self, level: u8, value: i32) {
        self.update(level, |pool| pool.set_current(value));
    }

    /// Toggles the dot at `index` (0-based) in a row of `max` dots.
    ///
    /// Clicking a filled dot empties it and everything after it
    /// (`current = index`); clicking an empty dot fills up to and including it
    /// (`current = index + 1`).
    pub fn toggle(&mut self, level: u8, index: u32) {
        self.update(level, |pool| {
            let target = if index < pool.current() {
                index
            } else {
                index.saturating_add(1)
            };
            pool.set_current(i32::try_from(target).unwrap_or(i32::MAX))
        });
    }

    /// Refills every level. Returns how many levels changed.
    pub fn restore_all(&mut self) -> usize {
        let mut changed = 0;
        for slot in &mut self.0 {
            if slot.current_slots < slot.max_slots {
                slot.current_slots = slot.max_slots;
                changed += 1;
            }
        }
        changed
    }

    /// Dense levels 0..=9 in order, first entry wins on duplicates, unknown
    /// levels dropped, currents clamped.
    pub fn normalized(self) -> Self {
        let mut dense = Self::new();
        for slot in self.0.into_iter().rev() {
            if let Some(target) = dense.0.get_mut(slot.level as usize) {
                *target = SpellSlot::from_pool(slot.level, slot.as_pool());
            }
        }
        dense
    }

    fn update(&mut self, level: u8, f: impl FnOnce(ResourcePool) -> ResourcePool) {
        if let Some(slot) = self.0.iter_mut().find(|slot| slot.level == level) {
            *slot = SpellSlot::from_pool(level, f(slot.as_pool()));
        }
    }
}

impl Default for SpellSlotTrack {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<SpellSlot> for SpellSlotTrack {
    fn from_iter<I: IntoIterator<Item = SpellSlot>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
