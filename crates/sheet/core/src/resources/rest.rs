use super::pool::{ResourcePool, RestKind};
use super::spell_slots::SpellSlotTrack;
use crate::character::CharacterRecord;

/// What a rest changed. Counts only pools that were below max.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestSummary {
    pub rest: RestKind,
    pub hit_points: bool,
    pub hit_dice: bool,
    pub spell_levels: usize,
    pub items: usize,
    pub item_properties: usize,
    pub skills: usize,
}

impl RestSummary {
    fn new(rest: RestKind) -> Self {
        Self {
            rest,
            hit_points: false,
            hit_dice: false,
            spell_levels: 0,
            items: 0,
            item_properties: 0,
            skills: 0,
        }
    }

    pub fn is_noop(&self) -> bool {
        !self.hit_points
            && !self.hit_dice
            && self.spell_levels == 0
            && self.items == 0
            && self.item_properties == 0
            && self.skills == 0
    }
}

/// Refills every pool whose reset policy is satisfied by `rest`.
///
/// Hit points and hit dice follow their own pool policy. Spell slots refill
/// under [`SpellSlotTrack::RESET`]. Temporary hit points and known-spell
/// counts are never touched.
pub fn apply_rest(mut record: CharacterRecord, rest: RestKind) -> (CharacterRecord, RestSummary) {
    let mut summary = RestSummary::new(rest);

    summary.hit_points = refill(&mut record.hit_points.pool, rest);
    summary.hit_dice = refill(&mut record.hit_dice.pool, rest);

    if SpellSlotTrack::RESET.restored_by(rest) {
        summary.spell_levels = record.spell_slots.restore_all();
    }

    for item in &mut record.items {
        if item.uses.as_mut().is_some_and(|uses| refill(uses, rest)) {
            summary.items += 1;
        }
        for property in &mut item.properties {
            if refill(&mut property.uses, rest) {
                summary.item_properties += 1;
            }
        }
    }

    for skill in &mut record.extra_skills {
        if refill(&mut skill.uses, rest) {
            summary.skills += 1;
        }
    }

    (record, summary)
}

fn refill(pool: &mut ResourcePool, rest: RestKind) -> bool {
    if pool.classify_reset().restored_by(rest) && !pool.is_full() {
        *pool = pool.restore();
        true
    } else {
        false
    }
}
