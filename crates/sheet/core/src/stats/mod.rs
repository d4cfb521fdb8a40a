//! Stat system - raw inputs in, displayed values out.
//!
//! # Architecture
//!
//! ```text
//! [ Ability Scores (stored) ]
//!      ↓
//! [ Modifiers: floor((score - 10) / 2) ]
//!      ↓
//! [ Proficiency: bonus + ability → skill table ]
//!      ↓
//! [ Resolvers: skills, saves, initiative, spellcasting, carry capacity ]
//!      ↓
//! [ SheetView (computed, never stored) ]
//! ```
//!
//! ## Principles
//!
//! 1. **SSOT**: Only scores, flags and manual values are stored
//! 2. **Manual override**: A field flagged manual returns its stored value unchanged;
//!    otherwise the stored value is ignored and recomputed
//! 3. **Pure**: Resolvers read a record snapshot and never write back
//! 4. **Total**: Every input produces a value; nothing here returns an error

pub mod abilities;
pub mod overridable;
pub mod proficiency;
pub mod resolver;
pub mod snapshot;

pub use abilities::{Ability, AbilityScores, format_modifier, modifier};
pub use overridable::Overridable;
pub use proficiency::{
    SKILL_GROUPS, SkillEntry, SkillGroup, SkillKey, SkillSheet, proficiency_for_level,
    resolve_skill_group,
};
pub use resolver::{
    resolve_carry_capacity, resolve_initiative, resolve_proficiency_bonus, resolve_skill,
    resolve_skill_value, resolve_spell_save_dc, resolve_spellcasting_modifier,
};
pub use snapshot::{GroupView, SheetView, SkillValue};
