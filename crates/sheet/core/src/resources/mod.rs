//! Resource Pool Tracker - bounded, resettable counters.
//!
//! Hit points, hit dice, spell slots and every "uses" counter on items, item
//! properties and skills share one invariant: `0 <= current <= max` after any
//! mutation. Operations clamp rather than fail.
//!
//! Rests are applied only by the host through [`apply_rest`]; nothing here
//! resets a pool on its own.

pub mod known_spells;
pub mod pool;
pub mod rest;
pub mod spell_slots;

pub use known_spells::KnownSpells;
pub use pool::{ResetPolicy, ResourcePool, RestKind};
pub use rest::{RestSummary, apply_rest};
pub use spell_slots::{SpellSlot, SpellSlotTrack};
