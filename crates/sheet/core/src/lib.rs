//! Character sheet rules and data types shared by stores and tools.
//!
//! `sheet-core` defines the canonical character record and exposes pure APIs
//! that turn raw inputs (ability scores, flags, counters) into the values a
//! character sheet displays. Nothing in this crate performs I/O: stores load
//! and persist [`CharacterRecord`]s, and every displayed value is re-derived
//! from the latest record through [`stats`].
//!
//! Modules are organized by responsibility:
//! - [`stats`] hosts the ability model, proficiency table and resolvers
//! - [`resources`] tracks bounded pools (hit points, hit dice, slots, uses)
//! - [`character`] holds the aggregate record, patches, associations and access rules
//! - [`catalog`] defines the administrator-managed item/skill/spell definitions
pub mod catalog;
pub mod character;
pub mod config;
pub mod error;
pub mod resources;
pub mod stats;

pub use catalog::{
    Catalog, CatalogId, Category, Cost, ItemDefinition, ItemPropertyDefinition, School,
    SkillDefinition, Source, SpellDefinition, WeaponProfile,
};
pub use character::{
    Account, AccessError, AccessGrant, AccountId, AssignOutcome, CharacterId, CharacterPatch,
    CharacterRecord, CharacterSummary, Coins, HitDice, HitPoints, InstanceId, ItemInstance,
    ItemInstanceUpdate, ItemPropertyInstance, Role, SkillInstance, SpellAssociation,
};
pub use config::SheetConfig;
pub use error::{ErrorSeverity, SheetError};
pub use resources::{
    KnownSpells, ResetPolicy, ResourcePool, RestKind, RestSummary, SpellSlot, SpellSlotTrack,
    apply_rest,
};
pub use stats::{
    Ability, AbilityScores, GroupView, Overridable, SKILL_GROUPS, SheetView, SkillEntry,
    SkillGroup, SkillKey, SkillSheet, SkillValue, format_modifier, modifier,
    proficiency_for_level, resolve_carry_capacity, resolve_initiative, resolve_proficiency_bonus,
    resolve_skill, resolve_skill_group, resolve_skill_value, resolve_spell_save_dc,
    resolve_spellcasting_modifier,
};
