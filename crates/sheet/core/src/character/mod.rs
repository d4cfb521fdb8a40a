//! Character Record aggregate: the stored entity, partial updates, catalog
//! associations and the ownership rules that guard them.

mod access;
mod associations;
mod patch;
mod record;

pub use access::{AccessError, AccessGrant, Account, Role};
pub use associations::{
    AssignOutcome, ItemInstance, ItemInstanceUpdate, ItemPropertyInstance, SkillInstance,
    SpellAssociation,
};
pub use patch::CharacterPatch;
pub use record::{
    AccountId, CharacterId, CharacterRecord, CharacterSummary, Coins, HitDice, HitPoints,
    InstanceId,
};
