use super::associations::{ItemInstance, SkillInstance, SpellAssociation};
use crate::config::SheetConfig;
use crate::resources::{KnownSpells, ResetPolicy, ResourcePool, SpellSlotTrack};
use crate::stats::{Ability, AbilityScores, Overridable, SkillSheet};

/// Identifier of a stored character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CharacterId(pub u64);

impl core::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the owning account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AccountId(pub u64);

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one held item or item property, unique within a character.
///
/// `InstanceId(0)` marks an instance that has not been numbered yet; records
/// number such instances when normalized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct InstanceId(pub u64);

impl InstanceId {
    pub const UNASSIGNED: Self = Self(0);

    pub const fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl core::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hit point pool plus temporary hit points.
///
/// Temporary hit points sit outside the pool and are not bounded by its max.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitPoints {
    pub pool: ResourcePool,
    pub temp: u32,
}

impl Default for HitPoints {
    fn default() -> Self {
        Self {
            pool: ResourcePool::full(0, ResetPolicy::LongRest),
            temp: 0,
        }
    }
}

/// Hit dice pool and the die expression (free text, e.g. `"1d8"`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitDice {
    pub pool: ResourcePool,
    pub die: String,
}

impl Default for HitDice {
    fn default() -> Self {
        Self {
            pool: ResourcePool::full(0, ResetPolicy::LongRest),
            die: String::new(),
        }
    }
}

/// Coin purse in the five standard denominations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Coins {
    pub copper: u32,
    pub silver: u32,
    pub electrum: u32,
    pub gold: u32,
    pub platinum: u32,
}

impl Coins {
    /// Copper value of one coin of each denomination, in purse order.
    pub const COPPER_RATES: [u64; SheetConfig::COIN_KINDS] = [1, 10, 50, 100, 1000];

    pub const fn as_array(&self) -> [u32; SheetConfig::COIN_KINDS] {
        [
            self.copper,
            self.silver,
            self.electrum,
            self.gold,
            self.platinum,
        ]
    }

    pub const fn from_array(coins: [u32; SheetConfig::COIN_KINDS]) -> Self {
        Self {
            copper: coins[0],
            silver: coins[1],
            electrum: coins[2],
            gold: coins[3],
            platinum: coins[4],
        }
    }

    /// Whole purse expressed in copper pieces.
    pub fn total_copper(&self) -> u64 {
        self.as_array()
            .iter()
            .zip(Self::COPPER_RATES)
            .map(|(&count, rate)| count as u64 * rate)
            .sum()
    }
}

/// The canonical character entity.
///
/// Only raw inputs are stored here. Displayed statistics are recomputed through
/// [`crate::stats`] every time the record is read.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct CharacterRecord {
    pub id: CharacterId,
    pub owner: AccountId,

    // ===== identity =====
    pub name: String,
    pub race: String,
    #[cfg_attr(feature = "serde", serde(rename = "characterClass"))]
    pub class_name: String,
    pub background: String,
    pub alignment: String,
    pub size: String,
    pub icon_url: Option<String>,
    pub languages: String,
    pub other_proficiencies: String,

    // ===== progression & combat basics =====
    pub level: i32,
    pub experience: i32,
    pub experience_to_next_level: i32,
    pub armor_class: i32,
    pub speed: i32,
    pub inspiration: i32,
    pub coins: Coins,

    // ===== abilities & proficiency =====
    pub abilities: AbilityScores,
    pub proficiency_bonus: Overridable<i32>,
    pub skills: SkillSheet,

    // ===== pools & derived inputs =====
    pub hit_points: HitPoints,
    pub hit_dice: HitDice,
    pub initiative: Overridable<i32>,
    pub actual_weight: i32,
    pub carry_capacity: Overridable<i32>,

    // ===== spellcasting =====
    pub spellcasting_ability: Option<Ability>,
    pub spellcasting_modifier: Overridable<i32>,
    pub spell_save_dc: Overridable<i32>,
    pub max_prepared_spells: i32,
    pub spell_slots: SpellSlotTrack,
    pub known_spells: KnownSpells,

    // ===== associations =====
    pub items: Vec<ItemInstance>,
    pub extra_skills: Vec<SkillInstance>,
    pub spells: Vec<SpellAssociation>,
    /// Highest instance id handed out so far. Ids are never reused.
    pub last_instance_id: u64,
}

impl CharacterRecord {
    /// New character with default rules configuration.
    pub fn new(id: CharacterId, owner: AccountId, name: impl Into<String>) -> Self {
        Self::from_config(id, owner, name, &SheetConfig::default())
    }

    /// New character: every ability at the configured default, ten empty
    /// spell-slot levels, zero known spells and coins, every skill entry
    /// defaulted, and all overridable statistics in automatic mode.
    pub fn from_config(
        id: CharacterId,
        owner: AccountId,
        name: impl Into<String>,
        config: &SheetConfig,
    ) -> Self {
        Self {
            id,
            owner,
            name: name.into(),
            race: String::new(),
            class_name: String::new(),
            background: String::new(),
            alignment: String::new(),
            size: String::new(),
            icon_url: None,
            languages: String::new(),
            other_proficiencies: String::new(),
            level: 1,
            experience: 0,
            experience_to_next_level: 0,
            armor_class: 0,
            speed: 0,
            inspiration: 0,
            coins: Coins::default(),
            abilities: AbilityScores::uniform(config.default_ability_score),
            proficiency_bonus: Overridable::auto(0),
            skills: SkillSheet::default(),
            hit_points: HitPoints::default(),
            hit_dice: HitDice {
                die: config.default_hit_die.clone(),
                ..HitDice::default()
            },
            initiative: Overridable::auto(0),
            actual_weight: 0,
            carry_capacity: Overridable::auto(0),
            spellcasting_ability: None,
            spellcasting_modifier: Overridable::auto(0),
            spell_save_dc: Overridable::auto(0),
            max_prepared_spells: 0,
            spell_slots: SpellSlotTrack::new(),
            known_spells: KnownSpells::default(),
            items: Vec::new(),
            extra_skills: Vec::new(),
            spells: Vec::new(),
            last_instance_id: 0,
        }
    }

    /// Hands out the next instance id.
    pub fn allocate_instance_id(&mut self) -> InstanceId {
        self.last_instance_id = self.last_instance_id.saturating_add(1);
        InstanceId(self.last_instance_id)
    }

    /// Re-establishes every structural invariant: pool bounds, dense spell
    /// slot levels, a complete skill sheet and numbered item instances.
    ///
    /// Stores call this on everything they read and write, so a record coming
    /// from an older file or a raw patch is always safe to resolve.
    pub fn normalized(mut self) -> Self {
        self.hit_points.pool = self.hit_points.pool.normalized();
        self.hit_dice.pool = self.hit_dice.pool.normalized();
        self.spell_slots = self.spell_slots.normalized();
        self.skills = self.skills.normalized();
        for item in &mut self.items {
            item.uses = item.uses.map(ResourcePool::normalized);
            for property in &mut item.properties {
                property.uses = property.uses.normalized();
            }
        }
        for skill in &mut self.extra_skills {
            skill.uses = skill.uses.normalized();
        }
        self.number_instances();
        self
    }

    // Instances from older files carry no id; give them fresh ones above
    // every id already in use.
    fn number_instances(&mut self) {
        let highest = self
            .items
            .iter()
            .flat_map(|item| {
                core::iter::once(item.instance_id)
                    .chain(item.properties.iter().map(|property| property.instance_id))
            })
            .map(|id| id.0)
            .max()
            .unwrap_or(0);
        self.last_instance_id = self.last_instance_id.max(highest);

        let mut next = self.last_instance_id;
        let mut allocate = || {
            next = next.saturating_add(1);
            InstanceId(next)
        };
        for item in &mut self.items {
            if !item.instance_id.is_assigned() {
                item.instance_id = allocate();
            }
            for property in &mut item.properties {
                if !property.instance_id.is_assigned() {
                    property.instance_id = allocate();
                }
            }
        }
        self.last_instance_id = next;
    }

    pub fn summary(&self) -> CharacterSummary {
        CharacterSummary {
            id: self.id,
            name: self.name.clone(),
            icon_url: self.icon_url.clone(),
            level: self.level,
            class_name: self.class_name.clone(),
            race: self.race.clone(),
            owner_username: None,
        }
    }
}

impl Default for CharacterRecord {
    fn default() -> Self {
        Self::new(CharacterId::default(), AccountId::default(), String::new())
    }
}

/// One row of a character list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CharacterSummary {
    pub id: CharacterId,
    pub name: String,
    pub icon_url: Option<String>,
    pub level: i32,
    #[cfg_attr(feature = "serde", serde(rename = "characterClass"))]
    pub class_name: String,
    pub race: String,
    /// Filled only in administrator listings.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub owner_username: Option<String>,
}

impl CharacterSummary {
    pub fn with_owner(mut self, username: impl Into<String>) -> Self {
        self.owner_username = Some(username.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogId;
    use crate::character::ItemPropertyInstance;
    use crate::stats::{SkillEntry, SkillKey};

    #[test]
    fn new_record_defaults() {
        let record = CharacterRecord::new(CharacterId(1), AccountId(9), "Ada");
        assert_eq!(record.name, "Ada");
        assert_eq!(record.owner, AccountId(9));
        assert_eq!(record.abilities, AbilityScores::uniform(10));
        assert_eq!(record.spell_slots.iter().count(), 10);
        assert_eq!(record.known_spells, KnownSpells::default());
        assert_eq!(record.coins.as_array(), [0; 5]);
        assert!(record.skills.is_complete());
        assert_eq!(record.proficiency_bonus, Overridable::auto(0));
        assert!(!record.initiative.manual);
    }

    #[test]
    fn config_defaults_apply() {
        let config = SheetConfig::new()
            .with_default_ability_score(8)
            .with_default_hit_die("1d10");
        let record = CharacterRecord::from_config(CharacterId(1), AccountId(1), "Bo", &config);
        assert_eq!(record.abilities.charisma, 8);
        assert_eq!(record.hit_dice.die, "1d10");
    }

    #[test]
    fn normalized_repairs_invariants() {
        let mut record = CharacterRecord::new(CharacterId(1), AccountId(1), "Cy");
        record.skills = SkillSheet::empty();
        record
            .skills
            .set(SkillKey::Stealth, SkillEntry::proficient());
        record.spell_slots = SpellSlotTrack::from_iter([]);

        let record = record.normalized();
        assert!(record.skills.is_complete());
        assert!(record.skills.entry(SkillKey::Stealth).proficient);
        assert_eq!(record.spell_slots.iter().count(), 10);
    }

    #[test]
    fn normalized_numbers_legacy_instances() {
        let mut record = CharacterRecord::new(CharacterId(1), AccountId(1), "Cy");
        let unnumbered = ItemInstance {
            instance_id: InstanceId::UNASSIGNED,
            item_id: CatalogId(4),
            uses: None,
            attuned: false,
            equipped: false,
            favourite: false,
            quantity: 1,
            properties: vec![ItemPropertyInstance {
                instance_id: InstanceId::UNASSIGNED,
                property_id: CatalogId(9),
                uses: ResourcePool::default(),
            }],
        };
        record.items = vec![
            ItemInstance {
                instance_id: InstanceId(5),
                ..unnumbered.clone()
            },
            unnumbered,
        ];

        let mut record = record.normalized();
        assert_eq!(record.items[0].instance_id, InstanceId(5));
        assert_eq!(record.items[0].properties[0].instance_id, InstanceId(6));
        assert_eq!(record.items[1].instance_id, InstanceId(7));
        assert_eq!(record.items[1].properties[0].instance_id, InstanceId(8));
        assert_eq!(record.allocate_instance_id(), InstanceId(9));

        // Numbering is stable once assigned.
        let again = record.clone().normalized();
        assert_eq!(again, record);
    }

    #[test]
    fn coins_total() {
        let coins = Coins::from_array([5, 1, 2, 3, 1]);
        assert_eq!(coins.total_copper(), 5 + 10 + 100 + 300 + 1000);
    }

    #[test]
    fn summary_carries_owner_only_when_set() {
        let record = CharacterRecord::new(CharacterId(2), AccountId(1), "Dee");
        let summary = record.summary();
        assert_eq!(summary.owner_username, None);
        assert_eq!(
            summary.with_owner("gm").owner_username.as_deref(),
            Some("gm")
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_roundtrip_keeps_every_field() {
        let mut record = CharacterRecord::new(CharacterId(7), AccountId(2), "Eli");
        record.class_name = "Wizard".into();
        record.spellcasting_ability = Some(Ability::Intelligence);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"characterClass\":\"Wizard\""));
        assert!(json.contains("\"spellcastingAbility\":\"INTELLIGENCE\""));
        let back: CharacterRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn sparse_json_loads_with_defaults() {
        let record: CharacterRecord =
            serde_json::from_str(r#"{"id":3,"owner":1,"name":"Fen"}"#).unwrap();
        let record = record.normalized();
        assert_eq!(record.id, CharacterId(3));
        assert_eq!(record.abilities.strength, 10);
        assert!(record.skills.is_complete());
    }
}
