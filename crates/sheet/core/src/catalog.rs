//! Catalog definitions maintained by administrators.
//!
//! Definitions are immutable from a player's point of view. The rules engine
//! reads only `max_uses` / `base_max_uses` and `reset_on` (to seed pools when a
//! definition is assigned); formula and template strings are passed through
//! unevaluated.

use crate::resources::ResetPolicy;

/// Identifier of any catalog definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CatalogId(pub u64);

impl core::fmt::Display for CatalogId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a skill or spell on a character comes from.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Source {
    #[default]
    Innate,
    Item,
    Class,
    Race,
    Background,
    Feat,
}

/// Tag used to group skills and spells in the UI.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Category {
    Damage,
    Utility,
    Tank,
    Support,
    Aoe,
    Healing,
    Shielding,
    Burst,
    Cc,
    Movement,
}

/// School of magic.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum School {
    Abjuration,
    Conjuration,
    Divination,
    Enchantment,
    Evocation,
    Illusion,
    Necromancy,
    Transmutation,
}

/// Price of an item. The unit is free text (`"gp"`, `"sp"`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cost {
    pub quantity: f64,
    pub unit: String,
}

/// Extra fields carried by weapons.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WeaponProfile {
    pub range: String,
    /// Damage expression, e.g. `"1d8 slashing"`. Not evaluated.
    pub damage: String,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ItemDefinition {
    pub id: CatalogId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description_template: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub summary_template: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon_url: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: Option<Cost>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weight: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requires_attunement: bool,
    /// Properties granted by this item, by catalog id.
    #[cfg_attr(feature = "serde", serde(default))]
    pub properties: Vec<CatalogId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reset_on: ResetPolicy,
    /// `None` for items without a uses counter.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_uses: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_uses_auto_calculated: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_uses_auto_formula: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stackable: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<WeaponProfile>,
}

impl ItemDefinition {
    /// Minimal definition; every other field defaulted.
    pub fn new(id: CatalogId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description_template: String::new(),
            summary_template: String::new(),
            icon_url: None,
            cost: None,
            rarity: None,
            weight: 0.0,
            category: None,
            requires_attunement: false,
            properties: Vec::new(),
            reset_on: ResetPolicy::None,
            max_uses: None,
            max_uses_auto_calculated: false,
            max_uses_auto_formula: None,
            stackable: false,
            weapon: None,
        }
    }

    pub fn is_weapon(&self) -> bool {
        self.weapon.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ItemPropertyDefinition {
    pub id: CatalogId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// 0 (or absent) marks a passive property.
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_max_uses: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reset_on: ResetPolicy,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SkillDefinition {
    pub id: CatalogId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description_template: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub summary_template: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon_url: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reset_on: ResetPolicy,
    /// 0 marks a passive skill.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_uses: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub auto_calculated: bool,
    /// e.g. `"proficiencyBonus"` or `"charismaMod+2"`. Not evaluated.
    #[cfg_attr(feature = "serde", serde(default))]
    pub auto_formula: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub categories: Vec<Category>,
}

impl SkillDefinition {
    pub fn new(id: CatalogId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description_template: String::new(),
            summary_template: String::new(),
            icon_url: None,
            reset_on: ResetPolicy::None,
            max_uses: None,
            auto_calculated: false,
            auto_formula: None,
            categories: Vec::new(),
        }
    }

    pub fn is_passive(&self) -> bool {
        self.max_uses.unwrap_or(0) == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SpellDefinition {
    pub id: CatalogId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub level: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon_url: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub concentration: bool,
    /// Range, components, duration, casting time and damage text.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description_template: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub summary_template: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub school: Option<School>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub categories: Vec<Category>,
}

impl SpellDefinition {
    pub fn new(id: CatalogId, name: impl Into<String>, level: u8) -> Self {
        Self {
            id,
            name: name.into(),
            level,
            icon_url: None,
            concentration: false,
            description_template: String::new(),
            summary_template: String::new(),
            school: None,
            categories: Vec::new(),
        }
    }
}

/// A full set of definitions, as loaded from a catalog file.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Catalog {
    pub items: Vec<ItemDefinition>,
    pub properties: Vec<ItemPropertyDefinition>,
    pub skills: Vec<SkillDefinition>,
    pub spells: Vec<SpellDefinition>,
}

impl Catalog {
    pub fn item(&self, id: CatalogId) -> Option<&ItemDefinition> {
        self.items.iter().find(|def| def.id == id)
    }

    pub fn property(&self, id: CatalogId) -> Option<&ItemPropertyDefinition> {
        self.properties.iter().find(|def| def.id == id)
    }

    pub fn skill(&self, id: CatalogId) -> Option<&SkillDefinition> {
        self.skills.iter().find(|def| def.id == id)
    }

    pub fn spell(&self, id: CatalogId) -> Option<&SpellDefinition> {
        self.spells.iter().find(|def| def.id == id)
    }

    /// Properties of `item`, skipping ids that are not in this catalog.
    pub fn properties_of<'a>(
        &'a self,
        item: &'a ItemDefinition,
    ) -> impl Iterator<Item = &'a ItemPropertyDefinition> + 'a {
        item.properties.iter().filter_map(|&id| self.property(id))
    }

    pub fn len(&self) -> usize {
        self.items.len() + self.properties.len() + self.skills.len() + self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id() {
        let mut sword = ItemDefinition::new(CatalogId(1), "Flame Tongue");
        sword.properties = vec![CatalogId(7), CatalogId(99)];
        let catalog = Catalog {
            items: vec![sword],
            properties: vec![ItemPropertyDefinition {
                id: CatalogId(7),
                name: "Ignite".into(),
                description: String::new(),
                base_max_uses: Some(1),
                reset_on: ResetPolicy::ShortRest,
            }],
            skills: vec![SkillDefinition::new(CatalogId(2), "Second Wind")],
            spells: vec![SpellDefinition::new(CatalogId(3), "Shield", 1)],
        };

        assert_eq!(catalog.len(), 4);
        assert!(catalog.item(CatalogId(2)).is_none());
        let item = catalog.item(CatalogId(1)).map(|i| i.name.as_str());
        assert_eq!(item, Some("Flame Tongue"));
        assert_eq!(catalog.spell(CatalogId(3)).map(|s| s.level), Some(1));

        let Some(sword) = catalog.item(CatalogId(1)) else {
            panic!("sword missing");
        };
        let names: Vec<_> = catalog.properties_of(sword).map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ignite"]);
    }

    #[test]
    fn passive_skills() {
        let mut skill = SkillDefinition::new(CatalogId(1), "Darkvision");
        assert!(skill.is_passive());
        skill.max_uses = Some(0);
        assert!(skill.is_passive());
        skill.max_uses = Some(2);
        assert!(!skill.is_passive());
    }

    #[test]
    fn enum_names() {
        assert_eq!(Source::Background.to_string(), "BACKGROUND");
        assert_eq!("cc".parse::<Category>(), Ok(Category::Cc));
        assert_eq!(School::Necromancy.to_string(), "necromancy");
    }
}
