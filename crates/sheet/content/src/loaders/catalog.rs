//! Catalog loader.
//!
//! A catalog file is a single RON `Catalog` with four lists:
//!
//! ```text
//! (
//!     items: [(id: 1, name: "Rope", stackable: true)],
//!     properties: [],
//!     skills: [(id: 10, name: "Second Wind", maxUses: Some(1), resetOn: SHORT_REST)],
//!     spells: [(id: 20, name: "Shield", level: 1, school: Some(abjuration))],
//! )
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, ensure};
use sheet_core::{Catalog, CatalogId, SheetConfig};

use crate::loaders::{LoadResult, read_file};

/// Loader for catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load and validate a catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Catalog> {
        let content = read_file(path)?;
        Self::load_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid catalog {}: {:#}", path.display(), e))
    }

    /// Parse and validate a catalog from RON text.
    pub fn load_str(content: &str) -> LoadResult<Catalog> {
        let catalog: Catalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;
        Self::validate(&catalog)?;
        Ok(catalog)
    }

    /// Checks ids are unique per kind, item properties resolve, and spell
    /// levels fit the slot table.
    pub fn validate(catalog: &Catalog) -> LoadResult<()> {
        unique_ids("item", catalog.items.iter().map(|def| def.id))?;
        unique_ids("property", catalog.properties.iter().map(|def| def.id))?;
        unique_ids("skill", catalog.skills.iter().map(|def| def.id))?;
        unique_ids("spell", catalog.spells.iter().map(|def| def.id))?;

        for item in &catalog.items {
            for &property in &item.properties {
                ensure!(
                    catalog.property(property).is_some(),
                    "item {} '{}' references unknown property {}",
                    item.id,
                    item.name,
                    property
                );
            }
        }

        for spell in &catalog.spells {
            ensure!(
                (spell.level as usize) < SheetConfig::SPELL_LEVELS,
                "spell {} '{}' has level {} (max {})",
                spell.id,
                spell.name,
                spell.level,
                SheetConfig::SPELL_LEVELS - 1
            );
        }

        Ok(())
    }
}

fn unique_ids(kind: &str, ids: impl Iterator<Item = CatalogId>) -> LoadResult<()> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            bail!("duplicate {} id {}", kind, id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_core::{Category, ResetPolicy, School};

    const SAMPLE: &str = r#"(
        items: [
            (
                id: 1,
                name: "Wand of Sparks",
                cost: Some((quantity: 150.0, unit: "gp")),
                rarity: Some("uncommon"),
                requiresAttunement: true,
                properties: [100],
                maxUses: Some(3),
                maxUsesAutoFormula: Some("proficiencyBonus"),
                resetOn: LONG_REST,
            ),
            (id: 2, name: "Rope", weight: 10.0, stackable: true),
            (
                id: 3,
                name: "Longsword",
                weapon: Some((range: "5 ft", damage: "1d8 slashing")),
            ),
        ],
        properties: [
            (id: 100, name: "Spark", baseMaxUses: Some(2), resetOn: SHORT_REST),
        ],
        skills: [
            (
                id: 10,
                name: "Second Wind",
                maxUses: Some(1),
                resetOn: SHORT_REST,
                categories: [HEALING],
            ),
        ],
        spells: [
            (id: 20, name: "Shield", level: 1, school: Some(abjuration), categories: [SHIELDING]),
        ],
    )"#;

    #[test]
    fn parses_sample_catalog() {
        let catalog = CatalogLoader::load_str(SAMPLE).expect("sample catalog loads");

        assert_eq!(catalog.items.len(), 3);
        let wand = catalog.item(CatalogId(1)).expect("wand");
        assert_eq!(wand.max_uses, Some(3));
        assert_eq!(wand.reset_on, ResetPolicy::LongRest);
        assert_eq!(wand.max_uses_auto_formula.as_deref(), Some("proficiencyBonus"));
        assert!(wand.requires_attunement);

        assert!(catalog.item(CatalogId(2)).is_some_and(|rope| rope.stackable));
        assert!(catalog.item(CatalogId(3)).is_some_and(|sword| sword.is_weapon()));

        let shield = catalog.spell(CatalogId(20)).expect("shield");
        assert_eq!(shield.school, Some(School::Abjuration));
        assert_eq!(shield.categories, vec![Category::Shielding]);

        let wind = catalog.skill(CatalogId(10)).expect("second wind");
        assert_eq!(wind.reset_on, ResetPolicy::ShortRest);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = CatalogLoader::load_str(
            r#"(skills: [(id: 1, name: "A"), (id: 1, name: "B")])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate skill id #1"), "{err}");
    }

    #[test]
    fn rejects_dangling_property() {
        let err = CatalogLoader::load_str(r#"(items: [(id: 1, name: "Ring", properties: [9])])"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown property #9"), "{err}");
    }

    #[test]
    fn rejects_spell_level_out_of_range() {
        let err = CatalogLoader::load_str(r#"(spells: [(id: 1, name: "Wish+", level: 10)])"#)
            .unwrap_err();
        assert!(err.to_string().contains("level 10"), "{err}");
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = CatalogLoader::load_str("(items: [])").expect("empty catalog");
        assert!(catalog.is_empty());
    }

    #[test]
    fn load_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.ron");
        std::fs::write(&path, "(items: [(id: 1)])").expect("write");

        let err = CatalogLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("broken.ron"), "{err}");

        let missing = CatalogLoader::load(&dir.path().join("missing.ron")).unwrap_err();
        assert!(missing.to_string().contains("Failed to read file"), "{missing}");
    }
}
