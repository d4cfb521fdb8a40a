//! Read a stored character and display its resolved sheet
//!
//! Loads `character_{id}.json` through the file store, so the record is
//! normalized exactly as the service would see it.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use sheet_core::{Catalog, CharacterId, CharacterRecord, SheetView, SkillValue, format_modifier};
use sheet_store::{CharacterStore, FileCharacterStore};

use crate::dirs;

/// Read a stored character and print its resolved sheet
#[derive(Parser)]
pub struct ReadSheet {
    /// Character id (the N in character_N.json)
    #[arg(value_name = "ID")]
    id: u64,

    /// Custom data directory (defaults to SHEET_DATA_DIR or the platform location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Catalog used to print item, skill and spell names
    #[arg(short, long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Resolved sheet: abilities, skills, combat stats and resources
    Summary,
    /// Stored record as JSON
    Json,
    /// Pretty-printed debug format of record and resolved view
    Debug,
}

impl ReadSheet {
    pub fn execute(self) -> Result<()> {
        let data_dir = dirs::data_dir(self.data_dir);
        let store = FileCharacterStore::new(&data_dir)
            .with_context(|| format!("Failed to open data directory: {}", data_dir.display()))?;

        let id = CharacterId(self.id);
        let record = store
            .load(id)
            .with_context(|| format!("Failed to read character {}", id))?
            .with_context(|| {
                format!(
                    "Character {} not found\n\nHint: run `cargo xtask list-characters {}`",
                    id,
                    format_args!("--data-dir {}", data_dir.display())
                )
            })?;

        let view = SheetView::resolve(&record);

        match self.format {
            OutputFormat::Summary => {
                let catalog = dirs::load_catalog(self.catalog)?;
                print_summary(&record, &view, &catalog);
            }
            OutputFormat::Json => print_json(&record)?,
            OutputFormat::Debug => println!("{:#?}\n{:#?}", record, view),
        }

        Ok(())
    }
}

fn print_summary(record: &CharacterRecord, view: &SheetView, catalog: &Catalog) {
    println!(
        "{} {} (#{})",
        style("Character:").bold().cyan(),
        style(&record.name).bold(),
        record.id
    );
    println!(
        "  Level {} {} {} | AC {} | Speed {} | XP {}/{}",
        record.level,
        record.race,
        record.class_name,
        record.armor_class,
        record.speed,
        record.experience,
        record.experience_to_next_level
    );
    println!();

    println!("{}", style("Abilities:").bold().yellow());
    for group in &view.groups {
        println!(
            "  {} {:>3} ({})  save {}",
            style(group.ability.abbreviation()).bold(),
            group.score,
            format_modifier(group.modifier),
            skill_cell(&group.saving_throw)
        );
        for skill in &group.skills {
            println!("      {:<22} {}", skill.key.to_string(), skill_cell(skill));
        }
    }
    println!();

    println!("{}", style("Combat:").bold().yellow());
    println!(
        "  Proficiency bonus: {}",
        format_modifier(view.proficiency_bonus)
    );
    println!("  Initiative: {}", format_modifier(view.initiative));
    println!(
        "  Hit points: {}/{} (+{} temp)",
        view.hit_points.current(),
        view.hit_points.max(),
        view.temp_hp
    );
    println!(
        "  Hit dice: {}/{} {}",
        view.hit_dice.current(),
        view.hit_dice.max(),
        view.hit_die
    );
    let weight = format!("{}/{}", view.actual_weight, view.carry_capacity);
    if view.is_encumbered() {
        println!("  Carrying: {}", style(weight).red());
    } else {
        println!("  Carrying: {}", weight);
    }
    println!();

    println!("{}", style("Spellcasting:").bold().yellow());
    match view.spellcasting_ability {
        Some(ability) => println!("  Ability: {}", ability),
        None => println!("  Ability: {}", style("none").dim()),
    }
    println!(
        "  Modifier: {} | Save DC: {}",
        format_modifier(view.spellcasting_modifier),
        view.spell_save_dc
    );
    for slot in record.spell_slots.iter().filter(|slot| slot.max_slots > 0) {
        println!(
            "  Level {} slots: {}/{} (known {})",
            slot.level,
            slot.current_slots,
            slot.max_slots,
            record.known_spells.get(slot.level).unwrap_or(0)
        );
    }
    println!();

    if !record.items.is_empty() {
        println!("{}", style("Items:").bold().yellow());
        for item in &record.items {
            let name = catalog
                .item(item.item_id)
                .map_or_else(|| item.item_id.to_string(), |def| def.name.clone());
            let uses = item
                .uses
                .map(|uses| format!(" uses {}/{}", uses.current(), uses.max()))
                .unwrap_or_default();
            let mut flags = Vec::new();
            if item.equipped {
                flags.push("equipped");
            }
            if item.attuned {
                flags.push("attuned");
            }
            println!(
                "  [{}] {} x{}{} {}",
                item.instance_id,
                name,
                item.quantity,
                uses,
                style(flags.join(", ")).dim()
            );
        }
        println!();
    }

    if !record.extra_skills.is_empty() {
        println!("{}", style("Features:").bold().yellow());
        for skill in &record.extra_skills {
            let name = catalog
                .skill(skill.skill_id)
                .map_or_else(|| skill.skill_id.to_string(), |def| def.name.clone());
            if skill.uses.max() == 0 {
                println!("  {} ({}, passive)", name, skill.source);
            } else {
                println!(
                    "  {} ({}) uses {}/{} [{}]",
                    name,
                    skill.source,
                    skill.uses.current(),
                    skill.uses.max(),
                    skill.uses.classify_reset()
                );
            }
        }
        println!();
    }

    if !record.spells.is_empty() {
        println!(
            "{} {} prepared / {} max",
            style("Spells:").bold().yellow(),
            record.prepared_spells(),
            record.max_prepared_spells
        );
        for spell in &record.spells {
            let (name, level) = catalog
                .spell(spell.spell_id)
                .map_or_else(|| (spell.spell_id.to_string(), None), |def| {
                    (def.name.clone(), Some(def.level))
                });
            let marker = if spell.prepared { "*" } else { " " };
            match level {
                Some(level) => println!("  {} {} (level {})", marker, name, level),
                None => println!("  {} {}", marker, name),
            }
        }
    }
}

fn skill_cell(value: &SkillValue) -> String {
    let mut cell = format_modifier(value.value);
    if value.proficient {
        cell.push_str(" *");
    }
    if value.manual {
        cell.push_str(" (manual)");
    }
    cell
}

fn print_json(record: &CharacterRecord) -> Result<()> {
    let json =
        serde_json::to_string_pretty(record).context("Failed to serialize character to JSON")?;
    println!("{}", json);
    Ok(())
}
