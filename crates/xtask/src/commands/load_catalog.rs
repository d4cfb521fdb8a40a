//! Validate a RON catalog and print what it defines

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use sheet_content::CatalogLoader;

/// Validate a RON catalog file
#[derive(Parser)]
pub struct LoadCatalog {
    /// Catalog file to check
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Print every definition, not just counts
    #[arg(short, long)]
    verbose: bool,
}

impl LoadCatalog {
    pub fn execute(self) -> Result<()> {
        let catalog = CatalogLoader::load(&self.path)
            .with_context(|| format!("Invalid catalog: {}", self.path.display()))?;

        tracing::info!("Loaded {} definitions", catalog.len());

        println!("{} {}", style("✓ Catalog OK:").bold().green(), self.path.display());
        println!("  Items:      {}", catalog.items.len());
        println!("  Properties: {}", catalog.properties.len());
        println!("  Skills:     {}", catalog.skills.len());
        println!("  Spells:     {}", catalog.spells.len());

        if self.verbose {
            println!();
            println!("{}", style("Items:").bold().yellow());
            for item in &catalog.items {
                let properties: Vec<_> = catalog
                    .properties_of(item)
                    .map(|property| property.name.as_str())
                    .collect();
                println!("  {} {} [{}]", item.id, item.name, properties.join(", "));
            }

            println!("{}", style("Skills:").bold().yellow());
            for skill in &catalog.skills {
                let uses = skill.max_uses.map_or_else(
                    || "passive".to_string(),
                    |max| format!("{} / {}", max, skill.reset_on),
                );
                println!("  {} {} ({})", skill.id, skill.name, uses);
            }

            println!("{}", style("Spells:").bold().yellow());
            for spell in &catalog.spells {
                println!("  {} {} (level {})", spell.id, spell.name, spell.level);
            }
        }

        Ok(())
    }
}
