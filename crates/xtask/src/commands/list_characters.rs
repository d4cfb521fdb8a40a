//! List characters stored in the data directory

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use sheet_store::{CharacterStore, FileCharacterStore};

use crate::dirs;

/// List stored characters
#[derive(Parser)]
pub struct ListCharacters {
    /// Custom data directory (defaults to SHEET_DATA_DIR or the platform location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl ListCharacters {
    pub fn execute(self) -> Result<()> {
        let data_dir = dirs::data_dir(self.data_dir);
        if !data_dir.exists() {
            println!(
                "{} {}",
                style("No characters yet:").dim(),
                data_dir.display()
            );
            return Ok(());
        }

        let store = FileCharacterStore::new(&data_dir)
            .with_context(|| format!("Failed to open data directory: {}", data_dir.display()))?;
        let records = store.list().context("Failed to read characters")?;

        println!(
            "{} {}",
            style("Data Directory:").bold().cyan(),
            data_dir.display()
        );
        println!("{} {}", style("Characters:").bold().cyan(), records.len());
        println!();

        for record in &records {
            let summary = record.summary();
            println!(
                "  {:>4}  {:<24} L{:<3} {} {}  {}",
                summary.id,
                summary.name,
                summary.level,
                summary.race,
                summary.class_name,
                style(format!("owner {}", record.owner)).dim()
            );
        }

        Ok(())
    }
}
