//! Development tasks for the character sheet workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{ListCharacters, LoadCatalog, ReadSheet};

/// Development tasks for the character sheet workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for character sheets", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Read a stored character and print its resolved sheet
    ReadSheet(ReadSheet),

    /// List stored characters
    ListCharacters(ListCharacters),

    /// Validate a RON catalog file
    LoadCatalog(LoadCatalog),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for SHEET_DATA_DIR and SHEET_CATALOG_PATH)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::ReadSheet(cmd) => cmd.execute(),
        Command::ListCharacters(cmd) => cmd.execute(),
        Command::LoadCatalog(cmd) => cmd.execute(),
    }
}

/// Logs go to stderr so command output stays pipeable. `RUST_LOG` overrides
/// the default `info` level.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
