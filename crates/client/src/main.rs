//! Arsenal command-line client.
//!
//! Composition root: loads configuration, builds the arsenal (built-in presets
//! or a RON file) and dispatches to one of the commands.
//!
//! # Examples
//!
//! ```bash
//! # Rank every weapon for one situation
//! arsenal score --distance 40 --ammo "Rocket Launcher=80" --ammo "Sniper Rifle=20" --ammo Pistol=60
//!
//! # Inspect the loaded rule matrices
//! arsenal --arsenal my_weapons.ron rules
//! ```

mod commands;
mod config;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use commands::{Interactive, Rules, Score, Terms};
use config::ClientConfig;

/// Fuzzy weapon selection for NPCs
#[derive(Parser)]
#[command(name = "arsenal")]
#[command(about = "Fuzzy weapon selection for NPCs", long_about = None)]
#[command(version)]
struct Cli {
    /// Arsenal definition (RON) replacing the built-in weapons
    #[arg(long, global = true, value_name = "FILE")]
    arsenal: Option<PathBuf>,

    /// Engine settings (TOML) overriding the arsenal's own
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Score every weapon for one combat situation
    Score(Score),

    /// List every variable and term of each weapon
    Terms(Terms),

    /// Print each weapon's rule matrix
    Rules(Rules),

    /// Menu-driven scenario entry
    Interactive(Interactive),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env().with_overrides(cli.arsenal, cli.config);
    let arsenal = config.load_arsenal()?;
    tracing::debug!("Loaded arsenal with {} weapons", arsenal.len());

    match cli.command {
        Command::Score(cmd) => cmd.execute(arsenal).await,
        Command::Terms(cmd) => cmd.execute(&arsenal),
        Command::Rules(cmd) => cmd.execute(&arsenal),
        Command::Interactive(cmd) => cmd.execute(arsenal),
    }
}
