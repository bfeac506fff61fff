//! Timed Chess - unified CLI.

use anyhow::{Context, Result};
use clap::Parser;
use timed_chess::{AppConfig, Cli, Command, TerminalApp};
use timed_chess_core::Board;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            turn_seconds,
            json,
        } => run_play(config, turn_seconds, json).await,
        Command::Board => {
            println!("{}", Board::new().display());
            Ok(())
        }
    }
}

/// Run a terminal session
#[instrument]
async fn run_play(
    config: Option<std::path::PathBuf>,
    turn_seconds: Option<u32>,
    json: bool,
) -> Result<()> {
    let config = match config {
        Some(path) => AppConfig::from_file(&path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => AppConfig::default(),
    }
    .with_overrides(turn_seconds, json)?;

    let summary = TerminalApp::new(&config).run().await?;
    info!(?summary, "Session finished");
    println!(
        "Session {}: {} moves, {} captures, {} turns lost to the clock",
        summary.id, summary.moves, summary.captures, summary.expiries
    );
    Ok(())
}
