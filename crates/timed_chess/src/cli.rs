//! Command-line interface for timed_chess.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Timed Chess - same-device chess table with a per-turn countdown
#[derive(Parser, Debug)]
#[command(name = "timed_chess")]
#[command(about = "Two-player chess table with a turn clock", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a session in the terminal, reading moves from stdin
    Play {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seconds per turn (overrides the config file)
        #[arg(long)]
        turn_seconds: Option<u32>,

        /// Print events as JSON lines instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the starting position and exit
    Board,
}
