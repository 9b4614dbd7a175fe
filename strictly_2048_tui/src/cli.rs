//! Command-line interface for strictly_2048.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly 2048 - the sliding-tile puzzle in your terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_2048")]
#[command(about = "Play 2048 in the terminal or replay a move list", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML game config (defaults apply when absent)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Fixed RNG seed, overriding the config file
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Play {
        /// File that receives log output while the TUI owns the screen
        #[arg(long, default_value = "strictly_2048.log")]
        log_file: PathBuf,
    },

    /// Start a game, apply a comma-separated move list, print the final state as JSON
    Replay {
        /// Moves such as "left,up,right,down"
        #[arg(short, long)]
        moves: String,
    },
}
