//! Command-line interface for strictly_avalon.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Avalon - hidden-role game engine and simulator
#[derive(Parser, Debug)]
#[command(name = "strictly_avalon")]
#[command(about = "Avalon game engine with headless simulations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one game with random agents and print the events
    Simulate {
        /// Path to a game config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of players when no config is given
        #[arg(short, long, default_value = "5")]
        players: usize,

        /// Seed for roles and agents (overrides the config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the final state summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the canonical roles and mission table for a player count
    Roles {
        /// Number of players
        #[arg(short, long, default_value = "5")]
        players: usize,
    },
}
