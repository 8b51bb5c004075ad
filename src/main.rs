//! Strictly Avalon - CLI
//!
//! Runs headless simulations and prints rule tables.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use strictly_avalon::{
    Agent, GameConfig, GameEvent, Orchestrator, canonical_roles, evil_count, mission_configs,
};
use tokio::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Simulate {
            config,
            players,
            seed,
            json,
        } => run_simulation(config, players, seed, json).await,
        Command::Roles { players } => print_roles(players),
    }
}

/// Plays one game with random agents.
#[instrument]
async fn run_simulation(
    config: Option<PathBuf>,
    players: usize,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut config = match config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::for_players(players),
    };
    if seed.is_some() {
        config = config.with_seed(seed);
    }

    let game = config.build_game()?;
    let agents: Vec<Box<dyn Agent>> = config
        .build_agents()
        .into_iter()
        .map(|agent| Box::new(agent) as Box<dyn Agent>)
        .collect();

    let names: Vec<String> = game.players().iter().map(|p| p.name().clone()).collect();
    for player in game.players() {
        info!(seat = player.id(), name = %player.name(), role = %player.role(), "Seated");
    }

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            println!("{}", describe(&event, &names));
        }
    });

    let mut orchestrator =
        Orchestrator::new(game, agents, event_tx)?.with_max_steps(*config.max_steps());
    let winner = orchestrator.run().await?;
    let game = orchestrator.into_game();
    printer.await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&game.get_state_summary(None)?)?);
    }
    info!(%winner, "Simulation finished");
    Ok(())
}

fn describe(event: &GameEvent, names: &[String]) -> String {
    let name = |seat: &usize| names.get(*seat).map(String::as_str).unwrap_or("?");
    match event {
        GameEvent::TeamProposed { round, leader, members } => {
            let team: Vec<&str> = members.iter().map(name).collect();
            format!("Round {round}: {} proposes {}", name(leader), team.join(", "))
        }
        GameEvent::VoteResolved(resolution) => format!("  vote: {resolution:?}"),
        GameEvent::MissionCompleted {
            round,
            success,
            fail_count,
        } => format!(
            "Mission {round} {} ({fail_count} fail cards)",
            if *success { "succeeded" } else { "failed" }
        ),
        GameEvent::Assassinated { target } => format!("Assassin strikes {}", name(target)),
        GameEvent::GameOver { winner } => format!("{winner} wins"),
    }
}

/// Prints the rule tables for one table size.
fn print_roles(players: usize) -> Result<()> {
    let roles = canonical_roles(players)?;
    println!("{players} players, {} evil", evil_count(players)?);
    for role in roles {
        println!(
            "  {:<10} {:<5} {}",
            role.to_string(),
            role.team().to_string(),
            role.spec().description
        );
    }
    println!("Missions:");
    for config in mission_configs(players)? {
        println!(
            "  round {}: team of {}, fails on {}",
            config.round_number, config.team_size, config.fails_needed
        );
    }
    Ok(())
}
