//! Timed Tic-Tac-Toe - terminal game and headless simulator.

#![warn(missing_docs)]

mod cli;
mod play;
mod simulate;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use std::sync::Arc;
use timed_tictactoe::EngineConfig;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info,timed_tictactoe=debug";

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            difficulty,
            config,
            log_file,
        } => {
            init_file_tracing(&log_file)?;
            let config = load_config(config.as_deref())?;
            play::run(config, difficulty)
        }
        Command::Simulate {
            difficulty,
            games,
            seed,
            human,
            config,
            json,
        } => {
            init_stderr_tracing();
            let config = load_config(config.as_deref())?;
            simulate::run(config, difficulty, games, seed, human, json)
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Logs to a file so the terminal UI is not overwritten.
fn init_file_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn init_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

#[instrument]
fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load engine config from {}", path.display())),
        None => {
            info!("No config file given, using defaults");
            Ok(EngineConfig::default())
        }
    }
}
