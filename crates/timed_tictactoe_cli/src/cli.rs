//! Command-line interface for timed tic-tac-toe.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use timed_tictactoe::Difficulty;

/// Timed Tic-Tac-Toe - beat the computer before your clock runs out
#[derive(Parser, Debug)]
#[command(name = "timed-tictactoe")]
#[command(about = "Tic-tac-toe against the computer with a per-turn clock", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Skip the menu and start at this difficulty (easy, medium, hard)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Engine configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Where to write logs while the screen is in use
        #[arg(long, default_value = "timed_tictactoe.log")]
        log_file: PathBuf,
    },

    /// Play matches headlessly against a scripted human and report results
    Simulate {
        /// Computer difficulty (easy, medium, hard)
        #[arg(short, long, default_value = "medium")]
        difficulty: Difficulty,

        /// Number of matches to play
        #[arg(short = 'n', long, default_value = "100")]
        games: u64,

        /// Base seed; random if omitted
        #[arg(long)]
        seed: Option<u64>,

        /// How the stand-in human behaves
        #[arg(long, value_enum, default_value = "random")]
        human: HumanStandIn,

        /// Engine configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Scripted behavior for the human side of a simulation.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HumanStandIn {
    /// Never moves; every human turn times out.
    Idle,
    /// Waits a random reaction time, then plays a random empty square.
    Random,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play_with_difficulty() {
        let cli = Cli::try_parse_from(["timed-tictactoe", "play", "--difficulty", "hard"]).unwrap();
        match cli.command {
            Command::Play {
                difficulty,
                config,
                log_file,
            } => {
                assert_eq!(difficulty, Some(Difficulty::Hard));
                assert!(config.is_none());
                assert_eq!(log_file, PathBuf::from("timed_tictactoe.log"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_simulate_defaults() {
        let cli = Cli::try_parse_from(["timed-tictactoe", "simulate"]).unwrap();
        match cli.command {
            Command::Simulate {
                difficulty,
                games,
                seed,
                human,
                json,
                ..
            } => {
                assert_eq!(difficulty, Difficulty::Medium);
                assert_eq!(games, 100);
                assert_eq!(seed, None);
                assert_eq!(human, HumanStandIn::Random);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_difficulty() {
        assert!(
            Cli::try_parse_from(["timed-tictactoe", "simulate", "-d", "impossible"]).is_err()
        );
    }
}
