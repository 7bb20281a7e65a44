//! Headless matches against a scripted human.
//!
//! Time is synthetic: every step advances the controller by one 60 Hz frame,
//! so a hundred matches finish in well under a second of wall time.

use crate::cli::HumanStandIn;
use anyhow::{Result, bail};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::Duration;
use timed_tictactoe::{
    Difficulty, EngineConfig, MatchController, MatchPhase, Outcome, Player, TickEvent,
};
use tracing::{debug, info, instrument};

/// One frame at 60 Hz.
const FRAME: Duration = Duration::from_micros(16_667);

/// Frames after which a match is considered stuck.
const MAX_FRAMES: u32 = 60 * 60 * 5;

/// Human reaction times are drawn from this range, in seconds. The upper end
/// is past the default turn limit so some turns time out.
const REACTION_SECS: std::ops::Range<f64> = 0.5..12.0;

/// Results of a batch of matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Matches played.
    pub games: u64,
    /// Matches the human won.
    pub human_wins: u64,
    /// Matches the computer won.
    pub computer_wins: u64,
    /// Drawn matches.
    pub draws: u64,
    /// Human turns that ran out of time.
    pub timeouts: u64,
}

impl Tally {
    fn record(&mut self, outcome: Outcome) {
        self.games += 1;
        match outcome {
            Outcome::HumanWin => self.human_wins += 1,
            Outcome::ComputerWin => self.computer_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Ongoing => {}
        }
    }
}

/// Simulation parameters and results.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Computer difficulty.
    pub difficulty: Difficulty,
    /// Stand-in human behavior.
    pub human: HumanStandIn,
    /// Base seed; rerun with it to reproduce.
    pub seed: u64,
    /// Outcome counts.
    pub tally: Tally,
}

/// Plays the matches and prints the report.
pub fn run(
    config: EngineConfig,
    difficulty: Difficulty,
    games: u64,
    seed: Option<u64>,
    human: HumanStandIn,
    json: bool,
) -> Result<()> {
    let seed = seed.unwrap_or_else(rand::random);
    let report = simulate(&config, difficulty, games, seed, human)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let t = &report.tally;
        println!(
            "{} matches on {} against a {:?} human (seed {})",
            t.games, report.difficulty, report.human, report.seed
        );
        println!("  Human wins:    {}", t.human_wins);
        println!("  Computer wins: {}", t.computer_wins);
        println!("  Draws:         {}", t.draws);
        println!("  Timeouts:      {}", t.timeouts);
    }
    Ok(())
}

/// Plays `games` matches, each seeded from `seed` plus its index.
#[instrument(skip(config))]
pub fn simulate(
    config: &EngineConfig,
    difficulty: Difficulty,
    games: u64,
    seed: u64,
    human: HumanStandIn,
) -> Result<Report> {
    let mut tally = Tally::default();
    let mut human_rng = StdRng::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);

    for index in 0..games {
        let mut game = MatchController::seeded(config.clone(), seed.wrapping_add(index))?;
        game.start(difficulty)?;
        let (outcome, timeouts) = play_match(&mut game, human, &mut human_rng)?;
        debug!(index, %outcome, timeouts, "Simulated match finished");
        tally.record(outcome);
        tally.timeouts += timeouts;
    }

    info!(
        games = tally.games,
        human_wins = tally.human_wins,
        computer_wins = tally.computer_wins,
        draws = tally.draws,
        "Simulation complete"
    );
    Ok(Report {
        difficulty,
        human,
        seed,
        tally,
    })
}

/// Drives one match to the end, returning its outcome and timeout count.
fn play_match(
    game: &mut MatchController,
    human: HumanStandIn,
    rng: &mut StdRng,
) -> Result<(Outcome, u64)> {
    let mut timeouts = 0;
    let mut waited = Duration::ZERO;
    let mut reaction: Option<Duration> = None;

    for _ in 0..MAX_FRAMES {
        if game.phase() == MatchPhase::Over {
            return Ok((game.outcome(), timeouts));
        }

        if game.turn() == Player::Human && human == HumanStandIn::Random {
            let due = *reaction
                .get_or_insert_with(|| Duration::from_secs_f64(rng.gen_range(REACTION_SECS)));
            if waited >= due {
                if let Some(pos) = game.board().empty_cells().choose(rng).copied() {
                    game.place_human_move(pos.row(), pos.col())?;
                }
                waited = Duration::ZERO;
                reaction = None;
                continue;
            }
            waited += FRAME;
        }

        if let TickEvent::AutoMove(_) = game.tick(FRAME)? {
            timeouts += 1;
            waited = Duration::ZERO;
            reaction = None;
        }
    }

    bail!("Match did not finish within {} frames", MAX_FRAMES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_human_times_out_every_turn() {
        let report = simulate(
            &EngineConfig::default(),
            Difficulty::Hard,
            5,
            42,
            HumanStandIn::Idle,
        )
        .unwrap();
        let t = &report.tally;
        assert_eq!(t.games, 5);
        assert_eq!(t.human_wins + t.computer_wins + t.draws, 5);
        // The human places at least three marks in any finished match.
        assert!(t.timeouts >= 15);
    }

    #[test]
    fn test_random_human_totals_add_up() {
        let report = simulate(
            &EngineConfig::default(),
            Difficulty::Easy,
            10,
            7,
            HumanStandIn::Random,
        )
        .unwrap();
        let t = &report.tally;
        assert_eq!(t.games, 10);
        assert_eq!(t.human_wins + t.computer_wins + t.draws, 10);
    }

    #[test]
    fn test_same_seed_same_report() {
        let config = EngineConfig::default();
        let a = simulate(&config, Difficulty::Medium, 8, 99, HumanStandIn::Random).unwrap();
        let b = simulate(&config, Difficulty::Medium, 8, 99, HumanStandIn::Random).unwrap();
        assert_eq!(a.tally, b.tally);
    }

    #[test]
    fn test_report_serializes() {
        let report = simulate(
            &EngineConfig::default(),
            Difficulty::Easy,
            1,
            3,
            HumanStandIn::Idle,
        )
        .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["difficulty"], "easy");
        assert_eq!(json["human"], "idle");
        assert_eq!(json["tally"]["games"], 1);
    }
}
