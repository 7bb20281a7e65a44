//! Computer opponent: a difficulty-tiered decision cascade.
//!
//! Each difficulty walks the same ordered list of primitives and stops at
//! the first one that yields a square:
//!
//! 1. random square (Easy 70%, Medium 30%, Hard never)
//! 2. immediate win
//! 3. immediate block
//! 4. fork creation (Hard)
//! 5. fork denial (Hard)
//! 6. center
//! 7. random free corner
//! 8. random free side
//! 9. minimax with alpha-beta (Hard), else a random square

pub mod heuristics;
pub mod search;

use crate::config::{
    ConfigError, DEFAULT_EASY_RANDOM_RATE, DEFAULT_MEDIUM_RANDOM_RATE, DEFAULT_SEARCH_DEPTH,
    EngineConfig,
};
use crate::rules::evaluate;
use crate::{Board, DecisionError, Difficulty, Outcome, Player, Position};
use derive_getters::Getters;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Which step of the cascade produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// The randomization gate fired.
    Random,
    /// Completes a computer line.
    Win,
    /// Stops a human line.
    Block,
    /// Creates two computer threats at once.
    Fork,
    /// Takes the square the human would fork from.
    ForkDenial,
    /// Takes the center.
    Center,
    /// Takes a free corner.
    Corner,
    /// Takes a free side.
    Side,
    /// Chosen by minimax search.
    Search,
    /// Nothing else applied; a random square.
    Fallback,
}

/// A chosen square and the reason for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Decision {
    /// Square to play.
    position: Position,
    /// Cascade step that chose it.
    strategy: Strategy,
}

impl Decision {
    fn new(position: Position, strategy: Strategy) -> Self {
        Self { position, strategy }
    }
}

/// The computer player.
///
/// Holds only tunables; boards are passed in by reference and never
/// modified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionEngine {
    easy_random_rate: f64,
    medium_random_rate: f64,
    search_depth: u8,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self {
            easy_random_rate: DEFAULT_EASY_RANDOM_RATE,
            medium_random_rate: DEFAULT_MEDIUM_RANDOM_RATE,
            search_depth: DEFAULT_SEARCH_DEPTH,
        }
    }
}

impl DecisionEngine {
    /// Builds an engine from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation, so a random
    /// rate outside `[0, 1]` never reaches the RNG.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            easy_random_rate: *config.easy_random_rate(),
            medium_random_rate: *config.medium_random_rate(),
            search_depth: *config.search_depth(),
        })
    }

    /// Probability that `difficulty` plays a random square.
    pub fn random_rate(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => self.easy_random_rate,
            Difficulty::Medium => self.medium_random_rate,
            Difficulty::Hard => 0.0,
        }
    }

    /// Minimax depth cap in plies.
    pub fn search_depth(&self) -> u8 {
        self.search_depth
    }

    /// Chooses the computer's next square.
    ///
    /// # Errors
    ///
    /// The board must have an empty square and no result yet; otherwise a
    /// [`DecisionError`] is returned and nothing is guessed.
    #[instrument(skip(self, board, rng), fields(filled = board.filled()))]
    pub fn decide<R: Rng + ?Sized>(
        &self,
        board: &Board,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<Decision, DecisionError> {
        check_playable(board)?;

        let rate = self.random_rate(difficulty);
        if rate > 0.0 && rng.gen_bool(rate) {
            let position =
                heuristics::random_empty(board, rng).ok_or(DecisionError::BoardFull)?;
            debug!(%position, "Randomization gate fired");
            return Ok(Decision::new(position, Strategy::Random));
        }

        self.strategic_move(board, difficulty, rng)
    }

    /// Runs the cascade from the immediate-win step onward, skipping the
    /// randomization gate.
    ///
    /// # Errors
    ///
    /// Same preconditions as [`DecisionEngine::decide`].
    #[instrument(skip(self, board, rng))]
    pub fn strategic_move<R: Rng + ?Sized>(
        &self,
        board: &Board,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<Decision, DecisionError> {
        check_playable(board)?;

        let decision = self.cascade(board, difficulty, rng);
        debug!(
            position = %decision.position,
            strategy = ?decision.strategy,
            "Computer decided"
        );
        Ok(decision)
    }

    fn cascade<R: Rng + ?Sized>(
        &self,
        board: &Board,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Decision {
        if let Some(pos) = heuristics::find_winning_move(board, Player::Computer) {
            return Decision::new(pos, Strategy::Win);
        }

        if let Some(pos) = heuristics::find_blocking_move(board, Player::Computer) {
            return Decision::new(pos, Strategy::Block);
        }

        if difficulty.uses_forks() {
            if let Some(pos) = heuristics::find_fork_move(board, Player::Computer) {
                return Decision::new(pos, Strategy::Fork);
            }
            if let Some(pos) = heuristics::find_fork_move(board, Player::Human) {
                return Decision::new(pos, Strategy::ForkDenial);
            }
        }

        if let Some(pos) = heuristics::take_center(board) {
            return Decision::new(pos, Strategy::Center);
        }

        if let Some(pos) = heuristics::take_corner(board, rng) {
            return Decision::new(pos, Strategy::Corner);
        }

        if let Some(pos) = heuristics::take_side(board, rng) {
            return Decision::new(pos, Strategy::Side);
        }

        if difficulty == Difficulty::Hard {
            if let Some((pos, score)) = search::best_move(board, self.search_depth) {
                debug!(%pos, score, "Minimax fallback");
                return Decision::new(pos, Strategy::Search);
            }
        }

        // check_playable guarantees an empty square, and the center, corner
        // and side groups cover the whole board.
        let pos = heuristics::random_empty(board, rng).unwrap_or(Position::CENTER);
        Decision::new(pos, Strategy::Fallback)
    }
}

/// Chooses a move with the default tunables.
///
/// # Errors
///
/// See [`DecisionEngine::decide`].
pub fn decide<R: Rng + ?Sized>(
    board: &Board,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Decision, DecisionError> {
    DecisionEngine::default().decide(board, difficulty, rng)
}

fn check_playable(board: &Board) -> Result<(), DecisionError> {
    match evaluate(board) {
        Outcome::Ongoing => Ok(()),
        Outcome::Draw => Err(DecisionError::BoardFull),
        decided => Err(DecisionError::AlreadyDecided(decided)),
    }
}
