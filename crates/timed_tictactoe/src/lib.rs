//! Timed tic-tac-toe engine.
//!
//! A human plays X against a computer opponent on a 3x3 board. The human has
//! a fixed countdown per turn; when it expires a random square is played for
//! them. The computer waits out a thinking delay and then picks a square
//! through a difficulty-tiered cascade of heuristics, ending in minimax on
//! Hard.
//!
//! # Architecture
//!
//! - **Board & rules**: value-type [`Board`] and the pure [`rules::evaluate`]
//! - **Decision engine**: [`DecisionEngine`] in [`ai`]
//! - **Turn clock**: [`TurnClock`], advanced only by explicit ticks
//! - **Controller**: [`MatchController`], the single owner of match state
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use timed_tictactoe::{Difficulty, EngineConfig, MatchController, MatchPhase};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut game = MatchController::seeded(EngineConfig::default(), 7)?;
//! game.start(Difficulty::Hard)?;
//! game.place_human_move(0, 0)?;
//!
//! // The computer moves once its thinking delay has elapsed.
//! game.tick(Duration::from_secs(3))?;
//! assert_eq!(game.snapshot().move_count(), &2);
//! assert_eq!(game.phase(), MatchPhase::InProgress);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod ai;
mod clock;
mod config;
mod controller;
mod error;
pub mod invariants;
mod position;
pub mod rules;
mod types;

pub use action::{Move, MoveRecord, MoveSource};
pub use ai::{Decision, DecisionEngine, Strategy, decide};
pub use clock::{ClockSignal, TimerUrgency, TurnClock};
pub use config::{
    ConfigError, DEFAULT_EASY_RANDOM_RATE, DEFAULT_MEDIUM_RANDOM_RATE, DEFAULT_SEARCH_DEPTH,
    DEFAULT_THINKING_DELAY_SECS, DEFAULT_TURN_LIMIT_SECS, EngineConfig,
};
pub use controller::{MatchController, MatchSnapshot, TickEvent};
pub use error::{DecisionError, IllegalMove, Intent, MatchError};
pub use invariants::{Invariant, InvariantSet, InvariantViolation, MatchInvariants};
pub use position::Position;
pub use types::{Board, BoardParseError, Difficulty, MatchPhase, Outcome, Player, Square, Turn};
