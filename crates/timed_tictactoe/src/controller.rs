//! Match controller: the state machine a frontend talks to.
//!
//! The controller owns the board, clock, difficulty, outcome, move history
//! and random source. Frontends send intents and read a [`MatchSnapshot`]
//! once per frame. Rejected intents leave every field untouched.

use super::action::{Move, MoveRecord, MoveSource};
use super::ai::{DecisionEngine, Strategy, heuristics};
use super::clock::{ClockSignal, TimerUrgency, TurnClock};
use super::config::{ConfigError, EngineConfig};
use super::error::{DecisionError, IllegalMove, Intent, MatchError};
use super::invariants::{InvariantSet, MatchInvariants};
use super::rules::evaluate;
use super::{Board, Difficulty, MatchPhase, Outcome, Player, Position, Turn};
use derive_getters::Getters;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// What a call to [`MatchController::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// No move was triggered.
    Idle,
    /// The human timed out and this move was played for them.
    AutoMove(Move),
    /// The computer finished thinking and played this move.
    ComputerMove(Move, Strategy),
}

/// Read-only view of a match for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
pub struct MatchSnapshot {
    /// Lifecycle phase.
    phase: MatchPhase,
    /// Chosen difficulty, `None` in the menu.
    difficulty: Option<Difficulty>,
    /// Board contents.
    board: Board,
    /// Side to move.
    turn: Turn,
    /// Current result.
    outcome: Outcome,
    /// Human countdown, `Some` only while the human is to move in a live match.
    human_time_remaining: Option<Duration>,
    /// True while the computer's thinking delay is running.
    is_computer_thinking: bool,
    /// Most recent move of the match.
    last_move: Option<MoveRecord>,
    /// Moves played this match.
    move_count: usize,
}

impl MatchSnapshot {
    /// Urgency of the human countdown, if one is running.
    pub fn urgency(&self) -> Option<TimerUrgency> {
        self.human_time_remaining.map(TimerUrgency::from_remaining)
    }

    /// Winning line for highlighting, once someone has won.
    pub fn winning_line(&self) -> Option<[Position; 3]> {
        super::rules::winning_line(&self.board).map(|(_, line)| line)
    }
}

/// Single owner of a match.
///
/// Generic over the random source so tests can inject a seeded RNG.
#[derive(Debug)]
pub struct MatchController<R: Rng = StdRng> {
    phase: MatchPhase,
    difficulty: Option<Difficulty>,
    board: Board,
    turn: Turn,
    outcome: Outcome,
    clock: TurnClock,
    history: Vec<MoveRecord>,
    config: EngineConfig,
    engine: DecisionEngine,
    rng: R,
}

impl MatchController<StdRng> {
    /// Creates a controller in the menu, seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    #[instrument(skip(config))]
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a controller whose random choices repeat for a given seed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    #[instrument(skip(config))]
    pub fn seeded(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MatchController<R> {
    /// Creates a controller in the menu with the given random source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn with_rng(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        info!("Creating MatchController");
        Ok(Self {
            phase: MatchPhase::Menu,
            difficulty: None,
            board: Board::new(),
            turn: Turn::Human,
            outcome: Outcome::Ongoing,
            clock: TurnClock::from_config(&config),
            history: Vec::new(),
            engine: DecisionEngine::from_config(&config)?,
            config,
            rng,
        })
    }

    /// Starts a match at `difficulty` with an empty board and the human to move.
    ///
    /// # Errors
    ///
    /// [`MatchError::IllegalTransition`] unless the controller is in the menu.
    #[instrument(skip(self))]
    pub fn start(&mut self, difficulty: Difficulty) -> Result<(), MatchError> {
        if self.phase != MatchPhase::Menu {
            warn!(phase = %self.phase, "Start rejected");
            return Err(MatchError::IllegalTransition {
                intent: Intent::Start,
                phase: self.phase,
            });
        }
        self.reset_match();
        self.difficulty = Some(difficulty);
        self.phase = MatchPhase::InProgress;
        info!(%difficulty, "Match started");
        Ok(())
    }

    /// Places the human's mark at `(row, col)`.
    ///
    /// Checks run in order: bounds, phase, turn, then occupancy.
    /// Returns the outcome after the move.
    ///
    /// # Errors
    ///
    /// [`MatchError::IllegalMove`] naming the first failed check.
    #[instrument(skip(self))]
    pub fn place_human_move(&mut self, row: usize, col: usize) -> Result<Outcome, MatchError> {
        let position = Position::from_row_col(row, col).ok_or_else(|| {
            warn!(row, col, "Move off the board");
            IllegalMove::OutOfBounds { row, col }
        })?;

        if self.phase != MatchPhase::InProgress {
            warn!(phase = %self.phase, "Move outside a live match");
            return Err(IllegalMove::NotInProgress(self.phase).into());
        }

        if self.turn != Player::Human {
            warn!(%position, "Human moved out of turn");
            return Err(IllegalMove::NotYourTurn(Player::Human).into());
        }

        if !self.board.is_empty(position) {
            warn!(%position, "Square already taken");
            return Err(IllegalMove::CellOccupied(position).into());
        }

        self.apply_move(Move::new(Player::Human, position), MoveSource::Manual)
    }

    /// Replays the current difficulty from an empty board.
    ///
    /// # Errors
    ///
    /// [`MatchError::IllegalTransition`] from the menu, where no difficulty
    /// has been chosen.
    #[instrument(skip(self))]
    pub fn restart(&mut self) -> Result<(), MatchError> {
        if self.phase == MatchPhase::Menu {
            warn!("Restart rejected in menu");
            return Err(MatchError::IllegalTransition {
                intent: Intent::Restart,
                phase: self.phase,
            });
        }
        self.reset_match();
        self.phase = MatchPhase::InProgress;
        info!(difficulty = ?self.difficulty, "Match restarted");
        Ok(())
    }

    /// Abandons any match and goes back to the menu. Legal in every phase.
    #[instrument(skip(self))]
    pub fn return_to_menu(&mut self) {
        self.reset_match();
        self.difficulty = None;
        self.phase = MatchPhase::Menu;
        info!("Returned to menu");
    }

    /// Advances the clock by `delta` and plays any move that became due.
    ///
    /// Outside a live match this is a no-op returning [`TickEvent::Idle`].
    ///
    /// # Errors
    ///
    /// [`MatchError::Decision`] if the decision engine refuses the board,
    /// which only happens if the match state is already inconsistent.
    pub fn tick(&mut self, delta: Duration) -> Result<TickEvent, MatchError> {
        if self.phase != MatchPhase::InProgress {
            return Ok(TickEvent::Idle);
        }

        match self.clock.advance(delta) {
            ClockSignal::Pending => Ok(TickEvent::Idle),
            ClockSignal::HumanTimedOut => {
                let position = heuristics::random_empty(&self.board, &mut self.rng)
                    .ok_or(DecisionError::BoardFull)?;
                let action = Move::new(Player::Human, position);
                info!(%position, "Human timed out, auto-move played");
                self.apply_move(action, MoveSource::Timeout)?;
                Ok(TickEvent::AutoMove(action))
            }
            ClockSignal::ComputerReady => {
                let Some(difficulty) = self.difficulty else {
                    warn!("Computer turn without a difficulty");
                    return Ok(TickEvent::Idle);
                };
                let decision = self.engine.decide(&self.board, difficulty, &mut self.rng)?;
                let action = Move::new(Player::Computer, *decision.position());
                self.apply_move(action, MoveSource::Engine(*decision.strategy()))?;
                Ok(TickEvent::ComputerMove(action, *decision.strategy()))
            }
        }
    }

    /// Current state for rendering.
    pub fn snapshot(&self) -> MatchSnapshot {
        let live = self.phase == MatchPhase::InProgress;
        MatchSnapshot {
            phase: self.phase,
            difficulty: self.difficulty,
            board: self.board,
            turn: self.turn,
            outcome: self.outcome,
            human_time_remaining: if live {
                self.clock.human_time_remaining()
            } else {
                None
            },
            is_computer_thinking: live && self.turn == Player::Computer,
            last_move: self.history.last().copied(),
            move_count: self.history.len(),
        }
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Chosen difficulty, `None` in the menu.
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// The board. Only the controller can change it.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move.
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Current result.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Moves played this match, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// The turn clock.
    pub fn clock(&self) -> &TurnClock {
        &self.clock
    }

    /// Configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn reset_match(&mut self) {
        self.board = Board::new();
        self.turn = Player::Human;
        self.outcome = Outcome::Ongoing;
        self.history.clear();
        self.clock.reset(Player::Human);
    }

    /// Applies a validated move, evaluates the board and hands over the turn.
    fn apply_move(&mut self, action: Move, source: MoveSource) -> Result<Outcome, MatchError> {
        self.board.place(action.position, action.player)?;
        self.history.push(MoveRecord::new(action, source));
        debug!(%action, ?source, "Move applied");

        self.outcome = evaluate(&self.board);
        if self.outcome.is_terminal() {
            self.phase = MatchPhase::Over;
            info!(outcome = %self.outcome, moves = self.history.len(), "Match over");
        } else {
            self.turn = self.turn.opponent();
            self.clock.reset(self.turn);
        }

        if cfg!(debug_assertions) {
            let checked = MatchInvariants::check_all(self);
            if let Err(violations) = &checked {
                warn!(?violations, "Match invariants violated");
            }
            debug_assert!(checked.is_ok(), "Match invariants violated: {:?}", checked);
        }

        Ok(self.outcome)
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
