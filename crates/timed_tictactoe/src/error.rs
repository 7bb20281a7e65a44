//! Error types for the match controller and the decision engine.

use super::{MatchPhase, Outcome, Player, Position};

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IllegalMove {
    /// Row or column outside 0..=2.
    #[display("Cell ({}, {}) is off the board", row, col)]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    CellOccupied(Position),

    /// It's not this player's turn.
    #[display("It's not {:?}'s turn", _0)]
    NotYourTurn(Player),

    /// No match is being played.
    #[display("Moves are not accepted while the match is {}", _0)]
    NotInProgress(MatchPhase),
}

impl std::error::Error for IllegalMove {}

/// Lifecycle intents, named for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Intent {
    /// Start a match from the menu.
    #[display("start")]
    Start,
    /// Restart the current match.
    #[display("restart")]
    Restart,
    /// Return to the menu.
    #[display("return to menu")]
    ReturnToMenu,
}

/// The decision engine was handed a board it cannot move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum DecisionError {
    /// Every square is occupied.
    #[display("No empty square left to play")]
    BoardFull,

    /// The board already has a result.
    #[display("Board is already decided: {}", _0)]
    AlreadyDecided(Outcome),
}

impl std::error::Error for DecisionError {}

/// Error returned by [`MatchController`](crate::MatchController) intents.
///
/// Every rejection leaves the match state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MatchError {
    /// A move was rejected.
    #[display("Illegal move: {}", _0)]
    IllegalMove(IllegalMove),

    /// A lifecycle intent is not valid in the current phase.
    #[display("Cannot {} while the match is {}", intent, phase)]
    IllegalTransition {
        /// The rejected intent.
        intent: Intent,
        /// Phase at the time of the intent.
        phase: MatchPhase,
    },

    /// The decision engine refused the board.
    #[display("Decision engine failed: {}", _0)]
    Decision(DecisionError),
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchError::IllegalMove(e) => Some(e),
            MatchError::Decision(e) => Some(e),
            MatchError::IllegalTransition { .. } => None,
        }
    }
}

impl From<IllegalMove> for MatchError {
    fn from(err: IllegalMove) -> Self {
        MatchError::IllegalMove(err)
    }
}

impl From<DecisionError> for MatchError {
    fn from(err: DecisionError) -> Self {
        MatchError::Decision(err)
    }
}
