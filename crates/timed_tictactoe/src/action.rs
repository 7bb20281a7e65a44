//! First-class move records.
//!
//! Moves are domain events, not side effects. The controller records each
//! one with where it came from so a frontend can tell a timeout apart from a
//! deliberate click.

use super::ai::Strategy;
use super::{Player, Position};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

impl Move {
    /// Returns the player making this move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the position of this move.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -> {}", self.player, self.position.label())
    }
}

/// What caused a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveSource {
    /// The human placed it.
    Manual,
    /// The human's clock ran out and a random square was taken for them.
    Timeout,
    /// The decision engine chose it.
    Engine(Strategy),
}

/// A move together with its source, as kept in the match history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct MoveRecord {
    /// The move itself.
    pub action: Move,
    /// Why it was played.
    pub source: MoveSource,
}
