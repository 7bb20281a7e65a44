//! History consistency: the move log explains the board exactly.

use super::Invariant;
use crate::controller::MatchController;
use crate::{Player, Square};
use rand::Rng;

/// Invariant: every recorded move's square holds that player's mark, there
/// are no unrecorded marks, and players alternate starting with the human.
pub struct HistoryConsistentInvariant;

impl<R: Rng> Invariant<MatchController<R>> for HistoryConsistentInvariant {
    fn holds(state: &MatchController<R>) -> bool {
        let history = state.history();
        let board = state.board();

        if history.len() != board.filled() {
            return false;
        }

        let marks_match = history.iter().all(|record| {
            board.get(record.action.position) == Square::Occupied(record.action.player)
        });

        let alternates = history.iter().enumerate().all(|(i, record)| {
            let expected = if i % 2 == 0 {
                Player::Human
            } else {
                Player::Computer
            };
            record.action.player == expected
        });

        marks_match && alternates
    }

    fn description() -> &'static str {
        "Move history matches the board and alternates from the human"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Difficulty, EngineConfig, Position};
    use std::time::Duration;

    #[test]
    fn test_holds_after_timeout_and_reply() {
        let mut c = MatchController::seeded(EngineConfig::default(), 21).unwrap();
        c.start(Difficulty::Easy).unwrap();
        c.tick(Duration::from_secs(10)).unwrap();
        c.tick(Duration::from_secs(3)).unwrap();
        assert_eq!(c.history().len(), 2);
        assert!(HistoryConsistentInvariant::holds(&c));
    }

    #[test]
    fn test_unrecorded_mark_violates() {
        let mut c = MatchController::seeded(EngineConfig::default(), 21).unwrap();
        c.start(Difficulty::Easy).unwrap();
        c.place_human_move(0, 1).unwrap();
        c.board_mut()
            .set(Position::BottomLeft, Square::Occupied(Player::Computer));
        assert!(!HistoryConsistentInvariant::holds(&c));
    }
}
