//! Mark balance: the human moves first, so X count leads O count by 0 or 1.

use super::Invariant;
use crate::controller::MatchController;
use crate::{MatchPhase, Player};
use rand::Rng;

/// Invariant: human marks minus computer marks is 0 or 1, and during a live
/// match the side to move agrees with that difference.
pub struct MarkBalanceInvariant;

impl<R: Rng> Invariant<MatchController<R>> for MarkBalanceInvariant {
    fn holds(state: &MatchController<R>) -> bool {
        let board = state.board();
        let human = board.count(Player::Human);
        let computer = board.count(Player::Computer);

        let diff = match human.checked_sub(computer) {
            Some(diff @ (0 | 1)) => diff,
            _ => return false,
        };

        if state.phase() != MatchPhase::InProgress {
            return true;
        }

        let expected = if diff == 0 {
            Player::Human
        } else {
            Player::Computer
        };
        state.turn() == expected
    }

    fn description() -> &'static str {
        "Human marks lead computer marks by 0 or 1, matching the side to move"
    }
}
