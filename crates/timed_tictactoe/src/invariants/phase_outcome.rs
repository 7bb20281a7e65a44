//! Phase and outcome agree with each other and with the board.

use super::Invariant;
use crate::controller::MatchController;
use crate::MatchPhase;
use crate::rules::evaluate;
use rand::Rng;

/// Invariant: the phase is `Over` exactly when the outcome is decided, and
/// the stored outcome is what the board evaluates to.
pub struct PhaseOutcomeInvariant;

impl<R: Rng> Invariant<MatchController<R>> for PhaseOutcomeInvariant {
    fn holds(state: &MatchController<R>) -> bool {
        let over = state.phase() == MatchPhase::Over;
        over == state.outcome().is_terminal() && state.outcome() == evaluate(state.board())
    }

    fn description() -> &'static str {
        "Phase is Over exactly when the board is decided"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Difficulty, EngineConfig, Player, Position, Square};

    #[test]
    fn test_holds_while_undecided() {
        let mut c = MatchController::seeded(EngineConfig::default(), 5).unwrap();
        c.start(Difficulty::Hard).unwrap();
        for pos in [Position::TopLeft, Position::TopCenter] {
            c.board_mut().set(pos, Square::Occupied(Player::Human));
        }
        // Board edited directly, so only this invariant is meaningful here.
        assert!(PhaseOutcomeInvariant::holds(&c));
    }

    #[test]
    fn test_unnoticed_win_violates() {
        let mut c = MatchController::seeded(EngineConfig::default(), 5).unwrap();
        c.start(Difficulty::Hard).unwrap();
        for pos in [Position::TopLeft, Position::TopCenter, Position::TopRight] {
            c.board_mut().set(pos, Square::Occupied(Player::Human));
        }
        assert!(!PhaseOutcomeInvariant::holds(&c));
    }
}
