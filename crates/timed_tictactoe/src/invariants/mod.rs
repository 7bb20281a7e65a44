//! Match invariants as first-class values.
//!
//! Each invariant is a zero-sized type implementing [`Invariant`]; tuples of
//! them form an [`InvariantSet`] that reports every violation at once. The
//! controller checks [`MatchInvariants`] after each applied move in debug
//! builds, and tests check them directly.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
///
/// Implemented for tuples of [`Invariant`]s.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check_one<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn into_result(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        into_result(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        check_one::<S, I3>(state, &mut violations);
        into_result(violations)
    }
}

pub mod history_consistent;
pub mod mark_balance;
pub mod phase_outcome;

pub use history_consistent::HistoryConsistentInvariant;
pub use mark_balance::MarkBalanceInvariant;
pub use phase_outcome::PhaseOutcomeInvariant;

/// Every match invariant as one set.
pub type MatchInvariants = (
    MarkBalanceInvariant,
    HistoryConsistentInvariant,
    PhaseOutcomeInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::MatchController;
    use crate::{Difficulty, EngineConfig, Player, Position, Square};
    use std::time::Duration;

    fn started() -> MatchController {
        let mut c = MatchController::seeded(EngineConfig::default(), 11).unwrap();
        c.start(Difficulty::Hard).unwrap();
        c
    }

    #[test]
    fn test_set_holds_in_menu() {
        let c = MatchController::seeded(EngineConfig::default(), 11).unwrap();
        assert!(MatchInvariants::check_all(&c).is_ok());
    }

    #[test]
    fn test_set_holds_after_exchange() {
        let mut c = started();
        c.place_human_move(0, 0).unwrap();
        c.tick(Duration::from_secs(3)).unwrap();
        assert_eq!(c.history().len(), 2);
        assert!(MatchInvariants::check_all(&c).is_ok());
    }

    #[test]
    fn test_set_reports_every_violation() {
        let mut c = started();
        c.place_human_move(1, 1).unwrap();
        // An unrecorded human mark breaks balance and history at once.
        c.board_mut()
            .set(Position::TopLeft, Square::Occupied(Player::Human));
        let violations = MatchInvariants::check_all(&c).unwrap_err();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type Pair = (MarkBalanceInvariant, PhaseOutcomeInvariant);
        assert!(Pair::check_all(&started()).is_ok());
    }
}
