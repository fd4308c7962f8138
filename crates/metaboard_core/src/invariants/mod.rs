//! First-class invariants for the recursive board.
//!
//! Invariants are logical properties that must hold after every accepted
//! action. They are checked by move postconditions in debug builds and when
//! a board is rebuilt from a snapshot.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{description}")]
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

/// A set of invariants that can be checked together.
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

fn finish(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
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
        finish(violations)
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
        finish(violations)
    }
}

pub mod resolution_complete;
pub mod selection;
pub mod sentinel_pairing;

pub use resolution_complete::ResolutionCompleteInvariant;
pub use selection::SelectionInvariant;
pub use sentinel_pairing::SentinelPairingInvariant;

/// All board invariants as a composable set.
pub type BoardInvariants = (
    SentinelPairingInvariant,
    ResolutionCompleteInvariant,
    SelectionInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, RecursiveBoard};

    #[test]
    fn test_invariant_set_holds_for_empty_board() {
        let board = RecursiveBoard::standard();
        assert!(BoardInvariants::check_all(&board).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut board = RecursiveBoard::standard();
        board.select_child(1, 1).unwrap();
        board.apply_move(Player::FIRST, 0, 0).unwrap();
        assert!(BoardInvariants::check_all(&board).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut board = RecursiveBoard::standard();
        // Misaligned sentinel and an out-of-range selection.
        board.cells[5] = -1;
        board.selected_origin = 4;
        board.selected_depth = 1;

        let violations = BoardInvariants::check_all(&board).unwrap_err();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        let board = RecursiveBoard::classic();
        type TwoInvariants = (SentinelPairingInvariant, SelectionInvariant);
        assert!(TwoInvariants::check_all(&board).is_ok());
    }
}
