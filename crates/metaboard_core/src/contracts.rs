//! Contract-based validation for board actions.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P} action {Q}`. Preconditions are always checked and turn into
//! rejections; postconditions run in debug builds only.

use crate::action::{Move, MoveError, SelectError};
use crate::board::RecursiveBoard;
use crate::invariants::{BoardInvariants, InvariantSet, InvariantViolation};
use crate::types::Coord;
use tracing::{instrument, warn};

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Rejection produced when a precondition fails.
    type Error;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), Self::Error>;

    /// Checks that the transition from `before` to `after` kept the
    /// system's guarantees.
    fn post(before: &S, action: &A, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Move contract
// ─────────────────────────────────────────────────────────────

/// Contract for placing a mark.
///
/// Preconditions:
/// - The root is unresolved
/// - The target leaf is empty
///
/// Postconditions:
/// - Only the played leaf and the origin pairs of its ancestors changed
/// - The played leaf holds the mover's mark (unless a collapse reused it)
/// - All board invariants hold
pub struct MoveContract;

impl Contract<RecursiveBoard, Move> for MoveContract {
    type Error = MoveError;

    #[instrument(skip(board))]
    fn pre(board: &RecursiveBoard, action: &Move) -> Result<(), MoveError> {
        if board.board_result().is_over() {
            return Err(MoveError::GameOver);
        }
        let leaf = target(board, action.coord);
        if board.raw_value(leaf) != 0 {
            return Err(MoveError::SquareOccupied(leaf));
        }
        Ok(())
    }

    fn post(before: &RecursiveBoard, action: &Move, after: &RecursiveBoard) -> Result<(), Vec<InvariantViolation>> {
        let geometry = before.geometry();
        let leaf = target(before, action.coord);
        let mut touched: Vec<usize> = (0..geometry.depth())
            .map(|depth| geometry.origin_at(depth, leaf))
            .flat_map(|origin| [origin, origin + 1])
            .chain([leaf])
            .collect();
        touched.sort_unstable();
        touched.dedup();

        let mut violations = Vec::new();
        let stray = before
            .cells()
            .iter()
            .zip(after.cells())
            .enumerate()
            .filter(|(index, (old, new))| old != new && touched.binary_search(index).is_err())
            .count();
        if stray > 0 {
            warn!(stray, leaf, "Move changed cells outside its origin pairs");
            violations.push(InvariantViolation::new(
                "Only the played leaf and ancestor origin pairs change",
            ));
        }

        let reused = (0..geometry.depth()).any(|depth| {
            let origin = geometry.origin_at(depth, leaf);
            leaf == origin || leaf == origin + 1
        });
        if !reused && after.raw_value(leaf) != action.player.cell() {
            violations.push(InvariantViolation::new("Played leaf holds the mover's mark"));
        }

        if let Err(mut broken) = BoardInvariants::check_all(after) {
            violations.append(&mut broken);
        }

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

// ─────────────────────────────────────────────────────────────
//  Select contract
// ─────────────────────────────────────────────────────────────

/// Contract for drilling into a child sub-board.
///
/// Preconditions:
/// - The root is unresolved
/// - The child is unresolved
///
/// Postconditions:
/// - Cells are untouched
/// - The selection moved exactly one level down, onto the child
pub struct SelectContract;

impl Contract<RecursiveBoard, Coord> for SelectContract {
    type Error = SelectError;

    #[instrument(skip(board))]
    fn pre(board: &RecursiveBoard, coord: &Coord) -> Result<(), SelectError> {
        if board.board_result().is_over() {
            return Err(SelectError::GameOver);
        }
        let child = target(board, *coord);
        if board.is_resolved(board.selected_depth() + 1, child) {
            return Err(SelectError::AlreadyResolved(child));
        }
        Ok(())
    }

    fn post(before: &RecursiveBoard, coord: &Coord, after: &RecursiveBoard) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if before.cells() != after.cells() {
            violations.push(InvariantViolation::new("Selection leaves cells untouched"));
        }
        let expected = (before.selected_depth() + 1, target(before, *coord));
        if after.selection() != expected {
            violations.push(InvariantViolation::new("Selection descends onto the chosen child"));
        }
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

/// Flat origin of the child at `coord` of the current selection.
fn target(board: &RecursiveBoard, coord: Coord) -> usize {
    let (depth, origin) = board.selection();
    board.geometry().child_origin(depth, origin, coord)
}
