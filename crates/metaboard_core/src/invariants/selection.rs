//! Selection invariant: the cursor points at a playable sub-board.

use super::Invariant;
use crate::board::RecursiveBoard;

/// Invariant: the selection names an aligned sub-board above the leaves,
/// and while the game is in progress that sub-board is unresolved.
pub struct SelectionInvariant;

impl Invariant<RecursiveBoard> for SelectionInvariant {
    fn holds(board: &RecursiveBoard) -> bool {
        let geometry = board.geometry();
        let (depth, origin) = board.selection();
        if depth >= geometry.depth() || origin >= geometry.leaf_count() {
            return false;
        }
        if origin % geometry.subtree_width(depth) != 0 {
            return false;
        }
        board.board_result().is_over() || !board.is_resolved(depth, origin)
    }

    fn description() -> &'static str {
        "Selection is an aligned, unresolved sub-board"
    }
}
