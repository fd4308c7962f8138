//! Resolution completeness: no open sub-board is secretly finished.

use super::Invariant;
use crate::board::RecursiveBoard;
use crate::rules;
use crate::types::Coord;

/// Invariant: every sub-board that is not collapsed (and not inside a
/// collapsed ancestor) has no completed line and at least one open child.
pub struct ResolutionCompleteInvariant;

impl ResolutionCompleteInvariant {
    fn open_subtree_holds(board: &RecursiveBoard, depth: usize, origin: usize) -> bool {
        let geometry = board.geometry();
        if depth == geometry.depth() || board.is_collapsed(depth, origin) {
            return true;
        }
        let grid = geometry.grid();
        // (i, i) covers row i, column i and the main diagonal; the
        // top-right corner covers the anti-diagonal.
        let probes = (0..grid).map(|i| Coord::new(i, i)).chain([Coord::new(0, grid - 1)]);
        for probe in probes {
            if rules::line_winner(board, depth, origin, probe).is_some() {
                return false;
            }
        }
        if rules::is_full(board, depth, origin) {
            return false;
        }
        (0..geometry.children()).all(|index| {
            let child = geometry.child_origin(depth, origin, Coord::from_index(index, grid));
            Self::open_subtree_holds(board, depth + 1, child)
        })
    }
}

impl Invariant<RecursiveBoard> for ResolutionCompleteInvariant {
    fn holds(board: &RecursiveBoard) -> bool {
        Self::open_subtree_holds(board, 0, 0)
    }

    fn description() -> &'static str {
        "Open sub-boards have no completed line and an open child"
    }
}
