//! Draw detection: a sub-board with every child resolved.

use crate::board::RecursiveBoard;
use crate::types::Coord;
use tracing::instrument;

/// Checks whether every child of the depth-`depth` sub-board at `origin`
/// is resolved: leaves claimed, sub-boards won or drawn.
///
/// Called only after [`line_winner`](super::line_winner) found no line,
/// so a full sub-board is a draw.
#[instrument(skip(board))]
pub fn is_full(board: &RecursiveBoard, depth: usize, origin: usize) -> bool {
    let geometry = board.geometry();
    (0..geometry.children()).all(|index| {
        let child = geometry.child_origin(depth, origin, Coord::from_index(index, geometry.grid()));
        board.resolved_owner(depth + 1, child).is_some()
    })
}
