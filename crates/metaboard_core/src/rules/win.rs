//! Line detection through the child that just changed.

use crate::board::RecursiveBoard;
use crate::types::{Cell, Coord};
use tracing::instrument;

/// Player who owns a full line through `changed` in the depth-`depth`
/// sub-board at `origin`.
///
/// Only the row, the column and (when `changed` lies on them) the two
/// diagonals through the changed child are tested; every other line was
/// already checked when its last child resolved. Drawn children break a
/// line.
#[instrument(skip(board))]
pub fn line_winner(board: &RecursiveBoard, depth: usize, origin: usize, changed: Coord) -> Option<Cell> {
    let grid = board.geometry().grid();
    let along = |coords: Vec<Coord>| common_owner(board, depth, origin, coords);

    along((0..grid).map(|col| Coord::new(changed.row, col)).collect())
        .or_else(|| along((0..grid).map(|row| Coord::new(row, changed.col)).collect()))
        .or_else(|| {
            (changed.row == changed.col)
                .then(|| along((0..grid).map(|i| Coord::new(i, i)).collect()))
                .flatten()
        })
        .or_else(|| {
            (changed.row + changed.col == grid - 1)
                .then(|| along((0..grid).map(|i| Coord::new(i, grid - 1 - i)).collect()))
                .flatten()
        })
}

/// The single positive owner shared by every child in `coords`.
fn common_owner(
    board: &RecursiveBoard,
    depth: usize,
    origin: usize,
    coords: impl IntoIterator<Item = Coord>,
) -> Option<Cell> {
    let geometry = board.geometry();
    let mut shared = None;
    for coord in coords {
        let child = geometry.child_origin(depth, origin, coord);
        let owner = board.resolved_owner(depth + 1, child).filter(|&o| o > 0)?;
        match shared {
            None => shared = Some(owner),
            Some(first) if first != owner => return None,
            Some(_) => {}
        }
    }
    shared
}
