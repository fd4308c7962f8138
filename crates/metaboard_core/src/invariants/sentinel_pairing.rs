//! Sentinel pairing: negative cells only at origins, always with an owner.

use super::Invariant;
use crate::board::RecursiveBoard;

/// Invariant: every negative cell reached by a skip-scan is the origin of a
/// sub-board of the depth it encodes, followed by a non-negative owner.
///
/// The scan skips the whole span of each collapsed sub-board, so stale
/// sentinels of sub-boards collapsed before their parent are ignored.
pub struct SentinelPairingInvariant;

impl Invariant<RecursiveBoard> for SentinelPairingInvariant {
    fn holds(board: &RecursiveBoard) -> bool {
        let geometry = board.geometry();
        let cells = board.cells();
        let mut index = 0;
        while index < cells.len() {
            let value = cells[index];
            if value >= 0 {
                index += 1;
                continue;
            }
            if value.unsigned_abs() as usize > geometry.depth() {
                return false;
            }
            let width = geometry.subtree_width(geometry.collapsed_depth(value));
            if index % width != 0 || cells.get(index + 1).is_none_or(|&owner| owner < 0) {
                return false;
            }
            index += width;
        }
        true
    }

    fn description() -> &'static str {
        "Negative cells sit at sub-board origins and are followed by an owner"
    }
}
