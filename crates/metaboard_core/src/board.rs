//! The recursive board-state engine.
//!
//! All state lives in one flat array of `(G²)^D` cells. A won or drawn
//! sub-board at depth `k` is collapsed by overwriting exactly two cells of
//! its span: the origin receives the sentinel `-(D-k)` and the next cell
//! receives the owner (`0` for a draw). Every other leaf in the span keeps
//! its historical value, so scans that meet a negative cell must skip the
//! whole span of the collapsed sub-board.

use crate::action::{Move, MoveError, SelectError};
use crate::contracts::{Contract, MoveContract, SelectContract};
use crate::geometry::Geometry;
use crate::rules;
use crate::types::{Cell, Coord, GameStatus, Player};
use tracing::{debug, info, instrument};

/// An N-level nested tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecursiveBoard {
    pub(crate) geometry: Geometry,
    pub(crate) cells: Vec<Cell>,
    pub(crate) selected_depth: usize,
    pub(crate) selected_origin: usize,
}

// ─────────────────────────────────────────────────────────────
//  Construction
// ─────────────────────────────────────────────────────────────

impl RecursiveBoard {
    /// Creates an empty board with the root selected.
    #[instrument]
    pub fn new(geometry: Geometry) -> Self {
        debug!(leaves = geometry.leaf_count(), "Creating recursive board");
        Self {
            geometry,
            cells: vec![0; geometry.leaf_count()],
            selected_depth: 0,
            selected_origin: 0,
        }
    }

    /// Empty 3×3 board of 3×3 boards.
    pub fn standard() -> Self {
        Self::new(Geometry::standard())
    }

    /// Empty plain tic-tac-toe board.
    pub fn classic() -> Self {
        Self::new(Geometry::classic())
    }
}

impl Default for RecursiveBoard {
    fn default() -> Self {
        Self::standard()
    }
}

// ─────────────────────────────────────────────────────────────
//  Queries
// ─────────────────────────────────────────────────────────────

impl RecursiveBoard {
    /// Grid side and depth of this board.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// The whole cell array.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Direct read of `cell[index]`.
    pub fn raw_value(&self, index: usize) -> Cell {
        self.cells[index]
    }

    /// Owner of a position, looking through a collapse sentinel.
    ///
    /// `0` means empty or drawn, a positive value is a player id.
    pub fn effective_owner(&self, index: usize) -> Cell {
        match self.cells[index] {
            sentinel if sentinel < 0 => self.cells[index + 1],
            value => value,
        }
    }

    /// Which child of its depth-`depth` ancestor the leaf `index` falls under.
    pub fn position_within(&self, depth: usize, index: usize) -> Coord {
        self.geometry.position_within(depth, index)
    }

    /// Outcome of the root board.
    pub fn board_result(&self) -> GameStatus {
        if self.cells[0] == self.geometry.sentinel(0) {
            GameStatus::from_owner(self.cells[1])
        } else {
            GameStatus::InProgress
        }
    }

    /// Depth of the selected sub-board.
    pub fn selected_depth(&self) -> usize {
        self.selected_depth
    }

    /// First leaf of the selected sub-board.
    pub fn selected_origin(&self) -> usize {
        self.selected_origin
    }

    /// `(selected_depth, selected_origin)`.
    pub fn selection(&self) -> (usize, usize) {
        (self.selected_depth, self.selected_origin)
    }

    /// True when the selected sub-board's children are leaves.
    pub fn is_playing_leaves(&self) -> bool {
        self.selected_depth + 1 == self.geometry.depth()
    }

    /// True if the depth-`depth` sub-board at `origin` itself was collapsed.
    pub fn is_collapsed(&self, depth: usize, origin: usize) -> bool {
        depth < self.geometry.depth() && self.cells[origin] == self.geometry.sentinel(depth)
    }

    /// True if the sub-board or any of its ancestors was collapsed.
    pub fn is_resolved(&self, depth: usize, origin: usize) -> bool {
        (0..=depth.min(self.geometry.depth() - 1))
            .any(|ancestor| self.is_collapsed(ancestor, self.geometry.origin_at(ancestor, origin)))
    }

    /// Owner of a leaf or sub-board whose ancestors are all unresolved.
    ///
    /// `None` while the position is still open; `Some(0)` for a drawn
    /// sub-board; `Some(p)` when claimed by player `p`.
    pub fn resolved_owner(&self, depth: usize, origin: usize) -> Option<Cell> {
        if depth == self.geometry.depth() {
            let value = self.cells[origin];
            (value > 0).then_some(value)
        } else if self.is_collapsed(depth, origin) {
            Some(self.cells[origin + 1])
        } else {
            None
        }
    }

    /// Children of the selected sub-board that can still be selected or played.
    pub fn open_children(&self) -> Vec<Coord> {
        if self.board_result().is_over() {
            return Vec::new();
        }
        let grid = self.geometry.grid();
        (0..self.geometry.children())
            .map(|index| Coord::from_index(index, grid))
            .filter(|&coord| {
                let child = self
                    .geometry
                    .child_origin(self.selected_depth, self.selected_origin, coord);
                self.resolved_owner(self.selected_depth + 1, child).is_none()
            })
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────
//  Mutations
// ─────────────────────────────────────────────────────────────

impl RecursiveBoard {
    /// Places `player`'s mark at `(row, col)` of the selected board of leaves.
    ///
    /// Resolves every sub-board the move completes, bottom-up, then
    /// redirects the selection to the sub-board matching the move's
    /// position one level up.
    ///
    /// # Errors
    ///
    /// Rejects occupied leaves and moves after the game ended; the board is
    /// left unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `row`/`col` lie outside the grid or the selection is not a
    /// board of leaves.
    #[instrument(skip(self), fields(depth = self.selected_depth, origin = self.selected_origin))]
    pub fn apply_move(&mut self, player: Player, row: usize, col: usize) -> Result<GameStatus, MoveError> {
        let action = Move::new(player, Coord::new(row, col));
        self.geometry.check_coord(action.coord);
        assert!(
            self.is_playing_leaves() || self.board_result().is_over(),
            "apply_move needs a board of leaves selected (selected depth {})",
            self.selected_depth
        );
        MoveContract::pre(self, &action)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let leaf = self
            .geometry
            .child_origin(self.selected_depth, self.selected_origin, action.coord);
        self.cells[leaf] = player.cell();
        debug!(leaf, "Mark placed");

        let status = self.resolve(leaf);
        if !status.is_over() {
            self.redirect(leaf);
        }

        #[cfg(debug_assertions)]
        if let Err(violations) = MoveContract::post(&before, &action, self) {
            let descriptions: Vec<_> = violations.iter().map(|v| v.description.as_str()).collect();
            panic!("move {action} broke board invariants: {}", descriptions.join("; "));
        }

        Ok(status)
    }

    /// Drills into the child sub-board at `(row, col)` of the selection.
    ///
    /// # Errors
    ///
    /// Rejects resolved children and any selection after the game ended.
    ///
    /// # Panics
    ///
    /// Panics if `row`/`col` lie outside the grid or the selection is
    /// already a board of leaves.
    #[instrument(skip(self), fields(depth = self.selected_depth, origin = self.selected_origin))]
    pub fn select_child(&mut self, row: usize, col: usize) -> Result<(), SelectError> {
        let coord = Coord::new(row, col);
        self.geometry.check_coord(coord);
        assert!(
            !self.is_playing_leaves() || self.board_result().is_over(),
            "select_child called on a board of leaves (selected depth {})",
            self.selected_depth
        );
        SelectContract::pre(self, &coord)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.selected_origin = self
            .geometry
            .child_origin(self.selected_depth, self.selected_origin, coord);
        self.selected_depth += 1;
        debug!(
            depth = self.selected_depth,
            origin = self.selected_origin,
            "Selected child sub-board"
        );

        #[cfg(debug_assertions)]
        if let Err(violations) = SelectContract::post(&before, &coord, self) {
            let descriptions: Vec<_> = violations.iter().map(|v| v.description.as_str()).collect();
            panic!("selecting {coord} broke board invariants: {}", descriptions.join("; "));
        }

        Ok(())
    }

    /// Resolution walk from the leaf's parent up to the root.
    ///
    /// Stops at the first ancestor that neither wins nor fills up: nothing
    /// above it can have changed.
    fn resolve(&mut self, leaf: usize) -> GameStatus {
        for depth in (0..self.geometry.depth()).rev() {
            let origin = self.geometry.origin_at(depth, leaf);
            let changed = self.geometry.position_within(depth, leaf);
            let owner = match rules::line_winner(self, depth, origin, changed) {
                Some(winner) => winner,
                None if rules::is_full(self, depth, origin) => 0,
                None => return GameStatus::InProgress,
            };
            self.collapse(depth, origin, owner);
        }
        self.board_result()
    }

    fn collapse(&mut self, depth: usize, origin: usize, owner: Cell) {
        info!(depth, origin, owner, "Sub-board resolved");
        self.cells[origin] = self.geometry.sentinel(depth);
        self.cells[origin + 1] = owner;
    }

    /// Sends play to the sibling board at the played leaf's position, or to
    /// the nearest unresolved ancestor of that board.
    fn redirect(&mut self, leaf: usize) {
        let depth = self.geometry.depth();
        let (mut target_depth, mut target_origin) = if depth == 1 {
            (0, 0)
        } else {
            let coord = self.geometry.position_within(depth - 1, leaf);
            let parent = self.geometry.origin_at(depth - 2, leaf);
            (depth - 1, self.geometry.child_origin(depth - 2, parent, coord))
        };
        while target_depth > 0 && self.is_resolved(target_depth, target_origin) {
            target_depth -= 1;
            target_origin = self.geometry.origin_at(target_depth, target_origin);
        }
        debug!(depth = target_depth, origin = target_origin, "Redirected selection");
        self.selected_depth = target_depth;
        self.selected_origin = target_origin;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: u8) -> Player {
        Player::new(id).unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = RecursiveBoard::standard();
        assert_eq!(board.cells().len(), 81);
        assert!(board.cells().iter().all(|&c| c == 0));
        assert_eq!(board.selection(), (0, 0));
        assert_eq!(board.board_result(), GameStatus::InProgress);
    }

    #[test]
    fn test_effective_owner_reads_through_sentinel() {
        let mut board = RecursiveBoard::standard();
        board.cells[9] = -1;
        board.cells[10] = 2;
        board.cells[11] = 1;
        assert_eq!(board.effective_owner(9), 2);
        assert_eq!(board.effective_owner(11), 1);
        assert_eq!(board.raw_value(9), -1);
    }

    #[test]
    fn test_resolution_in_a_board_of_leaves() {
        let mut board = RecursiveBoard::standard();
        board.select_child(0, 1).unwrap();
        assert_eq!(board.selection(), (1, 9));
        // Fill the left column of board (0, 1) for player 2 directly.
        board.cells[9] = 2;
        board.cells[12] = 2;
        board.cells[15] = 2;
        assert_eq!(board.resolve(15), GameStatus::InProgress);
        assert!(board.is_collapsed(1, 9));
        assert_eq!(board.raw_value(9), -1);
        assert_eq!(board.raw_value(10), 2);
        assert_eq!(board.raw_value(12), 2);
    }

    #[test]
    fn test_open_children_skips_claimed_leaves() {
        let mut board = RecursiveBoard::classic();
        board.apply_move(p(1), 1, 1).unwrap();
        let open = board.open_children();
        assert_eq!(open.len(), 8);
        assert!(!open.contains(&Coord::new(1, 1)));
    }

    #[test]
    fn test_is_resolved_sees_ancestors() {
        let mut board = RecursiveBoard::new(Geometry::new(2, 3).unwrap());
        // Collapse the depth-1 board at origin 16 by hand.
        board.cells[16] = -2;
        board.cells[17] = 1;
        assert!(board.is_resolved(1, 16));
        assert!(board.is_resolved(2, 20));
        assert!(board.is_resolved(3, 31));
        assert!(!board.is_resolved(1, 0));
        assert!(!board.is_resolved(2, 32));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_range_move_panics() {
        let mut board = RecursiveBoard::classic();
        let _ = board.apply_move(p(1), 0, 3);
    }

    #[test]
    #[should_panic]
    fn test_move_above_leaf_level_panics() {
        let mut board = RecursiveBoard::standard();
        let _ = board.apply_move(p(1), 0, 0);
    }

    #[test]
    #[should_panic]
    fn test_select_at_leaf_level_panics() {
        let mut board = RecursiveBoard::classic();
        let _ = board.select_child(0, 0);
    }
}
