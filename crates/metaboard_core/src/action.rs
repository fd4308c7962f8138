//! First-class action types for the recursive board.
//!
//! Moves and drill-downs are domain events: they can be validated before
//! application, recorded, and replayed.

use crate::types::{Coord, Player};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A player placing a mark at `coord` inside the selected board of leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("player {player} -> {coord}")]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// Leaf address relative to the selected board.
    pub coord: Coord,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, coord: Coord) -> Self {
        Self { player, coord }
    }
}

/// One accepted step of play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Drill into the child sub-board at a coordinate.
    #[display("select {}", _0)]
    Select(Coord),
    /// Place a mark.
    #[display("{}", _0)]
    Place(Move),
}

/// Why a move was rejected. The board is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MoveError {
    /// The target leaf already holds a mark.
    #[display("leaf {} is already occupied", _0)]
    SquareOccupied(usize),

    /// The root board has been won or drawn.
    #[display("game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}

/// Why a drill-down was rejected. The selection is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SelectError {
    /// The child sub-board at this origin is already won or drawn.
    #[display("sub-board at leaf {} is already resolved", _0)]
    AlreadyResolved(usize),

    /// The root board has been won or drawn.
    #[display("game is already over")]
    GameOver,
}

impl std::error::Error for SelectError {}
