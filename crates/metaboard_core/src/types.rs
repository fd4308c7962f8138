//! Core domain types shared by the engine and its collaborators.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU8;

/// Raw value stored in one slot of the leaf array.
///
/// `0` is empty, positive values are player ids, negative values are
/// collapse sentinels (see [`crate::RecursiveBoard`]).
pub type Cell = i32;

/// A player, identified by a positive id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[display("{}", _0)]
#[serde(transparent)]
pub struct Player(NonZeroU8);

impl Player {
    /// Player 1, who moves first by convention.
    pub const FIRST: Player = Player(NonZeroU8::MIN);

    /// Creates a player from its id; `None` for id 0.
    pub fn new(id: u8) -> Option<Self> {
        NonZeroU8::new(id).map(Self)
    }

    /// The player's id.
    pub fn id(self) -> u8 {
        self.0.get()
    }

    /// Value written into a claimed cell.
    pub fn cell(self) -> Cell {
        Cell::from(self.0.get())
    }

    /// Interprets a stored owner value; `None` for empty, draws and sentinels.
    pub fn from_cell(value: Cell) -> Option<Self> {
        u8::try_from(value).ok().and_then(Self::new)
    }
}

/// A `(row, col)` address inside a single `G × G` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[display("({row}, {col})")]
pub struct Coord {
    /// Row, counted from the top.
    pub row: usize,
    /// Column, counted from the left.
    pub col: usize,
}

impl Coord {
    /// Creates a coordinate.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index of this coordinate in a grid of side `grid`.
    pub fn index(self, grid: usize) -> usize {
        self.row * grid + self.col
    }

    /// Inverse of [`Coord::index`].
    pub fn from_index(index: usize, grid: usize) -> Self {
        Self::new(index / grid, index % grid)
    }

    /// The middle cell of a grid (rounded towards the top-left).
    pub fn center(grid: usize) -> Self {
        Self::new((grid - 1) / 2, (grid - 1) / 2)
    }
}

/// State of the whole board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum GameStatus {
    /// The root board is unresolved.
    #[display("in progress")]
    InProgress,
    /// The root board was won.
    #[display("player {} wins", _0)]
    Won(Player),
    /// The root board was drawn.
    #[display("draw")]
    Draw,
}

impl GameStatus {
    /// Builds the status of a collapsed board from its stored owner value.
    pub fn from_owner(owner: Cell) -> Self {
        match Player::from_cell(owner) {
            Some(player) => GameStatus::Won(player),
            None => GameStatus::Draw,
        }
    }

    /// True once the root has been won or drawn.
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// The winner, if any.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(*player),
            _ => None,
        }
    }
}
