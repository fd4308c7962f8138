//! Recursive "board of boards" tic-tac-toe engine.
//!
//! An N-level nested grid where every cell of a board is itself a full
//! sub-board. The whole tree lives in one flat array; winning or drawing a
//! sub-board collapses it into a single claimed cell one level up.
//!
//! # Example
//!
//! ```
//! use metaboard_core::{GameStatus, Player, RecursiveBoard};
//!
//! let mut board = RecursiveBoard::classic();
//! let x = Player::FIRST;
//! assert_eq!(board.apply_move(x, 0, 0), Ok(GameStatus::InProgress));
//! assert_eq!(board.apply_move(x, 0, 1), Ok(GameStatus::InProgress));
//! assert_eq!(board.apply_move(x, 0, 2), Ok(GameStatus::Won(x)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod geometry;
mod snapshot;
mod types;

pub mod contracts;
pub mod invariants;
pub mod rules;

pub use action::{Action, Move, MoveError, SelectError};
pub use board::RecursiveBoard;
pub use geometry::{DEFAULT_DEPTH, DEFAULT_GRID, Geometry, GeometryError, MAX_LEAVES};
pub use snapshot::{BoardSnapshot, SnapshotError};
pub use types::{Cell, Coord, GameStatus, Player};
