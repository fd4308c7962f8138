//! Resolution rules for a single sub-board.
//!
//! Pure functions over [`RecursiveBoard`](crate::RecursiveBoard) used by the
//! bottom-up resolution walk. A sub-board's children are leaves (at depth
//! `D-1`) or smaller sub-boards; either way only their resolved owner
//! matters here.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::line_winner;
