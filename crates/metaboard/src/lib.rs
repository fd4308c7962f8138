//! Terminal front end for the recursive board engine.
//!
//! Configuration, turn order, key routing and text rendering live here; the
//! rules themselves are in [`metaboard_core`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod input;
pub mod render;
pub mod session;
pub mod store;
pub mod tui;

pub use config::{ConfigError, GameConfig, MAX_PLAYERS};
pub use input::{Direction, InputOutcome, InputRouter};
pub use render::{glyph, render_board};
pub use session::{RestoreError, SessionError, SessionSnapshot, TurnCoordinator};
