//! Keyboard routing for the interactive loop.

use crate::session::TurnCoordinator;
use crossterm::event::KeyCode;
use derive_more::Display;
use metaboard_core::{Coord, GameStatus};
use strum::EnumIter;
use tracing::{debug, instrument};

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    /// Maps arrow keys and `h/j/k/l`.
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Up | KeyCode::Char('k') => Some(Direction::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Direction::Down),
            KeyCode::Left | KeyCode::Char('h') => Some(Direction::Left),
            KeyCode::Right | KeyCode::Char('l') => Some(Direction::Right),
            _ => None,
        }
    }
}

/// What a key press did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// The cursor moved (or hit the edge).
    Moved,
    /// Play descended into the sub-board under the cursor.
    Descended,
    /// A mark was placed.
    Placed(GameStatus),
    /// The session refused the action; the message is for the status line.
    Rejected(String),
    /// The session was reset.
    Restarted,
    /// The user asked to leave.
    Quit,
    /// The key means nothing here.
    Ignored,
}

/// Turns key presses into cursor moves and session actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRouter {
    grid: usize,
    cursor: Coord,
}

impl InputRouter {
    /// Creates a router with the cursor centered on a `grid`-sided board.
    pub fn new(grid: usize) -> Self {
        Self {
            grid,
            cursor: Coord::center(grid),
        }
    }

    /// Cursor position within the selected sub-board.
    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    /// Moves the cursor one step, clamped to the grid.
    pub fn move_cursor(&mut self, direction: Direction) {
        let Coord { row, col } = self.cursor;
        let last = self.grid - 1;
        self.cursor = match direction {
            Direction::Up => Coord::new(row.saturating_sub(1), col),
            Direction::Down => Coord::new((row + 1).min(last), col),
            Direction::Left => Coord::new(row, col.saturating_sub(1)),
            Direction::Right => Coord::new(row, (col + 1).min(last)),
        };
    }

    /// Handles one key press against the session.
    #[instrument(skip(self, session), fields(cursor = %self.cursor))]
    pub fn handle_key(&mut self, key: KeyCode, session: &mut TurnCoordinator) -> InputOutcome {
        if let Some(direction) = Direction::from_key(key) {
            self.move_cursor(direction);
            return InputOutcome::Moved;
        }
        match key {
            KeyCode::Char('q') | KeyCode::Esc => InputOutcome::Quit,
            KeyCode::Char('r') => {
                session.restart();
                self.recenter();
                InputOutcome::Restarted
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.confirm(session),
            KeyCode::Char(c) => match self.digit_coord(c) {
                Some(coord) => {
                    self.cursor = coord;
                    self.confirm(session)
                }
                None => InputOutcome::Ignored,
            },
            _ => InputOutcome::Ignored,
        }
    }

    fn confirm(&mut self, session: &mut TurnCoordinator) -> InputOutcome {
        let coord = self.cursor;
        let result = if session.board().is_playing_leaves() {
            session.place(coord).map(InputOutcome::Placed)
        } else {
            session.select(coord).map(|()| InputOutcome::Descended)
        };
        match result {
            Ok(outcome) => {
                debug!(?outcome, "Input accepted");
                self.recenter();
                outcome
            }
            Err(e) => InputOutcome::Rejected(e.to_string()),
        }
    }

    /// Digit keys address cells in reading order when the grid is small enough.
    fn digit_coord(&self, c: char) -> Option<Coord> {
        let digit = c.to_digit(10)? as usize;
        let children = self.grid * self.grid;
        (1..=children)
            .contains(&digit)
            .then(|| Coord::from_index(digit - 1, self.grid))
    }

    fn recenter(&mut self) {
        self.cursor = Coord::center(self.grid);
    }
}
