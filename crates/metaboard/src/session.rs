//! Turn coordination around a [`RecursiveBoard`].
//!
//! The board knows nothing about turn order; the coordinator supplies the
//! current player to every placement and only advances the turn when a
//! placement is accepted and the game goes on.

use crate::config::{ConfigError, GameConfig, MAX_PLAYERS};
use derive_more::{Display, From};
use metaboard_core::{
    Action, BoardSnapshot, Cell, Coord, GameStatus, Move, MoveError, Player, RecursiveBoard, SelectError,
    SnapshotError,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Reasons the coordinator refused an action.
///
/// Board rejections pass through unchanged; the other variants catch input
/// that would otherwise be a contract violation on the board.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum SessionError {
    /// The board rejected the placement.
    #[display("{}", _0)]
    #[from]
    Move(MoveError),

    /// The board rejected the drill-down.
    #[display("{}", _0)]
    #[from]
    Select(SelectError),

    /// A recorded placement names a player whose turn it is not.
    #[display("it is player {}'s turn, not player {}", expected, found)]
    WrongPlayer {
        /// Player to move.
        expected: Player,
        /// Player named by the action.
        found: Player,
    },

    /// The coordinate is outside the grid.
    #[display("{} is outside the {}x{} grid", coord, grid, grid)]
    OutOfGrid {
        /// Requested coordinate.
        coord: Coord,
        /// Grid side.
        grid: usize,
    },

    /// A placement was attempted while a sub-board still has to be chosen.
    #[display("choose a sub-board before placing a mark")]
    NotAtLeafLevel,

    /// A drill-down was attempted inside a board of leaves.
    #[display("already playing on a board of leaves")]
    AtLeafLevel,
}

impl std::error::Error for SessionError {}

/// Owns the board and the turn order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnCoordinator {
    board: RecursiveBoard,
    players: u8,
    current: Player,
    history: Vec<Action>,
}

impl TurnCoordinator {
    /// Starts a session from a validated configuration.
    #[instrument(skip(config))]
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = RecursiveBoard::new(config.geometry()?);
        info!(
            grid = config.grid(),
            depth = config.depth(),
            players = config.players(),
            "Starting session"
        );
        Ok(Self::with_board(board, *config.players()))
    }

    /// Wraps an existing board; player 1 moves next.
    ///
    /// # Panics
    ///
    /// Panics if `players` is outside `1..=MAX_PLAYERS`.
    pub fn with_board(board: RecursiveBoard, players: u8) -> Self {
        assert!((1..=MAX_PLAYERS).contains(&players), "player count {players} out of range");
        Self {
            board,
            players,
            current: Player::FIRST,
            history: Vec::new(),
        }
    }

    /// The board, for rendering.
    pub fn board(&self) -> &RecursiveBoard {
        &self.board
    }

    /// Number of players in rotation.
    pub fn players(&self) -> u8 {
        self.players
    }

    /// Player who acts next (the winner once the game is won).
    pub fn current_player(&self) -> Player {
        self.current
    }

    /// Accepted actions, oldest first.
    pub fn history(&self) -> &[Action] {
        &self.history
    }

    /// Outcome of the root board.
    pub fn status(&self) -> GameStatus {
        self.board.board_result()
    }

    /// Drills into a child sub-board for the current player.
    #[instrument(skip(self), fields(player = %self.current))]
    pub fn select(&mut self, coord: Coord) -> Result<(), SessionError> {
        self.check_coord(coord)?;
        if self.board.is_playing_leaves() && !self.status().is_over() {
            return Err(SessionError::AtLeafLevel);
        }
        self.board.select_child(coord.row, coord.col).inspect_err(|e| {
            debug!(error = %e, "Selection rejected");
        })?;
        self.history.push(Action::Select(coord));
        Ok(())
    }

    /// Places the current player's mark; advances the turn if play goes on.
    #[instrument(skip(self), fields(player = %self.current))]
    pub fn place(&mut self, coord: Coord) -> Result<GameStatus, SessionError> {
        self.check_coord(coord)?;
        if !self.board.is_playing_leaves() && !self.status().is_over() {
            return Err(SessionError::NotAtLeafLevel);
        }
        let player = self.current;
        let status = self
            .board
            .apply_move(player, coord.row, coord.col)
            .inspect_err(|e| debug!(error = %e, "Move rejected"))?;
        self.history.push(Action::Place(Move::new(player, coord)));
        match status {
            GameStatus::InProgress => self.current = self.next_player(),
            finished => info!(result = %finished, moves = self.history.len(), "Game over"),
        }
        Ok(status)
    }

    /// Applies a recorded action, checking that it is the named player's turn.
    pub fn apply(&mut self, action: Action) -> Result<(), SessionError> {
        match action {
            Action::Select(coord) => self.select(coord),
            Action::Place(mv) if mv.player != self.current => {
                warn!(expected = %self.current, found = %mv.player, "Out-of-turn action");
                Err(SessionError::WrongPlayer {
                    expected: self.current,
                    found: mv.player,
                })
            }
            Action::Place(mv) => self.place(mv.coord).map(|_| ()),
        }
    }

    /// Rebuilds a session by applying `actions` to a fresh board.
    #[instrument(skip(config, actions), fields(count = actions.len()))]
    pub fn replay(config: &GameConfig, actions: &[Action]) -> anyhow::Result<Self> {
        let mut session = Self::new(config)?;
        for (index, action) in actions.iter().enumerate() {
            session
                .apply(*action)
                .map_err(|e| anyhow::anyhow!("action {} ({}) rejected: {}", index, action, e))?;
        }
        Ok(session)
    }

    /// Starts over on an empty board of the same shape.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        info!("Restarting session");
        self.board = RecursiveBoard::new(self.board.geometry());
        self.current = Player::FIRST;
        self.history.clear();
    }

    /// Copies the session into serializable form.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: self.board.snapshot(),
            players: self.players,
            current_player: self.current,
            history: self.history.clone(),
        }
    }

    fn next_player(&self) -> Player {
        Player::new(self.current.id() % self.players + 1).unwrap_or(Player::FIRST)
    }

    fn check_coord(&self, coord: Coord) -> Result<(), SessionError> {
        let grid = self.board.geometry().grid();
        if coord.row < grid && coord.col < grid {
            Ok(())
        } else {
            Err(SessionError::OutOfGrid { coord, grid })
        }
    }
}

/// Serializable session state: the board verbatim plus the turn order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Cells and selection.
    pub board: BoardSnapshot,
    /// Number of players in rotation.
    pub players: u8,
    /// Player who acts next.
    pub current_player: Player,
    /// Accepted actions, oldest first.
    #[serde(default)]
    pub history: Vec<Action>,
}

/// Reasons a saved session cannot be restored.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum RestoreError {
    /// The board part is invalid.
    #[display("{}", _0)]
    Board(SnapshotError),

    /// Player count or current player out of range.
    #[display("player {} of {} is not a valid turn", current, players)]
    #[from(ignore)]
    Players {
        /// Stored player count.
        players: u8,
        /// Stored current player.
        current: u8,
    },

    /// A cell names a player outside the rotation.
    #[display("cell {} names player {}, but only {} play", index, value, players)]
    #[from(ignore)]
    UnknownPlayer {
        /// Position in the cell array.
        index: usize,
        /// Stored mark or owner.
        value: Cell,
        /// Stored player count.
        players: u8,
    },

    /// A recorded action does not replay on a fresh board.
    #[display("history action {} does not replay: {}", index, reason)]
    #[from(ignore)]
    HistoryRejected {
        /// Position in the history.
        index: usize,
        /// Why the session refused it.
        reason: SessionError,
    },

    /// Replaying the history does not reproduce the stored board and turn.
    #[display("history of {} actions does not match the stored board", _0)]
    #[from(ignore)]
    HistoryMismatch(usize),
}

impl std::error::Error for RestoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RestoreError::Board(e) => Some(e),
            RestoreError::HistoryRejected { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl TryFrom<SessionSnapshot> for TurnCoordinator {
    type Error = RestoreError;

    fn try_from(snapshot: SessionSnapshot) -> Result<Self, Self::Error> {
        let players = snapshot.players;
        let current = snapshot.current_player;
        if !(1..=MAX_PLAYERS).contains(&players) || current.id() > players {
            return Err(RestoreError::Players {
                players,
                current: current.id(),
            });
        }
        let board = RecursiveBoard::try_from(snapshot.board)?;
        if let Some((index, &value)) = board
            .cells()
            .iter()
            .enumerate()
            .find(|&(_, &value)| value > Cell::from(players))
        {
            return Err(RestoreError::UnknownPlayer { index, value, players });
        }

        let mut replayed = Self::with_board(RecursiveBoard::new(board.geometry()), players);
        for (index, action) in snapshot.history.iter().enumerate() {
            replayed
                .apply(*action)
                .map_err(|reason| RestoreError::HistoryRejected { index, reason })?;
        }
        if replayed.board != board || replayed.current != current {
            warn!(actions = snapshot.history.len(), "Stored history disagrees with board");
            return Err(RestoreError::HistoryMismatch(snapshot.history.len()));
        }
        Ok(replayed)
    }
}
