//! Verbatim, serializable copy of a board's cells and selection.

use crate::board::RecursiveBoard;
use crate::geometry::{Geometry, GeometryError};
use crate::invariants::{BoardInvariants, InvariantSet, InvariantViolation};
use crate::types::Cell;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Plain-data image of a [`RecursiveBoard`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Grid side `G`.
    pub grid: usize,
    /// Nesting depth `D`.
    pub depth: usize,
    /// The flat cell array, copied verbatim.
    pub cells: Vec<Cell>,
    /// Depth of the selected sub-board.
    pub selected_depth: usize,
    /// Origin of the selected sub-board.
    pub selected_origin: usize,
}

/// Reasons a snapshot cannot become a board.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum SnapshotError {
    /// Grid or depth are not a valid geometry.
    #[display("invalid geometry: {}", _0)]
    Geometry(GeometryError),

    /// The cell array has the wrong length.
    #[display("expected {} cells, found {}", expected, found)]
    #[from(ignore)]
    CellCount {
        /// Leaf count of the geometry.
        expected: usize,
        /// Length of the stored array.
        found: usize,
    },

    /// A cell holds a value no player id can produce.
    #[display("cell {} holds {}, which is not a player id", index, value)]
    #[from(ignore)]
    CellValue {
        /// Position in the cell array.
        index: usize,
        /// Offending value.
        value: Cell,
    },

    /// The restored board breaks one or more invariants.
    #[display("snapshot violates invariants: {}", _0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Invariants(Vec<InvariantViolation>),
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Geometry(e) => Some(e),
            _ => None,
        }
    }
}

impl RecursiveBoard {
    /// Copies the cells and selection into a snapshot.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            grid: self.geometry.grid(),
            depth: self.geometry.depth(),
            cells: self.cells.clone(),
            selected_depth: self.selected_depth,
            selected_origin: self.selected_origin,
        }
    }
}

impl TryFrom<BoardSnapshot> for RecursiveBoard {
    type Error = SnapshotError;

    #[instrument(skip(snapshot), fields(grid = snapshot.grid, depth = snapshot.depth))]
    fn try_from(snapshot: BoardSnapshot) -> Result<Self, Self::Error> {
        let geometry = Geometry::new(snapshot.grid, snapshot.depth)?;
        if snapshot.cells.len() != geometry.leaf_count() {
            return Err(SnapshotError::CellCount {
                expected: geometry.leaf_count(),
                found: snapshot.cells.len(),
            });
        }
        if let Some((index, &value)) = snapshot
            .cells
            .iter()
            .enumerate()
            .find(|&(_, &value)| value > Cell::from(u8::MAX))
        {
            warn!(index, value, "Rejected snapshot");
            return Err(SnapshotError::CellValue { index, value });
        }
        let board = RecursiveBoard {
            geometry,
            cells: snapshot.cells,
            selected_depth: snapshot.selected_depth,
            selected_origin: snapshot.selected_origin,
        };
        BoardInvariants::check_all(&board).map_err(|violations| {
            warn!(count = violations.len(), "Rejected snapshot");
            SnapshotError::Invariants(violations)
        })?;
        Ok(board)
    }
}
