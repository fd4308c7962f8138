//! Index arithmetic for the flat leaf array.
//!
//! A board of grid side `G` and depth `D` is stored as `(G²)^D` leaves in
//! row-major, depth-first order: every sub-board at depth `k` owns a
//! contiguous run of `(G²)^(D-k)` leaves starting at its origin.

use crate::types::Coord;
use derive_more::Display;
use tracing::instrument;

/// Largest leaf count accepted by [`Geometry::new`].
pub const MAX_LEAVES: usize = 1 << 24;

/// Default grid side.
pub const DEFAULT_GRID: usize = 3;

/// Default nesting depth.
pub const DEFAULT_DEPTH: usize = 2;

/// Reasons a geometry cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum GeometryError {
    /// The grid side must be at least 2.
    #[display("grid side {} is too small (minimum 2)", _0)]
    GridTooSmall(usize),

    /// The depth must be at least 1.
    #[display("depth {} is too small (minimum 1)", _0)]
    DepthTooSmall(usize),

    /// The leaf count overflows or exceeds [`MAX_LEAVES`].
    #[display("grid {} at depth {} needs more than {} leaves", grid, depth, MAX_LEAVES)]
    TooManyLeaves {
        /// Requested grid side.
        grid: usize,
        /// Requested depth.
        depth: usize,
    },
}

impl std::error::Error for GeometryError {}

/// Grid side and nesting depth, with the arithmetic derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    grid: usize,
    depth: usize,
    leaves: usize,
}

impl Geometry {
    /// Validates and builds a geometry.
    #[instrument]
    pub fn new(grid: usize, depth: usize) -> Result<Self, GeometryError> {
        if grid < 2 {
            return Err(GeometryError::GridTooSmall(grid));
        }
        if depth < 1 {
            return Err(GeometryError::DepthTooSmall(depth));
        }
        let leaves = u32::try_from(depth)
            .ok()
            .and_then(|d| grid.checked_mul(grid)?.checked_pow(d))
            .filter(|&n| n <= MAX_LEAVES)
            .ok_or(GeometryError::TooManyLeaves { grid, depth })?;
        Ok(Self {
            grid,
            depth,
            leaves,
        })
    }

    /// The 3×3, two-level board.
    pub fn standard() -> Self {
        Self {
            grid: DEFAULT_GRID,
            depth: DEFAULT_DEPTH,
            leaves: 81,
        }
    }

    /// Plain tic-tac-toe: one 3×3 board of leaves.
    pub fn classic() -> Self {
        Self {
            grid: DEFAULT_GRID,
            depth: 1,
            leaves: 9,
        }
    }

    /// Side length `G` of every grid.
    pub fn grid(&self) -> usize {
        self.grid
    }

    /// Nesting depth `D`.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Children per sub-board, `G²`.
    pub fn children(&self) -> usize {
        self.grid * self.grid
    }

    /// Total leaves `N = (G²)^D`.
    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    /// Number of leaves spanned by a node at `depth`.
    ///
    /// # Panics
    ///
    /// Panics if `depth > D`.
    pub fn subtree_width(&self, depth: usize) -> usize {
        assert!(depth <= self.depth, "depth {depth} exceeds board depth {}", self.depth);
        let mut width = 1;
        for _ in depth..self.depth {
            width *= self.children();
        }
        width
    }

    /// Which child of its depth-`depth` ancestor the leaf `index` falls under.
    ///
    /// # Panics
    ///
    /// Panics if `depth >= D` or `index` is outside the board.
    pub fn position_within(&self, depth: usize, index: usize) -> Coord {
        assert!(depth < self.depth, "depth {depth} has no children (board depth {})", self.depth);
        assert!(index < self.leaves, "leaf {index} out of range ({} leaves)", self.leaves);
        let width = self.subtree_width(depth);
        let child = (index % width) / (width / self.children());
        Coord::new(child / self.grid, child % self.grid)
    }

    /// Origin of the depth-`depth` sub-board containing leaf `index`.
    pub fn origin_at(&self, depth: usize, index: usize) -> usize {
        index - index % self.subtree_width(depth)
    }

    /// Origin of the child at `coord` of the depth-`depth` sub-board at `origin`.
    ///
    /// # Panics
    ///
    /// Panics if `coord` lies outside the grid or `depth >= D`.
    pub fn child_origin(&self, depth: usize, origin: usize, coord: Coord) -> usize {
        self.check_coord(coord);
        assert!(depth < self.depth, "depth {depth} has no children (board depth {})", self.depth);
        origin + coord.index(self.grid) * self.subtree_width(depth + 1)
    }

    /// Asserts that `coord` addresses a cell of a `G × G` grid.
    pub fn check_coord(&self, coord: Coord) {
        assert!(
            coord.row < self.grid && coord.col < self.grid,
            "coordinate {coord} outside a {0}x{0} grid",
            self.grid
        );
    }

    /// Depth of the sub-board whose collapse wrote `sentinel` (a negative value).
    pub fn collapsed_depth(&self, sentinel: i32) -> usize {
        debug_assert!(sentinel < 0);
        self.depth - sentinel.unsigned_abs() as usize
    }

    /// Sentinel written at the origin of a collapsed depth-`depth` sub-board.
    pub fn sentinel(&self, depth: usize) -> i32 {
        -((self.depth - depth) as i32)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::standard()
    }
}
