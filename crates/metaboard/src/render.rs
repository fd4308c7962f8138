//! Plain-text rendering of the whole leaf grid.
//!
//! The board is drawn as a `G^D × G^D` grid of glyphs. Separators get
//! heavier the shallower the sub-board boundary they mark, resolved
//! sub-boards are flooded with their owner's glyph, and empty leaves show
//! whether they are inside the selected sub-board or under the cursor.

use metaboard_core::{Cell, Coord, Geometry, RecursiveBoard};
use std::ops::Range;

/// Glyph for an empty leaf under the cursor.
pub const CURSOR: char = '*';
/// Glyph for an empty leaf inside the selected sub-board.
pub const OPEN: char = '_';
/// Glyph for an empty leaf elsewhere.
pub const IDLE: char = '.';
/// Glyph for a drawn sub-board.
pub const DRAW: char = '#';

/// Glyph for an owner value: `X`, `O`, then `A`, `B`, ... for players 3+.
pub fn glyph(owner: Cell) -> char {
    match owner {
        0 => DRAW,
        1 => 'X',
        2 => 'O',
        n if (3..=28).contains(&n) => char::from(b'A' + (n - 3) as u8),
        _ => '?',
    }
}

/// Renders the board, highlighting the child under `cursor` if given.
pub fn render_board(board: &RecursiveBoard, cursor: Option<Coord>) -> String {
    let geometry = board.geometry();
    let side = geometry.grid().pow(geometry.depth() as u32);
    let (depth, origin) = board.selection();
    let selected = origin..origin + geometry.subtree_width(depth);
    let highlighted = cursor.map(|coord| {
        let child = geometry.child_origin(depth, origin, coord);
        child..child + geometry.subtree_width(depth + 1)
    });

    let rows: Vec<String> = (0..side)
        .map(|row| {
            let mut line = String::new();
            for col in 0..side {
                if col > 0 {
                    line.push_str(&column_separator(geometry, boundary_level(geometry, col)));
                }
                let leaf = leaf_index(geometry, row, col);
                line.push(leaf_glyph(board, leaf, &selected, highlighted.as_ref()));
            }
            line
        })
        .collect();

    let width = rows.first().map_or(0, |row| row.chars().count());
    let mut out = Vec::with_capacity(rows.len() * 2);
    for (row, line) in rows.into_iter().enumerate() {
        if row > 0 {
            let level = boundary_level(geometry, row);
            if level < geometry.depth() {
                out.push(row_separator(geometry, level, width));
            }
        }
        out.push(line);
    }
    out.join("\n")
}

/// Flat index of the leaf drawn at global `(row, col)`.
///
/// Each base-`G` digit of the row and column, most significant first,
/// picks a child one level further down.
pub fn leaf_index(geometry: Geometry, row: usize, col: usize) -> usize {
    let grid = geometry.grid();
    let mut scale = grid.pow(geometry.depth() as u32);
    (1..=geometry.depth())
        .map(|depth| {
            scale /= grid;
            let coord = Coord::new(row / scale % grid, col / scale % grid);
            coord.index(grid) * geometry.subtree_width(depth)
        })
        .sum()
}

/// Shallowest depth whose sub-boards are split between `line - 1` and `line`.
fn boundary_level(geometry: Geometry, line: usize) -> usize {
    let grid = geometry.grid();
    (1..=geometry.depth())
        .find(|&level| line % grid.pow((geometry.depth() - level) as u32) == 0)
        .unwrap_or(geometry.depth())
}

fn column_separator(geometry: Geometry, level: usize) -> String {
    if level == geometry.depth() {
        " ".to_string()
    } else {
        format!(" {} ", "|".repeat(geometry.depth() - level))
    }
}

fn row_separator(geometry: Geometry, level: usize, width: usize) -> String {
    let fill = if level + 1 == geometry.depth() { '-' } else { '=' };
    std::iter::repeat_n(fill, width).collect()
}

fn leaf_glyph(
    board: &RecursiveBoard,
    leaf: usize,
    selected: &Range<usize>,
    highlighted: Option<&Range<usize>>,
) -> char {
    let geometry = board.geometry();
    let collapsed = (0..geometry.depth())
        .map(|depth| (depth, geometry.origin_at(depth, leaf)))
        .find(|&(depth, origin)| board.is_collapsed(depth, origin));
    if let Some((_, origin)) = collapsed {
        return glyph(board.raw_value(origin + 1));
    }
    match board.raw_value(leaf) {
        0 if highlighted.is_some_and(|span| span.contains(&leaf)) => CURSOR,
        0 if selected.contains(&leaf) => OPEN,
        0 => IDLE,
        owner => glyph(owner),
    }
}
