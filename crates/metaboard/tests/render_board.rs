//! Text rendering of nested boards.

use metaboard::render_board;
use metaboard_core::{Coord, Player, RecursiveBoard};

#[test]
fn test_fresh_standard_board_layout() {
    let board = RecursiveBoard::standard();
    let text = render_board(&board, Some(Coord::new(1, 1)));
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 11);
    assert_eq!(lines[0], "_ _ _ | _ _ _ | _ _ _");
    assert_eq!(lines[3], "-".repeat(21));
    assert_eq!(lines[4], "_ _ _ | * * * | _ _ _");
    assert_eq!(lines[10], "_ _ _ | _ _ _ | _ _ _");
}

#[test]
fn test_won_sub_board_is_flooded() {
    let x = Player::FIRST;
    let mut board = RecursiveBoard::standard();
    board.select_child(0, 0).unwrap();
    board.apply_move(x, 0, 0).unwrap();
    board.apply_move(x, 0, 1).unwrap();
    board.apply_move(x, 0, 0).unwrap();
    board.apply_move(x, 0, 2).unwrap();
    assert_eq!(board.selection(), (1, 18));

    let text = render_board(&board, None);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "X X X | X . . | _ _ _");
    assert_eq!(lines[1], "X X X | . . . | _ _ _");
    assert_eq!(lines[2], "X X X | . . . | _ _ _");
    assert_eq!(lines[4], ". . . | . . . | . . .");
}

#[test]
fn test_deeper_boundaries_are_heavier() {
    let board = RecursiveBoard::new(metaboard_core::Geometry::new(2, 3).unwrap());
    let text = render_board(&board, None);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "_ _ | _ _ || _ _ | _ _");
    assert_eq!(lines[2], "-".repeat(lines[0].len()));
    assert_eq!(lines[5], "=".repeat(lines[0].len()));
}
