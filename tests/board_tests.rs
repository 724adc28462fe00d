//! Board tests - collision and row collapse

use gyro_tetris::core::{Board, Shape, CATALOG};
use gyro_tetris::types::{Color, ShapeKind, COLS, ROWS};

fn fill_row(board: &mut Board, row: i8, color: Color) {
    for col in 0..COLS as i8 {
        board.set(row, col, color);
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.rows(), ROWS);
    assert_eq!(board.cols(), COLS);

    for row in 0..ROWS as i8 {
        for col in 0..COLS as i8 {
            assert_eq!(board.get(row, col), Some(Color::Empty));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(ROWS as i8, 0), None);
    assert_eq!(board.get(0, COLS as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();
    assert!(board.set(10, 5, Color::Magenta));
    assert_eq!(board.get(10, 5), Some(Color::Magenta));
    assert!(board.is_occupied(10, 5));

    assert!(board.set(10, 5, Color::Empty));
    assert!(!board.is_occupied(10, 5));

    assert!(!board.set(-1, 0, Color::Red));
    assert!(!board.set(0, COLS as i8, Color::Red));
}

#[test]
fn test_in_bounds_placements_never_conflict_on_empty_board() {
    let board = Board::new();
    for def in CATALOG {
        let mut shape = Shape::spawn(def.kind, Color::Red, 0);
        for _ in 0..4 {
            for row in -4..ROWS as i8 + 4 {
                for col in -4..COLS as i8 + 4 {
                    let placed = Shape { row, col, ..shape };
                    let inside = placed.cells().iter().all(|&(r, c)| {
                        r >= 0 && r < ROWS as i8 && c >= 0 && c < COLS as i8
                    });
                    assert_eq!(
                        board.conflict(&placed),
                        !inside,
                        "{:?} at ({}, {})",
                        def.kind,
                        row,
                        col
                    );
                }
            }
            shape.rotate();
        }
    }
}

#[test]
fn test_occupied_cell_conflicts() {
    let mut board = Board::new();
    board.set(5, 5, Color::Blue);
    let o = Shape::spawn(ShapeKind::O, Color::Red, 4);
    assert!(board.conflict(&o.shifted(4, 0)));
    assert!(board.conflict(&o.shifted(5, 1)));
    assert!(!board.conflict(&o.shifted(5, 2)));
}

#[test]
fn test_row_with_one_gap_is_not_collapsed() {
    let mut board = Board::new();
    fill_row(&mut board, 16, Color::Red);
    board.set(16, 9, Color::Empty);

    let before = board.clone();
    let cleared = board.collapse_full_rows(&mut ());
    assert!(cleared.is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_collapse_shifts_rows_above_and_clears_top() {
    let mut board = Board::new();
    board.set(0, 0, Color::Cyan);
    board.set(14, 3, Color::Yellow);
    fill_row(&mut board, 15, Color::Red);
    board.set(16, 2, Color::Green);

    let cleared = board.collapse_full_rows(&mut ());
    assert_eq!(cleared.as_slice(), &[15]);

    assert_eq!(board.get(15, 3), Some(Color::Yellow));
    assert_eq!(board.get(1, 0), Some(Color::Cyan));
    assert_eq!(board.get(16, 2), Some(Color::Green));
    for col in 0..COLS as i8 {
        assert_eq!(board.get(0, col), Some(Color::Empty));
    }
}

#[test]
fn test_adjacent_full_rows_collapse_once_each() {
    let mut board = Board::new();
    board.set(14, 6, Color::Orange);
    fill_row(&mut board, 15, Color::Red);
    fill_row(&mut board, 16, Color::Blue);

    let cleared = board.collapse_full_rows(&mut ());
    assert_eq!(cleared.as_slice(), &[15, 16]);
    assert_eq!(board.get(16, 6), Some(Color::Orange));
    assert_eq!(board.occupied_count(), 1);
}

#[test]
fn test_lock_shape_writes_color() {
    let mut board = Board::new();
    let t = Shape::spawn(ShapeKind::T, Color::Magenta, 6).shifted(10, 0);
    assert_eq!(board.lock_shape(&t), 4);
    for (row, col) in t.cells() {
        assert_eq!(board.get(row, col), Some(Color::Magenta));
    }
    assert_eq!(board.occupied_count(), 4);
}
