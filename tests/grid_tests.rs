//! Grid tests - container, gravity and fixtures

use tui_match3::core::Grid;
use tui_match3::types::{Color, Piece, Pos, StripeAxis, Tile, BOARD_COLS, BOARD_ROWS, GRID_CELLS};

fn candy(color: Color) -> Option<Tile> {
    Some(Tile::settled(Piece::candy(color)))
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.rows(), BOARD_ROWS);
    assert_eq!(grid.cols(), BOARD_COLS);
    assert_eq!(grid.cells().len(), GRID_CELLS);
    assert!(grid.cells().iter().all(Option::is_none));
    for pos in Grid::positions() {
        assert_eq!(grid.get(pos), Some(None), "cell {} should be empty", pos);
    }
}

#[test]
fn test_grid_out_of_bounds() {
    let mut grid = Grid::new();
    assert_eq!(grid.get(Pos::new(BOARD_ROWS, 0)), None);
    assert_eq!(grid.get(Pos::new(0, BOARD_COLS)), None);
    assert!(!grid.set(Pos::new(6, 0), candy(Color::Red)));
    assert!(!grid.swap(Pos::new(0, 0), Pos::new(0, 7)));
    assert!(grid.cells().iter().all(Option::is_none));
}

#[test]
fn test_positions_are_row_major() {
    let all: Vec<Pos> = Grid::positions().collect();
    assert_eq!(all.len(), GRID_CELLS);
    assert_eq!(all[0], Pos::new(0, 0));
    assert_eq!(all[1], Pos::new(0, 1));
    assert_eq!(all[7], Pos::new(1, 0));
    assert_eq!(all[41], Pos::new(5, 6));
}

#[test]
fn test_gravity_keeps_order_and_counts_holes() {
    let mut grid = Grid::from_ascii(&[
        "R......",
        ".......",
        "G......",
        ".......",
        "B......",
        ".......",
    ])
    .unwrap();

    let empties = grid.apply_gravity();
    assert_eq!(empties, GRID_CELLS - 3);
    assert_eq!(grid.color_at(Pos::new(3, 0)), Some(Color::Red));
    assert_eq!(grid.color_at(Pos::new(4, 0)), Some(Color::Green));
    assert_eq!(grid.color_at(Pos::new(5, 0)), Some(Color::Blue));
    assert_eq!(grid.get(Pos::new(0, 0)), Some(None));
}

#[test]
fn test_gravity_carries_stripes_and_blockers() {
    let mut grid = Grid::new();
    grid.set(
        Pos::new(0, 3),
        Some(Tile::settled(Piece::striped(Color::Purple, StripeAxis::Vertical))),
    );
    grid.set(Pos::new(2, 3), Some(Tile::settled(Piece::Blocker)));
    grid.apply_gravity();

    assert_eq!(
        grid.piece(Pos::new(4, 3)),
        Some(Piece::striped(Color::Purple, StripeAxis::Vertical))
    );
    assert_eq!(grid.piece(Pos::new(5, 3)), Some(Piece::Blocker));
}
