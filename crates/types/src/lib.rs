//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behavior beyond small accessors, so they can be
//! shared by the engine, the terminal renderer and the input layer alike.
//!
//! # Board Dimensions
//!
//! - **Rows**: 6 (indexed 0-5, top to bottom)
//! - **Columns**: 7 (indexed 0-6, left to right)
//!
//! # Tuning Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_PALETTE_SIZE` | 4 | Ordinary colors in play |
//! | `BLOCKER_PERCENT` | 5 | Chance (in percent) that a spawned piece is a blocker |
//! | `INITIAL_MOVES` | 64 | Move budget of a fresh game |
//! | `POINTS_PER_CELL` | 10 | Points per matched cell |
//!
//! # Playback Timing
//!
//! The engine is time-agnostic. These values are only used by the terminal front-end
//! to pace cascade playback:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Input poll interval (~60 FPS) |
//! | `SWAP_FLASH_MS` | 300 | Message flash after a rejected swap |
//! | `CLEAR_MS` | 300 | Matched cells stay highlighted before removal |
//! | `FALL_MS` | 500 | Freshly spawned pieces stay highlighted after refill |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{Color, GameAction, Pos, BOARD_COLS, BOARD_ROWS};
//!
//! assert_eq!(Color::ALL.len(), 6);
//!
//! // Adjacency is orthogonal only
//! let a = Pos::new(2, 3);
//! assert!(a.is_adjacent(Pos::new(2, 4)));
//! assert!(!a.is_adjacent(Pos::new(3, 4)));
//!
//! // Mouse clicks carry the cell they landed on
//! assert_ne!(GameAction::SelectAt(a), GameAction::Select);
//!
//! assert_eq!(BOARD_ROWS, 6);
//! assert_eq!(BOARD_COLS, 7);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Board height in cells (6 rows)
pub const BOARD_ROWS: u8 = 6;

/// Board width in cells (7 columns)
pub const BOARD_COLS: u8 = 7;

/// Total number of cells on the board
pub const GRID_CELLS: usize = (BOARD_ROWS as usize) * (BOARD_COLS as usize);

/// Ordinary colors used by a default game
pub const DEFAULT_PALETTE_SIZE: u8 = 4;

/// Smallest palette the board generator can work with.
///
/// Initial generation may exclude up to two colors per cell.
pub const MIN_PALETTE_SIZE: u8 = 3;

/// Chance, in percent, that a spawned piece is a blocker
pub const BLOCKER_PERCENT: u8 = 5;

/// Move budget of a fresh game
pub const INITIAL_MOVES: u32 = 64;

/// Points awarded per matched cell
pub const POINTS_PER_CELL: u32 = 10;

/// Shortest run that counts as a match
pub const MIN_RUN: usize = 3;

/// Exact run length that seeds a striped piece
pub const SPECIAL_RUN: usize = 4;

/// Front-end poll interval in milliseconds
pub const TICK_MS: u32 = 16;

/// Message flash after a swap that produced no match
pub const SWAP_FLASH_MS: u32 = 300;

/// Time matched cells stay highlighted before a cascade step resolves them
pub const CLEAR_MS: u32 = 300;

/// Time freshly spawned pieces stay highlighted after a refill
pub const FALL_MS: u32 = 500;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn original_game_defaults() {
        assert_eq!(BOARD_ROWS, 6);
        assert_eq!(BOARD_COLS, 7);
        assert_eq!(GRID_CELLS, 42);
        assert_eq!(DEFAULT_PALETTE_SIZE, 4);
        assert_eq!(BLOCKER_PERCENT, 5);
        assert_eq!(INITIAL_MOVES, 64);
        assert_eq!(POINTS_PER_CELL, 10);
    }

    #[test]
    fn pos_adjacency_is_orthogonal() {
        let p = Pos::new(3, 3);
        assert!(p.is_adjacent(Pos::new(2, 3)));
        assert!(p.is_adjacent(Pos::new(4, 3)));
        assert!(p.is_adjacent(Pos::new(3, 2)));
        assert!(p.is_adjacent(Pos::new(3, 4)));
        assert!(!p.is_adjacent(p));
        assert!(!p.is_adjacent(Pos::new(4, 4)));
        assert!(!p.is_adjacent(Pos::new(3, 5)));
    }

    #[test]
    fn pos_step_stops_at_edges() {
        assert_eq!(Pos::new(0, 0).step(Direction::Up), None);
        assert_eq!(Pos::new(0, 0).step(Direction::Left), None);
        assert_eq!(
            Pos::new(BOARD_ROWS - 1, 0).step(Direction::Down),
            None
        );
        assert_eq!(
            Pos::new(0, BOARD_COLS - 1).step(Direction::Right),
            None
        );
        assert_eq!(Pos::new(1, 1).step(Direction::Down), Some(Pos::new(2, 1)));
    }

    #[test]
    fn blocker_cannot_be_striped() {
        let mut p = Piece::Blocker;
        assert!(!p.set_stripe(StripeAxis::Horizontal));
        assert_eq!(p, Piece::Blocker);

        let mut c = Piece::candy(Color::Green);
        assert!(c.set_stripe(StripeAxis::Vertical));
        assert_eq!(c.stripe(), Some(StripeAxis::Vertical));
        assert_eq!(c.color(), Some(Color::Green));
    }

    #[test]
    fn cell_codes_are_distinct() {
        let cells = [
            None,
            Some(Tile::settled(Piece::candy(Color::Blue))),
            Some(Tile::settled(Piece::striped(Color::Blue, StripeAxis::Horizontal))),
            Some(Tile::settled(Piece::striped(Color::Blue, StripeAxis::Vertical))),
            Some(Tile::settled(Piece::Blocker)),
        ];
        let codes: Vec<u8> = cells.iter().map(|c| cell_code(*c)).collect();
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
        // just_spawned is not part of the code
        assert_eq!(
            cell_code(Some(Tile::spawned(Piece::Blocker))),
            cell_code(Some(Tile::settled(Piece::Blocker)))
        );
    }
}

/// Ordinary piece colors
///
/// A game uses the first `palette_size` entries of [`Color::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
}

impl Color {
    /// Every color in palette order
    pub const ALL: [Color; 6] = [
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Orange,
        Color::Red,
        Color::Purple,
    ];

    /// Position in [`Color::ALL`]
    pub fn index(self) -> usize {
        match self {
            Color::Blue => 0,
            Color::Green => 1,
            Color::Yellow => 2,
            Color::Orange => 3,
            Color::Red => 4,
            Color::Purple => 5,
        }
    }
}

/// Orientation of a striped piece (the axis of the run that created it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StripeAxis {
    Horizontal,
    Vertical,
}

/// A piece occupying a grid cell
///
/// - **Candy**: ordinary colored piece, optionally striped
/// - **Blocker**: never part of a run, removed when next to a matched cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Piece {
    Candy {
        color: Color,
        stripe: Option<StripeAxis>,
    },
    Blocker,
}

impl Piece {
    pub const fn candy(color: Color) -> Self {
        Piece::Candy {
            color,
            stripe: None,
        }
    }

    pub const fn striped(color: Color, axis: StripeAxis) -> Self {
        Piece::Candy {
            color,
            stripe: Some(axis),
        }
    }

    /// Color for run detection (`None` for blockers)
    pub fn color(&self) -> Option<Color> {
        match self {
            Piece::Candy { color, .. } => Some(*color),
            Piece::Blocker => None,
        }
    }

    pub fn stripe(&self) -> Option<StripeAxis> {
        match self {
            Piece::Candy { stripe, .. } => *stripe,
            Piece::Blocker => None,
        }
    }

    /// Mark a candy as striped along `axis`.
    ///
    /// Returns false (and leaves the piece alone) for blockers.
    pub fn set_stripe(&mut self, axis: StripeAxis) -> bool {
        match self {
            Piece::Candy { stripe, .. } => {
                *stripe = Some(axis);
                true
            }
            Piece::Blocker => false,
        }
    }
}

/// A placed piece plus render-only metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub piece: Piece,
    /// Set on pieces placed by the most recent refill.
    ///
    /// Only consumed by renderers; matching ignores it.
    pub just_spawned: bool,
}

impl Tile {
    pub const fn settled(piece: Piece) -> Self {
        Self {
            piece,
            just_spawned: false,
        }
    }

    pub const fn spawned(piece: Piece) -> Self {
        Self {
            piece,
            just_spawned: true,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Tile)`: Cell holding a piece
pub type Cell = Option<Tile>;

/// Compact per-cell code used for hashing and compact board exports.
///
/// `0` is empty, `1..=6` plain candies, `+16` horizontal stripe, `+32` vertical stripe,
/// `64` blocker. `just_spawned` is not encoded.
pub fn cell_code(cell: Cell) -> u8 {
    match cell.map(|t| t.piece) {
        None => 0,
        Some(Piece::Blocker) => 64,
        Some(Piece::Candy { color, stripe }) => {
            let base = color.index() as u8 + 1;
            match stripe {
                None => base,
                Some(StripeAxis::Horizontal) => base + 16,
                Some(StripeAxis::Vertical) => base + 32,
            }
        }
    }
}

/// Orthogonal direction on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Neighbour scan order used throughout the engine
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// A grid position
///
/// `row` ranges 0..BOARD_ROWS (top to bottom), `col` ranges 0..BOARD_COLS (left to right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(&self) -> bool {
        self.row < BOARD_ROWS && self.col < BOARD_COLS
    }

    /// True when `other` is exactly one cell away horizontally or vertically
    pub fn is_adjacent(&self, other: Pos) -> bool {
        self.row.abs_diff(other.row) as u16 + self.col.abs_diff(other.col) as u16 == 1
    }

    /// Neighbouring position in `dir`, or `None` past the board edge
    pub fn step(&self, dir: Direction) -> Option<Pos> {
        let (row, col) = match dir {
            Direction::Up => (self.row.checked_sub(1)?, self.col),
            Direction::Down => (self.row.checked_add(1)?, self.col),
            Direction::Left => (self.row, self.col.checked_sub(1)?),
            Direction::Right => (self.row, self.col.checked_add(1)?),
        };
        let next = Pos::new(row, col);
        next.in_bounds().then_some(next)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Front-end actions produced by the input layer
///
/// The selection itself lives in the input layer; the engine only ever
/// sees the resulting swap requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the cursor one cell up
    CursorUp,
    /// Move the cursor one cell down
    CursorDown,
    /// Move the cursor one cell left
    CursorLeft,
    /// Move the cursor one cell right
    CursorRight,
    /// Select the cell under the cursor (or swap with the selection)
    Select,
    /// Select a specific cell (mouse click)
    SelectAt(Pos),
    /// Drop the current selection
    Cancel,
    /// Discard the board and start over
    NewGame,
}
