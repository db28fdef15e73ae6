//! Grid module - the playfield container
//!
//! The grid is a 6x7 array of cells, each empty or holding a piece.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: `Pos { row, col }` with row 0 at the top and col 0 on the left.
//! Pieces fall towards the highest row index.

use arrayvec::ArrayVec;

use crate::types::{
    Cell, Color, Direction, Piece, Pos, StripeAxis, Tile, BOARD_COLS, BOARD_ROWS, GRID_CELLS,
};

/// The playfield - 6 rows x 7 columns using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * COLS + col)
    cells: [Cell; GRID_CELLS],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_CELLS],
        }
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(pos: Pos) -> Option<usize> {
        if !pos.in_bounds() {
            return None;
        }
        Some((pos.row as usize) * (BOARD_COLS as usize) + (pos.col as usize))
    }

    pub fn rows(&self) -> u8 {
        BOARD_ROWS
    }

    pub fn cols(&self) -> u8 {
        BOARD_COLS
    }

    /// Get cell at `pos`
    /// Returns None if out of bounds
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        Self::index(pos).map(|idx| self.cells[idx])
    }

    /// Set cell at `pos`
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Pos, cell: Cell) -> bool {
        match Self::index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Piece at `pos`, ignoring render metadata
    pub fn piece(&self, pos: Pos) -> Option<Piece> {
        self.get(pos).flatten().map(|tile| tile.piece)
    }

    /// Run color at `pos` (None for empty cells, blockers and out of bounds)
    #[inline]
    pub fn color_at(&self, pos: Pos) -> Option<Color> {
        self.piece(pos).and_then(|p| p.color())
    }

    pub fn is_blocker_at(&self, pos: Pos) -> bool {
        matches!(self.piece(pos), Some(Piece::Blocker))
    }

    /// Exchange the contents of two cells
    /// Returns false (and does nothing) if either is out of bounds
    pub fn swap(&mut self, a: Pos, b: Pos) -> bool {
        match (Self::index(a), Self::index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Turn the candy at `pos` into a striped one.
    /// Returns false for empty cells, blockers and out of bounds positions.
    pub fn stripe(&mut self, pos: Pos, axis: StripeAxis) -> bool {
        match Self::index(pos) {
            Some(idx) => match &mut self.cells[idx] {
                Some(tile) => tile.piece.set_stripe(axis),
                None => false,
            },
            None => false,
        }
    }

    /// Orthogonal in-bounds neighbours of `pos` (up, down, left, right)
    pub fn neighbors(&self, pos: Pos) -> ArrayVec<Pos, 4> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| pos.step(dir))
            .collect()
    }

    /// All positions in row-major order
    pub fn positions() -> impl Iterator<Item = Pos> {
        (0..BOARD_ROWS).flat_map(|row| (0..BOARD_COLS).map(move |col| Pos::new(row, col)))
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Compact every column downwards, leaving the empties on top.
    ///
    /// Stable two-pointer pass per column: surviving pieces keep their relative order.
    /// Returns the number of empty cells left on the grid.
    pub fn apply_gravity(&mut self) -> usize {
        let width = BOARD_COLS as usize;
        let height = BOARD_ROWS as usize;
        let mut empties = 0;

        for col in 0..width {
            let mut write_row = height;

            // Scan from bottom to top
            for read_row in (0..height).rev() {
                let cell = self.cells[read_row * width + col];
                if cell.is_some() {
                    write_row -= 1;
                    if write_row != read_row {
                        self.cells[write_row * width + col] = cell;
                        self.cells[read_row * width + col] = None;
                    }
                }
            }

            empties += write_row;
        }

        empties
    }

    /// Drop the `just_spawned` flag from every tile
    pub fn settle_all(&mut self) {
        for tile in self.cells.iter_mut().flatten() {
            tile.just_spawned = false;
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Parse a grid from one string per row.
    ///
    /// `B G Y O R P` are plain candies, `#` is a blocker and `.` is empty.
    /// Whitespace inside a row is ignored. Returns None on unknown characters or
    /// a wrong shape. Mostly useful for fixtures.
    ///
    /// ```
    /// use tui_match3_core::Grid;
    /// use tui_match3_core::types::{Color, Pos};
    ///
    /// let grid = Grid::from_ascii(&[
    ///     "BBGYBGY",
    ///     "GYB#OBG",
    ///     "YGOBGYB",
    ///     "BOYGBOY",
    ///     "GYBOYGB",
    ///     "OBGYOBG",
    /// ])
    /// .unwrap();
    /// assert_eq!(grid.color_at(Pos::new(0, 0)), Some(Color::Blue));
    /// assert!(grid.is_blocker_at(Pos::new(1, 3)));
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Option<Self> {
        if rows.len() != BOARD_ROWS as usize {
            return None;
        }

        let mut grid = Self::new();
        for (row, line) in rows.iter().enumerate() {
            let mut col = 0u8;
            for ch in line.chars().filter(|c| !c.is_whitespace()) {
                let cell = match ch {
                    '.' => None,
                    '#' => Some(Tile::settled(Piece::Blocker)),
                    other => Some(Tile::settled(Piece::candy(color_from_letter(other)?))),
                };
                if !grid.set(Pos::new(row as u8, col), cell) {
                    return None;
                }
                col += 1;
            }
            if col != BOARD_COLS {
                return None;
            }
        }
        Some(grid)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

fn color_from_letter(ch: char) -> Option<Color> {
    match ch {
        'B' => Some(Color::Blue),
        'G' => Some(Color::Green),
        'Y' => Some(Color::Yellow),
        'O' => Some(Color::Orange),
        'R' => Some(Color::Red),
        'P' => Some(Color::Purple),
        _ => None,
    }
}
