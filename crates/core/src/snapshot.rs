//! Game snapshot: a fixed-size copy of the board and counters for renderers.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::types::{cell_code, Cell, Pos, BOARD_COLS, BOARD_ROWS};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over the per-cell codes in row-major order.
///
/// Ignores `just_spawned`, so two boards with the same pieces hash equal.
pub fn board_hash(grid: &Grid) -> u64 {
    grid.cells().iter().fold(FNV_OFFSET, |hash, &cell| {
        (hash ^ cell_code(cell) as u64).wrapping_mul(FNV_PRIME)
    })
}

/// Read-only copy of everything a renderer needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub cells: [[Cell; BOARD_COLS as usize]; BOARD_ROWS as usize],
    pub board_hash: u64,
    pub score: u32,
    pub moves_remaining: u32,
    pub game_over: bool,
    pub game_id: u32,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.cells = [[None; BOARD_COLS as usize]; BOARD_ROWS as usize];
        self.board_hash = 0;
        self.score = 0;
        self.moves_remaining = 0;
        self.game_over = false;
        self.game_id = 0;
        self.seed = 0;
    }

    /// Copy the grid contents into `cells` and refresh the hash
    pub fn write_grid(&mut self, grid: &Grid) {
        for pos in Grid::positions() {
            self.cells[pos.row as usize][pos.col as usize] = grid.get(pos).flatten();
        }
        self.board_hash = board_hash(grid);
    }

    pub fn cell(&self, pos: Pos) -> Cell {
        if !pos.in_bounds() {
            return None;
        }
        self.cells[pos.row as usize][pos.col as usize]
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            cells: [[None; BOARD_COLS as usize]; BOARD_ROWS as usize],
            board_hash: 0,
            score: 0,
            moves_remaining: 0,
            game_over: false,
            game_id: 0,
            seed: 0,
        }
    }
}
