//! Swap operator - exchange two adjacent cells, keep the swap only if it matches
//!
//! Contract checks run before anything is touched, so a rejected request never
//! leaves the grid half-modified. Move and score bookkeeping belongs to the caller.

use crate::error::EngineError;
use crate::grid::Grid;
use crate::matcher::{detect, Matches};
use crate::types::{Direction, Pos};

/// Result of a legal swap request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOutcome {
    /// True if the swap produced at least one match and was kept
    pub accepted: bool,
    /// Matches created by the swap (empty when rejected)
    pub matches: Matches,
}

/// Validate a swap request without touching the grid.
pub fn check_swap(grid: &Grid, a: Pos, b: Pos) -> Result<(), EngineError> {
    for pos in [a, b] {
        if !pos.in_bounds() {
            return Err(EngineError::OutOfBounds {
                row: pos.row,
                col: pos.col,
            });
        }
    }
    if !a.is_adjacent(b) {
        return Err(EngineError::NotAdjacent { a, b });
    }
    if !grid.is_full() {
        return Err(EngineError::IncompleteGrid);
    }
    Ok(())
}

/// Swap the cells at `a` and `b` and keep the result only if it creates a match.
///
/// On rejection the grid is restored to its previous contents.
pub fn try_swap(grid: &mut Grid, a: Pos, b: Pos) -> Result<SwapOutcome, EngineError> {
    check_swap(grid, a, b)?;

    grid.swap(a, b);
    let matches = detect(grid);

    if matches.is_empty() {
        grid.swap(a, b);
        return Ok(SwapOutcome {
            accepted: false,
            matches,
        });
    }

    Ok(SwapOutcome {
        accepted: true,
        matches,
    })
}

/// First swap, in row-major order, that would be accepted on `grid`.
///
/// Tries each cell with its right and lower neighbour on a scratch copy.
pub fn find_valid_swap(grid: &Grid) -> Option<(Pos, Pos)> {
    if !grid.is_full() {
        return None;
    }
    let mut scratch = *grid;
    for a in Grid::positions() {
        for dir in [Direction::Right, Direction::Down] {
            let Some(b) = a.step(dir) else {
                continue;
            };
            scratch.swap(a, b);
            let found = !detect(&scratch).is_empty();
            scratch.swap(a, b);
            if found {
                return Some((a, b));
            }
        }
    }
    None
}
