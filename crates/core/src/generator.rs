//! Board generator - initial grids and spawned pieces
//!
//! Fills the grid row-major (top to bottom, left to right). Each cell rolls the blocker
//! chance first; otherwise it draws a color from the palette minus any color that would
//! complete a run of three with the two already-placed cells directly above or directly
//! to the left. Blockers never take part in that look-back, so a fresh grid has no run
//! of three ordinary pieces.
//!
//! Refills use [`spawn_piece`] with no exclusions, so they may create matches.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::rules::Rules;
use crate::types::{Color, Direction, Piece, Pos, Tile};

/// Generate a fully populated grid with no pre-existing match.
///
/// `rules` should have passed [`Rules::validate`]; with fewer than three colors the
/// exclusion rule can leave no candidate and the cell falls back to the whole palette.
pub fn generate(rules: &Rules, rng: &mut SimpleRng) -> Grid {
    let mut grid = Grid::new();

    for pos in Grid::positions() {
        let mut excluded: ArrayVec<Color, 2> = ArrayVec::new();
        for dir in [Direction::Up, Direction::Left] {
            if let Some(color) = pending_run_color(&grid, pos, dir) {
                excluded.push(color);
            }
        }

        let piece = spawn_piece(rng, rules, &excluded);
        grid.set(pos, Some(Tile::settled(piece)));
    }

    grid
}

/// Weighted random piece: a blocker with `rules.blocker_percent` chance, otherwise a
/// uniformly drawn palette color not listed in `excluded`.
pub fn spawn_piece(rng: &mut SimpleRng, rules: &Rules, excluded: &[Color]) -> Piece {
    if rng.chance_percent(rules.blocker_percent) {
        return Piece::Blocker;
    }

    let mut candidates: ArrayVec<Color, 6> = rules
        .palette()
        .iter()
        .copied()
        .filter(|c| !excluded.contains(c))
        .collect();
    if candidates.is_empty() {
        candidates = rules.palette().iter().copied().collect();
    }

    rng.pick(&candidates)
        .map(Piece::candy)
        .unwrap_or(Piece::Blocker)
}

/// Color shared by the two cells behind `pos` in direction `dir`, if they form a pair.
fn pending_run_color(grid: &Grid, pos: Pos, dir: Direction) -> Option<Color> {
    let near = pos.step(dir)?;
    let far = near.step(dir)?;
    let color = grid.color_at(near)?;
    (grid.color_at(far)? == color).then_some(color)
}
