//! Match detector - finds the cells to clear in one detection pass
//!
//! Three passes, combined by position:
//!
//! 1. **Horizontal**: each row left to right. An ordinary piece starts a run; the run
//!    extends over consecutive ordinary pieces of the same color (stripes are ignored).
//!    Runs of 3+ match and the scan jumps past them, so segmentation is greedy and
//!    non-overlapping. A run of exactly 4 marks its leftmost cell as a special seed.
//! 2. **Vertical**: the same over columns, top to bottom; seeds mark the top cell.
//! 3. **Blockers**: every blocker orthogonally adjacent to a cell from passes 1-2 joins
//!    the set. Blockers added this way do not pull in further blockers.
//!
//! A position is listed at most once and keeps the marking from the pass that reached it
//! first. Detection is a pure function of the grid.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::types::{
    Color, Direction, Pos, StripeAxis, BOARD_COLS, BOARD_ROWS, GRID_CELLS, MIN_RUN, SPECIAL_RUN,
};

/// One cell selected in a detection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchEntry {
    pub pos: Pos,
    /// Set on the seed of a 4-run: the cell becomes a striped piece instead of clearing.
    pub special: Option<StripeAxis>,
}

impl MatchEntry {
    pub const fn plain(pos: Pos) -> Self {
        Self { pos, special: None }
    }

    pub const fn seed(pos: Pos, axis: StripeAxis) -> Self {
        Self {
            pos,
            special: Some(axis),
        }
    }

    pub fn is_special_seed(&self) -> bool {
        self.special.is_some()
    }
}

/// Position-deduplicated match list in scan order.
///
/// Bounded by the grid size, so it never allocates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matches {
    entries: ArrayVec<MatchEntry, GRID_CELLS>,
    present: [bool; GRID_CELLS],
}

impl Matches {
    pub fn new() -> Self {
        Self {
            entries: ArrayVec::new(),
            present: [false; GRID_CELLS],
        }
    }

    #[inline(always)]
    fn slot(pos: Pos) -> Option<usize> {
        pos.in_bounds()
            .then(|| (pos.row as usize) * (BOARD_COLS as usize) + (pos.col as usize))
    }

    /// Add an entry unless its position is already present (or off the board).
    /// Returns true if the entry was added.
    pub fn insert(&mut self, entry: MatchEntry) -> bool {
        let Some(slot) = Self::slot(entry.pos) else {
            return false;
        };
        if self.present[slot] {
            return false;
        }
        self.present[slot] = true;
        self.entries.push(entry);
        true
    }

    pub fn contains(&self, pos: Pos) -> bool {
        Self::slot(pos).map(|slot| self.present[slot]).unwrap_or(false)
    }

    pub fn get(&self, pos: Pos) -> Option<&MatchEntry> {
        if !self.contains(pos) {
            return None;
        }
        self.entries.iter().find(|e| e.pos == pos)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MatchEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchEntry> {
        self.entries.iter()
    }

    /// Entries that seed a striped piece
    pub fn seeds(&self) -> impl Iterator<Item = &MatchEntry> {
        self.entries.iter().filter(|e| e.is_special_seed())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.present = [false; GRID_CELLS];
    }
}

impl Default for Matches {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Matches {
    type Item = &'a MatchEntry;
    type IntoIter = std::slice::Iter<'a, MatchEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<MatchEntry> for Matches {
    fn from_iter<I: IntoIterator<Item = MatchEntry>>(iter: I) -> Self {
        let mut matches = Matches::new();
        for entry in iter {
            matches.insert(entry);
        }
        matches
    }
}

/// Scan `grid` and return every cell that must be cleared (or striped) this step.
pub fn detect(grid: &Grid) -> Matches {
    let mut matches = Matches::new();
    detect_into(grid, &mut matches);
    matches
}

/// Allocation-free variant of [`detect`] that reuses `out`.
pub fn detect_into(grid: &Grid, out: &mut Matches) {
    out.clear();

    scan_runs(grid, StripeAxis::Horizontal, out);
    scan_runs(grid, StripeAxis::Vertical, out);

    let run_cells = out.len();
    for i in 0..run_cells {
        let pos = out.entries[i].pos;
        for neighbor in grid.neighbors(pos) {
            if grid.is_blocker_at(neighbor) {
                out.insert(MatchEntry::plain(neighbor));
            }
        }
    }
}

fn scan_runs(grid: &Grid, axis: StripeAxis, out: &mut Matches) {
    let (lines, line_len, dir) = match axis {
        StripeAxis::Horizontal => (BOARD_ROWS, BOARD_COLS, Direction::Right),
        StripeAxis::Vertical => (BOARD_COLS, BOARD_ROWS, Direction::Down),
    };
    let at = |line: u8, i: u8| match axis {
        StripeAxis::Horizontal => Pos::new(line, i),
        StripeAxis::Vertical => Pos::new(i, line),
    };

    for line in 0..lines {
        let mut i = 0u8;
        while i < line_len {
            let start = at(line, i);
            let Some(color) = grid.color_at(start) else {
                i += 1;
                continue;
            };

            let run = run_length(grid, start, dir, color);
            if run < MIN_RUN {
                i += 1;
                continue;
            }

            for k in 0..run as u8 {
                let pos = at(line, i + k);
                let entry = if run == SPECIAL_RUN && k == 0 {
                    MatchEntry::seed(pos, axis)
                } else {
                    MatchEntry::plain(pos)
                };
                out.insert(entry);
            }
            i += run as u8;
        }
    }
}

/// Length of the same-color run starting at `start` and extending in `dir`.
fn run_length(grid: &Grid, start: Pos, dir: Direction, color: Color) -> usize {
    let mut len = 1;
    let mut pos = start;
    while let Some(next) = pos.step(dir) {
        if grid.color_at(next) != Some(color) {
            break;
        }
        len += 1;
        pos = next;
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Piece, Tile};

    // (row + col) % 4 pattern: no run anywhere.
    const CALM: [&str; 6] = [
        "BGYOBGY",
        "GYOBGYO",
        "YOBGYOB",
        "OBGYOBG",
        "BGYOBGY",
        "GYOBGYO",
    ];

    fn board(rows: [&str; 6]) -> Grid {
        Grid::from_ascii(&rows).unwrap()
    }

    fn positions(matches: &Matches) -> Vec<(u8, u8)> {
        matches.iter().map(|e| (e.pos.row, e.pos.col)).collect()
    }

    #[test]
    fn calm_board_has_no_matches() {
        assert!(detect(&board(CALM)).is_empty());
    }

    #[test]
    fn horizontal_three() {
        let grid = board([
            "BGYOBGY",
            "GYOBGYO",
            "RRROBYB",
            "OBGYOBG",
            "BGYOBGY",
            "GYOBGYO",
        ]);
        let m = detect(&grid);
        assert_eq!(positions(&m), vec![(2, 0), (2, 1), (2, 2)]);
        assert_eq!(m.seeds().count(), 0);
    }

    #[test]
    fn horizontal_four_seeds_leftmost() {
        let grid = board([
            "BGYOBGY",
            "GYOBGYO",
            "YRRRROB",
            "OBGYOBG",
            "BGYOBGY",
            "GYOBGYO",
        ]);
        let m = detect(&grid);
        assert_eq!(m.len(), 4);
        assert_eq!(
            m.get(Pos::new(2, 1)),
            Some(&MatchEntry::seed(Pos::new(2, 1), StripeAxis::Horizontal))
        );
        for col in 2..=4 {
            assert!(!m.get(Pos::new(2, col)).unwrap().is_special_seed());
        }
    }

    #[test]
    fn vertical_four_seeds_topmost() {
        let grid = board([
            "BGYOBGY",
            "GYORGYO",
            "YOBRYOB",
            "OBGRYBG",
            "BGYRBGY",
            "GYOBGYO",
        ]);
        let m = detect(&grid);
        assert_eq!(positions(&m), vec![(1, 3), (2, 3), (3, 3), (4, 3)]);
        assert_eq!(m.entries()[0].special, Some(StripeAxis::Vertical));
    }

    #[test]
    fn run_of_five_has_no_seed() {
        let grid = board([
            "BGYOBGY",
            "GYOBGYO",
            "RRRRROB",
            "OBGYOBG",
            "BGYOBGY",
            "GYOBGYO",
        ]);
        let m = detect(&grid);
        assert_eq!(m.len(), 5);
        assert_eq!(m.seeds().count(), 0);
    }

    #[test]
    fn row_of_seven_is_one_run() {
        let grid = board([
            "BGYOBGY",
            "GYOBGYO",
            "RRRRRRR",
            "OBGYOBG",
            "BGYOBGY",
            "GYOBGYO",
        ]);
        let m = detect(&grid);
        assert_eq!(m.len(), 7);
        assert_eq!(m.seeds().count(), 0);
    }

    #[test]
    fn two_separate_runs_in_one_row() {
        let grid = board([
            "BGYOBGY",
            "GYOBGYO",
            "RRRYRRR",
            "OBGOOBG",
            "BGYOBGY",
            "GYOBGYO",
        ]);
        let m = detect(&grid);
        assert_eq!(
            positions(&m),
            vec![(2, 0), (2, 1), (2, 2), (2, 4), (2, 5), (2, 6)]
        );
    }

    #[test]
    fn crossing_runs_share_a_cell_once() {
        // Row 2 cols 1..=3 and column 2 rows 0..=2 share (2, 2).
        let grid = board([
            "BGROBGY",
            "GYROGYO",
            "YRRRYOB",
            "OBGYOBG",
            "BGYOBGY",
            "GYOBGYO",
        ]);
        let m = detect(&grid);
        assert_eq!(m.len(), 5);
        assert_eq!(
            positions(&m),
            vec![(2, 1), (2, 2), (2, 3), (0, 2), (1, 2)]
        );
    }

    #[test]
    fn horizontal_marking_wins_over_vertical_seed() {
        // Row 1 cols 0..=2 is a 3-run; column 0 rows 1..=4 is a 4-run seeded at (1, 0).
        let grid = board([
            "BGYOBGY",
            "RRRBGYO",
            "ROBGYOB",
            "RBGYOBG",
            "RGYOBGY",
            "GYOBGYO",
        ]);
        let m = detect(&grid);
        let top = m.get(Pos::new(1, 0)).unwrap();
        assert!(!top.is_special_seed(), "first marking (plain) must stick");
        assert_eq!(m.len(), 6);
        assert_eq!(m.seeds().count(), 0);
    }

    #[test]
    fn adjacent_blocker_joins_without_seed() {
        let grid = board([
            "BGYOBGY",
            "GYOBGYO",
            "YOBGYOB",
            "ORRR#BG",
            "BGYOBGY",
            "GYOBGYO",
        ]);
        let m = detect(&grid);
        assert_eq!(m.len(), 4);
        let blocker = m.get(Pos::new(3, 4)).unwrap();
        assert!(!blocker.is_special_seed());
        // Blockers are listed after every run cell.
        assert_eq!(m.entries()[3].pos, Pos::new(3, 4));
    }

    #[test]
    fn blocker_touching_two_matched_cells_is_listed_once() {
        // (2, 3) sits inside the corner of a row run and a column run.
        let grid = board([
            "BGYORGY",
            "GYOBRYO",
            "YOB#ROB",
            "ORRRYBG",
            "BGYOBGY",
            "GYOBGYO",
        ]);
        let m = detect(&grid);
        assert_eq!(m.len(), 7);
        assert_eq!(m.iter().filter(|e| e.pos == Pos::new(2, 3)).count(), 1);
        assert_eq!(m.entries()[6], MatchEntry::plain(Pos::new(2, 3)));
    }

    #[test]
    fn blockers_do_not_chain() {
        let grid = board([
            "BGYOBGY",
            "GYOBGYO",
            "YOBGYOB",
            "ORRR##G",
            "BGYOBGY",
            "GYOBGYO",
        ]);
        let m = detect(&grid);
        assert!(m.contains(Pos::new(3, 4)));
        assert!(!m.contains(Pos::new(3, 5)));
    }

    #[test]
    fn blockers_break_runs() {
        let grid = board([
            "BGYOBGY",
            "GYOBGYO",
            "RR#RROB",
            "OBGYOBG",
            "BGYOBGY",
            "GYOBGYO",
        ]);
        assert!(detect(&grid).is_empty());
    }

    #[test]
    fn empties_break_runs() {
        let mut grid = board([
            "BGYOBGY",
            "GYOBGYO",
            "RRRYOOB",
            "OBGYOBG",
            "BGYOBGY",
            "GYOBGYO",
        ]);
        grid.set(Pos::new(2, 1), None);
        assert!(detect(&grid).is_empty());
    }

    #[test]
    fn striped_pieces_match_by_color() {
        let mut grid = board([
            "BGYOBGY",
            "GYOBGYO",
            "RRROBYB",
            "OBGYOBG",
            "BGYOBGY",
            "GYOBGYO",
        ]);
        grid.set(
            Pos::new(2, 1),
            Some(Tile::settled(Piece::striped(crate::types::Color::Red, StripeAxis::Vertical))),
        );
        assert_eq!(detect(&grid).len(), 3);
    }

    #[test]
    fn detect_into_reuses_buffer() {
        let grid = board([
            "BGYOBGY",
            "GYOBGYO",
            "RRROBYB",
            "OBGYOBG",
            "BGYOBGY",
            "GYOBGYO",
        ]);
        let mut buf = detect(&grid);
        detect_into(&board(CALM), &mut buf);
        assert!(buf.is_empty());
        assert!(!buf.contains(Pos::new(2, 0)));
        detect_into(&grid, &mut buf);
        assert_eq!(buf, detect(&grid));
    }

    #[test]
    fn matches_dedup_by_position() {
        let mut m = Matches::new();
        assert!(m.insert(MatchEntry::seed(Pos::new(1, 1), StripeAxis::Vertical)));
        assert!(!m.insert(MatchEntry::plain(Pos::new(1, 1))));
        assert!(!m.insert(MatchEntry::plain(Pos::new(9, 9))));
        assert_eq!(m.len(), 1);
        assert!(m.get(Pos::new(1, 1)).unwrap().is_special_seed());

        let collected: Matches = [
            MatchEntry::plain(Pos::new(0, 0)),
            MatchEntry::plain(Pos::new(0, 0)),
            MatchEntry::plain(Pos::new(0, 1)),
        ]
        .into_iter()
        .collect();
        assert_eq!(collected.len(), 2);
    }
}
