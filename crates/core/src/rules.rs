//! Per-game tunables.
//!
//! Defaults come from the constants in [`crate::types`]; front-ends may override them
//! (see `tui_match3::config`) and must call [`Rules::validate`] before use.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::types::{
    Color, BLOCKER_PERCENT, DEFAULT_PALETTE_SIZE, GRID_CELLS, INITIAL_MOVES, MIN_PALETTE_SIZE,
    POINTS_PER_CELL,
};

static PALETTE: [Color; 6] = Color::ALL;

/// Game rules shared by the generator, the cascade resolver and the session counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rules {
    /// Number of ordinary colors in play (prefix of [`Color::ALL`])
    pub palette_size: u8,
    /// Chance, in percent, that a spawned piece is a blocker
    pub blocker_percent: u8,
    /// Move budget of a new game
    pub starting_moves: u32,
    /// Points per matched cell
    pub points_per_cell: u32,
    /// Upper bound on cascade steps after a single swap
    pub max_cascade_steps: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            palette_size: DEFAULT_PALETTE_SIZE,
            blocker_percent: BLOCKER_PERCENT,
            starting_moves: INITIAL_MOVES,
            points_per_cell: POINTS_PER_CELL,
            max_cascade_steps: (GRID_CELLS as u32) * 4,
        }
    }
}

impl Rules {
    /// Colors in play
    pub fn palette(&self) -> &'static [Color] {
        let n = (self.palette_size as usize).min(PALETTE.len());
        &PALETTE[..n]
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.palette_size < MIN_PALETTE_SIZE {
            return Err(EngineError::InvalidRules("palette_size must be at least 3"));
        }
        if self.palette_size as usize > Color::ALL.len() {
            return Err(EngineError::InvalidRules("palette_size must be at most 6"));
        }
        if self.blocker_percent > 100 {
            return Err(EngineError::InvalidRules("blocker_percent must be between 0 and 100"));
        }
        if self.max_cascade_steps == 0 {
            return Err(EngineError::InvalidRules("max_cascade_steps must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let rules = Rules::default();
        assert_eq!(rules.validate(), Ok(()));
        assert_eq!(
            rules.palette(),
            &[Color::Blue, Color::Green, Color::Yellow, Color::Orange]
        );
        assert_eq!(rules.max_cascade_steps, 168);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let small = Rules {
            palette_size: 2,
            ..Rules::default()
        };
        assert!(matches!(small.validate(), Err(EngineError::InvalidRules(_))));

        let large = Rules {
            palette_size: 7,
            ..Rules::default()
        };
        assert!(large.validate().is_err());

        let blockers = Rules {
            blocker_percent: 101,
            ..Rules::default()
        };
        assert!(blockers.validate().is_err());

        let unbounded = Rules {
            max_cascade_steps: 0,
            ..Rules::default()
        };
        assert!(unbounded.validate().is_err());
    }

    #[test]
    fn full_palette() {
        let rules = Rules {
            palette_size: 6,
            ..Rules::default()
        };
        assert_eq!(rules.palette().len(), 6);
    }
}
