//! Session counters - score and move budget

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    score: u32,
    moves_remaining: u32,
}

impl Session {
    pub fn new(starting_moves: u32) -> Self {
        Self {
            score: 0,
            moves_remaining: starting_moves,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    /// Spend one move on an accepted swap
    pub fn record_move(&mut self) -> Result<(), EngineError> {
        if self.moves_remaining == 0 {
            return Err(EngineError::NoMovesRemaining);
        }
        self.moves_remaining -= 1;
        Ok(())
    }

    pub fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn is_game_over(&self) -> bool {
        self.moves_remaining == 0
    }
}
