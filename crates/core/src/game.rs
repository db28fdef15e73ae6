//! Game module - one playable session
//!
//! Owns the grid, the RNG, the rules and the counters. Front-ends talk to the engine
//! through this type: start a swap, play the cascade back step by step (or all at once)
//! and read snapshots for rendering. Selection state stays with the caller.

use crate::cascade::{Cascade, CascadeOutcome, CascadeStep};
use crate::error::EngineError;
use crate::generator::generate;
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::rules::Rules;
use crate::session::Session;
use crate::snapshot::GameSnapshot;
use crate::swap::{find_valid_swap, try_swap};
use crate::types::Pos;

#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    rng: SimpleRng,
    rules: Rules,
    session: Session,
    seed: u32,
    /// Monotonic game id (increments on restart).
    game_id: u32,
}

impl Game {
    /// Create a game with the given RNG seed and a freshly generated grid
    pub fn new(seed: u32, rules: Rules) -> Result<Self, EngineError> {
        rules.validate()?;
        let mut rng = SimpleRng::new(seed);
        let grid = generate(&rules, &mut rng);
        Ok(Self {
            grid,
            rng,
            session: Session::new(rules.starting_moves),
            rules,
            seed,
            game_id: 1,
        })
    }

    /// Start from a prepared grid instead of a generated one
    pub fn with_grid(grid: Grid, seed: u32, rules: Rules) -> Result<Self, EngineError> {
        rules.validate()?;
        if !grid.is_full() {
            return Err(EngineError::IncompleteGrid);
        }
        Ok(Self {
            grid,
            rng: SimpleRng::new(seed),
            session: Session::new(rules.starting_moves),
            rules,
            seed,
            game_id: 1,
        })
    }

    /// Throw away the board and counters and deal a new grid.
    ///
    /// The RNG carries on, so consecutive games differ.
    pub fn new_game(&mut self) {
        self.grid = generate(&self.rules, &mut self.rng);
        self.session = Session::new(self.rules.starting_moves);
        self.game_id = self.game_id.wrapping_add(1);
    }

    /// Attempt a swap.
    ///
    /// Returns the cascade to play back if the swap was accepted (one move spent), or
    /// `None` if it made no match and was undone.
    pub fn begin_swap(&mut self, a: Pos, b: Pos) -> Result<Option<Cascade>, EngineError> {
        if self.session.is_game_over() {
            return Err(EngineError::NoMovesRemaining);
        }

        let outcome = try_swap(&mut self.grid, a, b)?;
        if !outcome.accepted {
            return Ok(None);
        }

        self.session.record_move()?;
        Ok(Some(Cascade::new(outcome.matches)))
    }

    /// Run the next step of `cascade` and bank its points
    pub fn advance(&mut self, cascade: &mut Cascade) -> Result<Option<CascadeStep>, EngineError> {
        let step = cascade.step(&mut self.grid, &self.rules, &mut self.rng)?;
        if let Some(step) = &step {
            self.session.add_points(step.points);
        }
        Ok(step)
    }

    /// Swap and resolve the whole cascade in one call
    pub fn play_swap(&mut self, a: Pos, b: Pos) -> Result<Option<CascadeOutcome>, EngineError> {
        let Some(mut cascade) = self.begin_swap(a, b)? else {
            return Ok(None);
        };
        while self.advance(&mut cascade)?.is_some() {}
        Ok(Some(cascade.outcome()))
    }

    /// Some swap that would be accepted on the current board
    pub fn hint(&self) -> Option<(Pos, Pos)> {
        find_valid_swap(&self.grid)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn moves_remaining(&self) -> u32 {
        self.session.moves_remaining()
    }

    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.write_grid(&self.grid);
        out.score = self.session.score();
        out.moves_remaining = self.session.moves_remaining();
        out.game_over = self.session.is_game_over();
        out.game_id = self.game_id;
        out.seed = self.seed;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
