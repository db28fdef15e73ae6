//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the match-3 rules: board generation, swaps, match detection,
//! cascades and the session counters. It has no dependency on UI or I/O, so the same
//! engine drives the terminal front-end, the tests and the benches.
//!
//! # Module Structure
//!
//! - [`grid`]: 6x7 playfield with gravity
//! - [`generator`]: initial grids without pre-existing matches, weighted spawns
//! - [`swap`]: adjacent swaps that only stick when they create a match
//! - [`matcher`]: horizontal/vertical runs, 4-run seeds and adjacent blockers
//! - [`cascade`]: clear, gravity, refill and re-detect until stable
//! - [`session`]: score and move budget
//! - [`game`]: everything above wired into one session
//! - [`rng`]: seeded LCG so every game is reproducible
//!
//! # Game Rules
//!
//! - **Runs**: 3+ same-colored ordinary pieces in a row or column clear
//! - **Striped pieces**: a run of exactly 4 leaves a striped piece where it started
//! - **Blockers**: never match, but clear when next to a matched cell
//! - **Cascades**: pieces fall, the holes refill, new matches clear as well
//! - **Moves**: each accepted swap costs one move; the game ends at zero
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{Game, Rules};
//!
//! let mut game = Game::new(12345, Rules::default()).unwrap();
//! if let Some((a, b)) = game.hint() {
//!     let outcome = game.play_swap(a, b).unwrap().unwrap();
//!     assert_eq!(game.score(), outcome.points);
//!     assert_eq!(game.moves_remaining(), 63);
//! }
//! ```

pub mod cascade;
pub mod error;
pub mod game;
pub mod generator;
pub mod grid;
pub mod matcher;
pub mod rng;
pub mod rules;
pub mod session;
pub mod snapshot;
pub mod swap;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use cascade::{resolve, Cascade, CascadeOutcome, CascadeStep};
pub use error::EngineError;
pub use game::Game;
pub use generator::{generate, spawn_piece};
pub use grid::Grid;
pub use matcher::{detect, detect_into, MatchEntry, Matches};
pub use rng::SimpleRng;
pub use rules::Rules;
pub use session::Session;
pub use snapshot::{board_hash, GameSnapshot};
pub use swap::{find_valid_swap, try_swap, SwapOutcome};
