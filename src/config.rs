//! Runtime configuration for the terminal front-end.
//!
//! Everything is read from the environment; unset or unparseable values fall back to
//! the defaults in [`Rules`]. The combined rules are validated before a game starts.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::{EngineError, Rules};

/// Front-end configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// RNG seed for the first game
    pub seed: u32,
    pub rules: Rules,
    /// Log file; logging is off when unset
    pub log_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            rules: Rules::default(),
            log_path: None,
        }
    }
}

impl AppConfig {
    /// Create from environment variables
    ///
    /// - `MATCH3_SEED`: RNG seed (defaults to the clock, so every run differs)
    /// - `MATCH3_MOVES`: move budget per game
    /// - `MATCH3_PALETTE`: number of colors, 3 to 6
    /// - `MATCH3_BLOCKER_PERCENT`: blocker spawn chance, 0 to 100
    /// - `MATCH3_POINTS_PER_CELL`: points per cleared cell
    /// - `MATCH3_LOG_PATH`: write a game log to this file
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u32>().ok());
        let defaults = Rules::default();

        let seed = parse("MATCH3_SEED").unwrap_or_else(clock_seed);

        let rules = Rules {
            starting_moves: parse("MATCH3_MOVES").unwrap_or(defaults.starting_moves),
            palette_size: parse("MATCH3_PALETTE")
                .and_then(|v| u8::try_from(v).ok())
                .unwrap_or(defaults.palette_size),
            blocker_percent: parse("MATCH3_BLOCKER_PERCENT")
                .and_then(|v| u8::try_from(v).ok())
                .unwrap_or(defaults.blocker_percent),
            points_per_cell: parse("MATCH3_POINTS_PER_CELL").unwrap_or(defaults.points_per_cell),
            ..defaults
        };

        let log_path = lookup("MATCH3_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            seed,
            rules,
            log_path,
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.rules.validate()
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
