//! Terminal match-3 (workspace facade crate).
//!
//! Re-exports `tui_match3::{core,input,term,types}` from the crates under `crates/` and
//! adds the front-end's configuration and logging.

pub mod config;
pub mod logging;

pub use tui_match3_core as core;
pub use tui_match3_input as input;
pub use tui_match3_term as term;
pub use tui_match3_types as types;
