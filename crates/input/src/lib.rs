//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key and
//! mouse events into [`crate::types::GameAction`] and keeps the player's cursor and
//! selected cell, turning two picks of adjacent cells into a swap request.

pub mod handler;
pub mod map;

pub use tui_match3_types as types;

pub use handler::{Intent, SelectionHandler};
pub use map::{handle_key_event, handle_mouse_event, should_quit};
