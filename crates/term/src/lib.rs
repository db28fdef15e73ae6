//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids widget
//! toolkits and renders into a plain framebuffer that is diffed and flushed to the
//! terminal backend.
//!
//! - [`game_view`]: snapshot plus overlay into a framebuffer (pure, testable)
//! - [`fb`]: framebuffer and styles
//! - [`renderer`]: raw-mode terminal session and diff encoding

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{candy_rgb, BoardOverlay, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
