//! Key and mouse mapping from terminal events to game actions.

use crate::types::{GameAction, Pos};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(GameAction::CursorLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(GameAction::CursorRight),
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(GameAction::CursorUp),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(GameAction::CursorDown),

        // Selection
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameAction::Select),
        KeyCode::Esc => Some(GameAction::Cancel),

        // New game
        KeyCode::Char('n') | KeyCode::Char('N') => Some(GameAction::NewGame),

        _ => None,
    }
}

/// Map a left click to a cell selection.
///
/// `hit_test` converts terminal coordinates (column, row) into a board position;
/// the renderer owns the layout, so it supplies this.
pub fn handle_mouse_event<F>(mouse: MouseEvent, hit_test: F) -> Option<GameAction>
where
    F: Fn(u16, u16) -> Option<Pos>,
{
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            hit_test(mouse.column, mouse.row).map(GameAction::SelectAt)
        }
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
