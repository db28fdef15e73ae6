//! Selection handler - cursor and picked cell for a swap.
//!
//! The engine never sees a half-made selection. The first pick is remembered here;
//! picking an orthogonal neighbour emits a swap request, picking any other cell moves
//! the selection there instead.

use crate::types::{GameAction, Pos, BOARD_COLS, BOARD_ROWS};

/// Request for the engine produced by the player's input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Swap(Pos, Pos),
    NewGame,
}

#[derive(Debug, Clone)]
pub struct SelectionHandler {
    cursor: Pos,
    selected: Option<Pos>,
}

impl SelectionHandler {
    pub fn new() -> Self {
        Self {
            cursor: Pos::new(BOARD_ROWS / 2, BOARD_COLS / 2),
            selected: None,
        }
    }

    pub fn cursor(&self) -> Pos {
        self.cursor
    }

    pub fn selected(&self) -> Option<Pos> {
        self.selected
    }

    /// Apply one action. Returns the request to forward to the engine, if any.
    pub fn handle(&mut self, action: GameAction) -> Option<Intent> {
        match action {
            GameAction::CursorUp => self.move_cursor(-1, 0),
            GameAction::CursorDown => self.move_cursor(1, 0),
            GameAction::CursorLeft => self.move_cursor(0, -1),
            GameAction::CursorRight => self.move_cursor(0, 1),
            GameAction::Select => return self.pick(self.cursor),
            GameAction::SelectAt(pos) => {
                if !pos.in_bounds() {
                    return None;
                }
                self.cursor = pos;
                return self.pick(pos);
            }
            GameAction::Cancel => self.selected = None,
            GameAction::NewGame => {
                self.selected = None;
                return Some(Intent::NewGame);
            }
        }
        None
    }

    fn move_cursor(&mut self, dr: i8, dc: i8) {
        let row = (self.cursor.row as i8 + dr).clamp(0, BOARD_ROWS as i8 - 1);
        let col = (self.cursor.col as i8 + dc).clamp(0, BOARD_COLS as i8 - 1);
        self.cursor = Pos::new(row as u8, col as u8);
    }

    fn pick(&mut self, pos: Pos) -> Option<Intent> {
        match self.selected {
            Some(first) if first.is_adjacent(pos) => {
                self.selected = None;
                Some(Intent::Swap(first, pos))
            }
            _ => {
                self.selected = Some(pos);
                None
            }
        }
    }
}

impl Default for SelectionHandler {
    fn default() -> Self {
        Self::new()
    }
}
