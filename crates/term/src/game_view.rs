//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Matches};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{Color, Piece, Pos, StripeAxis, Tile, BOARD_COLS, BOARD_ROWS};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SELECTED_BG: Rgb = Rgb::new(90, 90, 120);
const PANEL_MIN_W: u16 = 14;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Front-end state drawn on top of the board.
///
/// None of this lives in the engine: the cursor and selection come from the input
/// handler, `clearing` from the cascade step being played back.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardOverlay<'a> {
    pub cursor: Option<Pos>,
    pub selected: Option<Pos>,
    pub clearing: Option<&'a Matches>,
    pub message: Option<&'a str>,
}

/// Where the board frame sits inside a viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the match-3 board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 4x2 keeps cells roughly square with typical terminal glyphs.
        Self {
            cell_w: 4,
            cell_h: 2,
        }
    }
}

impl GameView {
    fn layout(&self, viewport: Viewport) -> Layout {
        let w = (BOARD_COLS as u16) * self.cell_w + 2;
        let h = (BOARD_ROWS as u16) * self.cell_h + 2;
        // leave room for the side panel when there is any
        let total_w = w + 2 + PANEL_MIN_W;
        let x = if viewport.width >= total_w {
            (viewport.width - total_w) / 2
        } else {
            viewport.width.saturating_sub(w) / 2
        };
        Layout {
            x,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    /// Board cell under terminal coordinates (column, row), if any.
    pub fn hit_test(&self, viewport: Viewport, column: u16, row: u16) -> Option<Pos> {
        let layout = self.layout(viewport);
        let col = column.checked_sub(layout.x + 1)? / self.cell_w;
        let row = row.checked_sub(layout.y + 1)? / self.cell_h;
        let pos = Pos::new(u8::try_from(row).ok()?, u8::try_from(col).ok()?);
        pos.in_bounds().then_some(pos)
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is resized to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        overlay: &BoardOverlay<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default().glyph(' '));

        let layout = self.layout(viewport);
        let border = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        fb.fill_rect(
            layout.x + 1,
            layout.y + 1,
            layout.w - 2,
            layout.h - 2,
            ' ',
            Style::default().on(BOARD_BG),
        );
        fb.draw_box(layout.x, layout.y, layout.w, layout.h, border);

        for row in 0..BOARD_ROWS {
            for col in 0..BOARD_COLS {
                let pos = Pos::new(row, col);
                self.draw_cell(fb, layout, pos, snap.cell(pos), overlay);
            }
        }

        self.draw_side_panel(fb, snap, overlay, viewport, layout);

        if snap.game_over {
            let mid = layout.y + layout.h / 2;
            let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
            fb.put_str_centered(layout.x, mid.saturating_sub(1), layout.w, " GAME OVER ", style);
            fb.put_str_centered(layout.x, mid, layout.w, " press n ", style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        overlay: &BoardOverlay<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }

    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        pos: Pos,
        cell: Option<Tile>,
        overlay: &BoardOverlay<'_>,
    ) {
        let bg = if overlay.selected == Some(pos) {
            SELECTED_BG
        } else {
            BOARD_BG
        };
        let clearing = overlay.clearing.is_some_and(|m| m.contains(pos));

        let (ch, style) = match cell {
            None => ('·', Style::new(Rgb::new(90, 90, 100), bg).dim()),
            Some(_) if clearing => ('✦', Style::new(Rgb::new(255, 255, 255), bg).bold()),
            Some(tile) => tile_glyph(tile, bg),
        };

        let px = layout.x + 1 + (pos.col as u16) * self.cell_w;
        let py = layout.y + 1 + (pos.row as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);

        if overlay.cursor == Some(pos) && self.cell_w >= 2 {
            let mark = Style::new(Rgb::new(255, 255, 255), bg).bold();
            let right = px + self.cell_w - 1;
            for dy in 0..self.cell_h {
                fb.put_char(px, py + dy, '▏', mark);
                fb.put_char(right, py + dy, '▕', mark);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        overlay: &BoardOverlay<'_>,
        viewport: Viewport,
        layout: Layout,
    ) {
        let panel_x = layout.x.saturating_add(layout.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_W {
            return;
        }

        let label = Style::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let hint = value.dim();

        let mut y = layout.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MOVES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.moves_remaining, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "GAME", label);
        y = y.saturating_add(1);
        let x = fb.put_str(panel_x, y, "#", value);
        fb.put_u32(x, y, snap.game_id, value);
        y = y.saturating_add(2);

        for line in ["arrows move", "enter select", "esc cancel", "n new game", "q quit"] {
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }

        if let Some(message) = overlay.message {
            y = y.saturating_add(1);
            fb.put_str(panel_x, y, message, value.bold());
        }
    }
}

fn tile_glyph(tile: Tile, bg: Rgb) -> (char, Style) {
    match tile.piece {
        Piece::Blocker => ('▓', Style::new(Rgb::new(150, 150, 150), bg)),
        Piece::Candy { color, stripe } => {
            let mut fg = candy_rgb(color);
            if tile.just_spawned {
                fg = fg.lighten(60);
            }
            let ch = match stripe {
                None => '█',
                Some(StripeAxis::Horizontal) => '═',
                Some(StripeAxis::Vertical) => '║',
            };
            let style = Style::new(fg, bg);
            (ch, if stripe.is_some() { style.bold() } else { style })
        }
    }
}

pub fn candy_rgb(color: Color) -> Rgb {
    match color {
        Color::Blue => Rgb::new(80, 120, 220),
        Color::Green => Rgb::new(100, 220, 120),
        Color::Yellow => Rgb::new(240, 220, 80),
        Color::Orange => Rgb::new(255, 165, 0),
        Color::Red => Rgb::new(220, 80, 80),
        Color::Purple => Rgb::new(200, 120, 220),
    }
}
