//! `Canvas` implementation that draws into a [`FrameBuffer`].
//!
//! Board pixels map onto terminal cells at `TERM_TILE_COLS x TERM_TILE_ROWS`
//! cells per tile. Tiles are clipped to the board area so cells falling in
//! from above stay hidden until they enter the board; text and panels are not
//! clipped.

use crate::core::Canvas;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Rect, TileKind, Vec2, TERM_TILE_COLS, TERM_TILE_ROWS};

pub const BOARD_BG: Rgb = Rgb::new(24, 24, 34);
pub const PANEL_BG: Rgb = Rgb::new(40, 40, 56);

const TILE_COLORS: [Rgb; 8] = [
    Rgb::new(220, 70, 70),
    Rgb::new(80, 200, 100),
    Rgb::new(80, 130, 230),
    Rgb::new(240, 210, 70),
    Rgb::new(190, 100, 220),
    Rgb::new(80, 210, 210),
    Rgb::new(250, 150, 50),
    Rgb::new(230, 230, 230),
];

const TILE_GLYPHS: [char; 8] = ['●', '◆', '■', '★', '▲', '♥', '♣', '✚'];

/// Background color and glyph for a tile kind
pub fn tile_style(kind: TileKind) -> (Rgb, char) {
    let i = kind as usize % TILE_COLORS.len();
    (TILE_COLORS[i], TILE_GLYPHS[i])
}

pub struct TermCanvas<'a> {
    fb: &'a mut FrameBuffer,
    /// Terminal column/row of board pixel (0, 0)
    origin: (u16, u16),
    tile_size: i32,
    /// Board area in terminal cells: (col, row, cols, rows)
    clip: (i32, i32, i32, i32),
}

impl<'a> TermCanvas<'a> {
    pub fn new(
        fb: &'a mut FrameBuffer,
        origin: (u16, u16),
        tile_size: i32,
        board_cols: usize,
        board_rows: usize,
    ) -> Self {
        let clip = (
            origin.0 as i32,
            origin.1 as i32,
            board_cols as i32 * TERM_TILE_COLS as i32,
            board_rows as i32 * TERM_TILE_ROWS as i32,
        );
        Self {
            fb,
            origin,
            tile_size,
            clip,
        }
    }

    /// Terminal cell containing a board pixel
    pub fn to_term(&self, pixel: Vec2) -> (i32, i32) {
        let col = (pixel.x * TERM_TILE_COLS as i32).div_euclid(self.tile_size);
        let row = (pixel.y * TERM_TILE_ROWS as i32).div_euclid(self.tile_size);
        (self.origin.0 as i32 + col, self.origin.1 as i32 + row)
    }

    /// Span of terminal cells covered by `size` pixels, rounded to nearest
    fn span(&self, size: i32, cells_per_tile: u16) -> i32 {
        (size * cells_per_tile as i32 + self.tile_size / 2) / self.tile_size
    }

    fn in_clip(&self, x: i32, y: i32) -> bool {
        let (cx, cy, cw, ch) = self.clip;
        x >= cx && y >= cy && x < cx + cw && y < cy + ch
    }

    fn put_clipped(&mut self, x: i32, y: i32, ch: char, style: CellStyle) {
        if self.in_clip(x, y) {
            self.fb.put_char(x, y, ch, style);
        }
    }
}

impl Canvas for TermCanvas<'_> {
    fn draw_cell(&mut self, pos: Vec2, kind: TileKind, src_size: i32, dst_size: i32) {
        let w = self.span(dst_size, TERM_TILE_COLS);
        let h = self.span(dst_size, TERM_TILE_ROWS);
        if w <= 0 || h <= 0 {
            return;
        }

        let (color, glyph) = tile_style(kind);
        // Enlarged tiles are the pulsing selection.
        let highlighted = dst_size > src_size;
        let style = if highlighted {
            CellStyle::new(Rgb::new(255, 255, 255), color.scaled(130)).bold()
        } else {
            CellStyle::new(Rgb::new(20, 20, 20), color)
        };

        let (x, y) = self.to_term(pos);
        for dy in 0..h {
            for dx in 0..w {
                self.put_clipped(x + dx, y + dy, ' ', style);
            }
        }
        self.put_clipped(x + (w - 1) / 2, y + (h - 1) / 2, glyph, style);
        if highlighted {
            self.put_clipped(x, y + (h - 1) / 2, '[', style);
            self.put_clipped(x + w - 1, y + (h - 1) / 2, ']', style);
        }
    }

    fn draw_destroy_effect(&mut self, pos: Vec2, size: i32, progress: f64) {
        let w = self.span(size, TERM_TILE_COLS);
        let h = self.span(size, TERM_TILE_ROWS);
        let (x, y) = self.to_term(pos);

        let ch = match progress {
            p if p < 0.33 => '*',
            p if p < 0.66 => '+',
            _ => '·',
        };
        let style = CellStyle::new(Rgb::new(255, 240, 160), BOARD_BG).bold();
        for (cx, cy) in [(x, y), (x + w - 1, y), (x, y + h - 1), (x + w - 1, y + h - 1)] {
            self.put_clipped(cx, cy, ch, style);
        }
    }

    fn draw_background(&mut self, rect: Rect) {
        let (x, y) = self.to_term(Vec2::new(rect.x, rect.y));
        let w = self.span(rect.w, TERM_TILE_COLS);
        let h = self.span(rect.h, TERM_TILE_ROWS);
        self.fb
            .fill_rect(x, y, w, h, ' ', CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));
    }

    fn draw_text(&mut self, text: &str, rect: Rect, large: bool) {
        let (x, y) = self.to_term(Vec2::new(rect.x, rect.y));
        let mut style = CellStyle::new(Rgb::new(230, 230, 230), PANEL_BG);
        if large {
            style = style.bold();
        }
        self.fb.put_str(x, y, text, style);
    }
}
