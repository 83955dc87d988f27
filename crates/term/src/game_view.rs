//! GameView: draws a running [`World`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). The world paints itself through
//! [`TermCanvas`]; the view adds the frame around the board, the keyboard
//! cursor and the footer.

use crate::canvas::{TermCanvas, BOARD_BG};
use crate::core::World;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Vec2, TERM_TILE_COLS, TERM_TILE_ROWS};

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

/// Terminal columns reserved right of the board for the mode panel
const PANEL_COLS: u16 = 24;

/// Where the board landed for a given viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Terminal cell of board pixel (0, 0)
    pub origin: (u16, u16),
    pub width: u16,
    pub height: u16,
}

/// Per-frame status not owned by the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameStatus<'a> {
    /// Tile under the keyboard cursor
    pub cursor: Option<Vec2>,
    pub music_on: bool,
    pub now_playing: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GameView;

impl GameView {
    /// Centre board plus panel in the viewport, leaving room for the frame.
    pub fn layout(&self, world: &World, viewport: Viewport) -> BoardLayout {
        let width = cells_spanned(world.board().cols(), TERM_TILE_COLS);
        let height = cells_spanned(world.board().rows(), TERM_TILE_ROWS);
        let total_w = width.saturating_add(2 + PANEL_COLS);
        let total_h = height.saturating_add(2);
        let x = viewport.width.saturating_sub(total_w) / 2 + 1;
        let y = viewport.height.saturating_sub(total_h.saturating_add(1)) / 2 + 1;
        BoardLayout {
            origin: (x, y),
            width,
            height,
        }
    }

    /// Render into an existing framebuffer; returns the layout used so the
    /// caller can map mouse positions back onto the board.
    pub fn render_into(
        &self,
        world: &World,
        status: GameStatus<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) -> BoardLayout {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let layout = self.layout(world, viewport);
        let (x, y) = (layout.origin.0 as i32, layout.origin.1 as i32);
        let (w, h) = (layout.width as i32, layout.height as i32);

        fb.fill_rect(x, y, w, h, ' ', CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG));
        draw_border(fb, x - 1, y - 1, w + 2, h + 2);

        let tile_size = world.config().tile_size;
        let (cols, rows) = (world.board().cols(), world.board().rows());
        world.draw(&mut TermCanvas::new(fb, layout.origin, tile_size, cols, rows));

        if let Some(cursor) = status.cursor.filter(|&c| world.board().contains(c)) {
            draw_cursor(fb, &layout, cursor);
        }

        let dim = CellStyle::default().dim();
        let hint = "mouse/arrows move  Enter swap  Esc menu  m music  q quit";
        let footer_y = viewport.height as i32 - 1;
        fb.put_str_centered(0, footer_y, viewport.width as i32, hint, dim);
        if status.music_on {
            if let Some(track) = status.now_playing {
                fb.put_str(x - 1, y + h + 1, &format!("♪ {track}"), dim);
            }
        }

        layout
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, world: &World, status: GameStatus<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(world, status, viewport, &mut fb);
        fb
    }
}

/// Terminal cells covered by `tiles` tiles, saturating at `u16::MAX`
fn cells_spanned(tiles: usize, cells_per_tile: u16) -> u16 {
    u16::try_from(tiles.saturating_mul(cells_per_tile as usize)).unwrap_or(u16::MAX)
}

fn draw_border(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32) {
    if w < 2 || h < 2 {
        return;
    }
    let style = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Corner brackets over a tile, keeping the tile's background
fn draw_cursor(fb: &mut FrameBuffer, layout: &BoardLayout, cursor: Vec2) {
    let x = layout
        .origin
        .0
        .saturating_add(cells_spanned(cursor.x.max(0) as usize, TERM_TILE_COLS));
    let y = layout
        .origin
        .1
        .saturating_add(cells_spanned(cursor.y.max(0) as usize, TERM_TILE_ROWS));
    let right = x.saturating_add(TERM_TILE_COLS - 1);
    let bottom = y.saturating_add(TERM_TILE_ROWS - 1);

    for (cx, cy, ch) in [(x, y, '┏'), (right, y, '┓'), (x, bottom, '┗'), (right, bottom, '┛')] {
        let bg = fb.get(cx, cy).map(|g| g.style.bg).unwrap_or_default();
        let style = CellStyle::new(Rgb::new(255, 255, 255), bg).bold();
        fb.put_char(cx as i32, cy as i32, ch, style);
    }
}
