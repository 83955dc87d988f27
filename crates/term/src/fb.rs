//! Framebuffer and style types for terminal rendering.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale each channel by `percent` / 100, saturating
    pub fn scaled(self, percent: u16) -> Self {
        let f = |c: u8| ((c as u16 * percent) / 100).min(255) as u8;
        Self::new(f(self.r), f(self.g), f(self.b))
    }
}

/// Minimal per-glyph styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn glyph(self, ch: char) -> Glyph {
        Glyph { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Glyph {
    fn default() -> Self {
        CellStyle::default().glyph(' ')
    }
}

/// 2D framebuffer of styled glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Glyph>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Glyph::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Glyph::default());
    }

    pub fn cells(&self) -> &[Glyph] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.idx(x as i32, y as i32).map(|i| self.cells[i])
    }

    /// Write one glyph; positions off the buffer (including negative) are dropped
    pub fn set(&mut self, x: i32, y: i32, glyph: Glyph) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = glyph;
        }
    }

    pub fn clear(&mut self, glyph: Glyph) {
        self.cells.fill(glyph);
    }

    pub fn put_char(&mut self, x: i32, y: i32, ch: char, style: CellStyle) {
        self.set(x, y, style.glyph(ch));
    }

    pub fn put_str(&mut self, x: i32, y: i32, s: &str, style: CellStyle) {
        for (i, ch) in s.chars().enumerate() {
            let cx = x + i as i32;
            if cx >= self.width as i32 {
                break;
            }
            self.put_char(cx, y, ch, style);
        }
    }

    /// Write `s` centred in the `w` columns starting at `x`
    pub fn put_str_centered(&mut self, x: i32, y: i32, w: i32, s: &str, style: CellStyle) {
        let len = s.chars().count() as i32;
        self.put_str(x + (w - len).max(0) / 2, y, s, style);
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, ch: char, style: CellStyle) {
        for dy in 0..h.max(0) {
            for dx in 0..w.max(0) {
                self.put_char(x + dx, y + dy, ch, style);
            }
        }
    }

    /// Rows of text, for assertions
    pub fn lines(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1) as usize)
            .map(|row| row.iter().map(|g| g.ch).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_outside_are_dropped() {
        let mut fb = FrameBuffer::new(3, 2);
        let style = CellStyle::default();
        fb.put_char(-1, 0, 'x', style);
        fb.put_char(3, 0, 'x', style);
        fb.put_char(0, 2, 'x', style);
        assert!(fb.cells().iter().all(|g| g.ch == ' '));
    }

    #[test]
    fn test_put_str_clips_and_centers() {
        let mut fb = FrameBuffer::new(6, 2);
        let style = CellStyle::default();
        fb.put_str(4, 0, "abc", style);
        fb.put_str_centered(0, 1, 6, "ok", style);
        assert_eq!(fb.lines(), vec!["    ab", "  ok  "]);
    }

    #[test]
    fn test_fill_rect_partially_offscreen() {
        let mut fb = FrameBuffer::new(3, 3);
        fb.fill_rect(-1, -1, 3, 3, '#', CellStyle::default());
        assert_eq!(fb.lines(), vec!["## ", "## ", "   "]);
    }

    #[test]
    fn test_rgb_scaled() {
        assert_eq!(Rgb::new(100, 200, 50).scaled(50), Rgb::new(50, 100, 25));
        assert_eq!(Rgb::new(200, 200, 200).scaled(150), Rgb::new(255, 255, 255));
    }
}
