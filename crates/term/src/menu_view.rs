//! Main menu: item list, leaderboard screen, and their rendering.
//!
//! Pure (no I/O); the runner feeds it commands and clicks.

use crate::core::{format_seconds, Leaderboard};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;
use crate::types::GameModeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Resume,
    Classic,
    QuickDeath,
    Leaderboard,
    ToggleMusic,
    Quit,
    /// Leaves the leaderboard screen
    Back,
}

impl MenuItem {
    pub fn label(self, music_on: bool) -> &'static str {
        match self {
            MenuItem::Resume => "Resume Game",
            MenuItem::Classic => "Play Classic",
            MenuItem::QuickDeath => "Play Quick Death",
            MenuItem::Leaderboard => "Show Leaderboard",
            MenuItem::ToggleMusic if music_on => "Music is ON",
            MenuItem::ToggleMusic => "Music is OFF",
            MenuItem::Quit => "Quit Game",
            MenuItem::Back => "Back",
        }
    }
}

const MAIN_ITEMS: [MenuItem; 5] = [
    MenuItem::Classic,
    MenuItem::QuickDeath,
    MenuItem::Leaderboard,
    MenuItem::ToggleMusic,
    MenuItem::Quit,
];

const LEADERBOARD_ITEMS: [MenuItem; 2] = [MenuItem::ToggleMusic, MenuItem::Back];

#[derive(Debug, Clone)]
pub struct Menu {
    resumable: bool,
    showing_leaderboard: bool,
    cursor: usize,
    message: Vec<String>,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl Menu {
    pub fn new() -> Self {
        Self {
            resumable: false,
            showing_leaderboard: false,
            cursor: 0,
            message: Vec::new(),
        }
    }

    /// Show the main screen, optionally offering Resume, with extra lines
    /// (e.g. the last game's summary) above the items
    pub fn activate(&mut self, resumable: bool, message: Vec<String>) {
        self.resumable = resumable;
        self.showing_leaderboard = false;
        self.cursor = 0;
        self.message = message;
    }

    pub fn items(&self) -> Vec<MenuItem> {
        if self.showing_leaderboard {
            return LEADERBOARD_ITEMS.to_vec();
        }
        let mut items = Vec::with_capacity(MAIN_ITEMS.len() + 1);
        if self.resumable {
            items.push(MenuItem::Resume);
        }
        items.extend(MAIN_ITEMS);
        items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn message(&self) -> &[String] {
        &self.message
    }

    pub fn is_resumable(&self) -> bool {
        self.resumable
    }

    pub fn is_showing_leaderboard(&self) -> bool {
        self.showing_leaderboard
    }

    /// Move the cursor, wrapping at both ends
    pub fn move_cursor(&mut self, delta: i32) {
        let len = self.items().len() as i32;
        self.cursor = (self.cursor as i32 + delta).rem_euclid(len) as usize;
    }

    pub fn set_cursor(&mut self, index: usize) {
        if index < self.items().len() {
            self.cursor = index;
        }
    }

    pub fn selected(&self) -> MenuItem {
        let items = self.items();
        items[self.cursor.min(items.len() - 1)]
    }

    pub fn show_leaderboard(&mut self) {
        self.showing_leaderboard = true;
        self.cursor = LEADERBOARD_ITEMS.len() - 1;
    }

    pub fn hide_leaderboard(&mut self) {
        self.showing_leaderboard = false;
        self.cursor = 0;
    }
}

/// Status shown at the bottom of the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuStatus<'a> {
    pub music_on: bool,
    pub now_playing: Option<&'a str>,
}

const TITLE: &str = "M A T C H  3";
const ITEM_WIDTH: u16 = 24;

#[derive(Debug, Clone, Copy, Default)]
pub struct MenuView;

impl MenuView {
    /// Terminal row of every item, top to bottom
    fn item_rows(&self, menu: &Menu, viewport: Viewport) -> (u16, Vec<u16>) {
        let count = menu.items().len() as u16;
        let content_h = if menu.is_showing_leaderboard() {
            2 * (2 + 2 * crate::types::LEADERBOARD_SIZE as u16) + 2 + count * 2
        } else {
            menu.message().len() as u16 + 4 + count * 2
        };
        let top = viewport.height.saturating_sub(content_h) / 2;
        let first_item = top + content_h - count * 2;
        (top, (0..count).map(|i| first_item + i * 2).collect())
    }

    fn item_x(&self, viewport: Viewport) -> u16 {
        viewport.width.saturating_sub(ITEM_WIDTH) / 2
    }

    /// Index of the item under a terminal cell
    pub fn item_at(&self, menu: &Menu, viewport: Viewport, column: u16, row: u16) -> Option<usize> {
        let x = self.item_x(viewport);
        if column < x || column >= x + ITEM_WIDTH {
            return None;
        }
        let (_, rows) = self.item_rows(menu, viewport);
        rows.iter().position(|&r| r == row)
    }

    pub fn render_into(
        &self,
        menu: &Menu,
        leaderboard: &Leaderboard,
        status: MenuStatus<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let width = viewport.width as i32;
        let title = CellStyle::new(Rgb::new(250, 150, 200), Rgb::default()).bold();
        let text = CellStyle::default();
        let (top, rows) = self.item_rows(menu, viewport);
        let mut y = top as i32;

        fb.put_str_centered(0, y, width, TITLE, title);
        y += 2;

        if menu.is_showing_leaderboard() {
            for kind in GameModeKind::ALL {
                let heading = match kind {
                    GameModeKind::Classic => "Classic:",
                    GameModeKind::QuickDeath => "Quick death:",
                };
                fb.put_str_centered(0, y, width, heading, text.bold());
                y += 2;
                let scores = leaderboard.scores(kind);
                if scores.is_empty() {
                    fb.put_str_centered(0, y, width, "-", text.dim());
                }
                for (i, &value) in scores.iter().enumerate() {
                    let line = format!("{}. {} s", i + 1, format_seconds(value as i64));
                    fb.put_str_centered(0, y + i as i32, width, &line, text);
                }
                y += 2 * crate::types::LEADERBOARD_SIZE as i32 - 2;
            }
        } else {
            for line in menu.message() {
                fb.put_str_centered(0, y, width, line, text.bold());
                y += 1;
            }
        }

        let x = self.item_x(viewport) as i32;
        let normal = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(40, 40, 56));
        let hovered = CellStyle::new(Rgb::new(20, 20, 20), Rgb::new(250, 150, 200)).bold();
        for (i, (item, row)) in menu.items().into_iter().zip(rows).enumerate() {
            let style = if i == menu.cursor() { hovered } else { normal };
            fb.fill_rect(x, row as i32, ITEM_WIDTH as i32, 1, ' ', style);
            fb.put_str_centered(x, row as i32, ITEM_WIDTH as i32, item.label(status.music_on), style);
        }

        let footer = match status.now_playing {
            Some(track) if status.music_on => format!("♪ {track}   ↑/↓ move  Enter select  q quit"),
            _ => "↑/↓ move  Enter select  q quit".to_string(),
        };
        fb.put_str_centered(0, viewport.height as i32 - 1, width, &footer, text.dim());
    }
}
