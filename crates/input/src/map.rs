//! Mapping from terminal events to pointer input and commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::pointer::PointerInput;
use crate::types::{Vec2, TERM_TILE_COLS, TERM_TILE_ROWS};

/// Keyboard commands, shared by the menu and the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    /// Enter/Space: pick a menu entry, or click the cursor tile
    Confirm,
    /// Escape: pause or resume
    TogglePause,
    ToggleMusic,
}

/// Map keyboard input to a command.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Command::Up)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Command::Down)
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Command::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::Right)
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Confirm),
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Command::ToggleMusic),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Where the board sits on screen, for converting terminal cells to pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardMapping {
    /// Terminal column/row of the board's top-left corner
    pub origin_col: u16,
    pub origin_row: u16,
    pub tile_size: i32,
}

impl BoardMapping {
    pub fn new(origin_col: u16, origin_row: u16, tile_size: i32) -> Self {
        Self {
            origin_col,
            origin_row,
            tile_size,
        }
    }

    /// Board pixel at the centre of a terminal cell
    pub fn to_pixel(&self, column: u16, row: u16) -> Vec2 {
        let cols = TERM_TILE_COLS as i32;
        let rows = TERM_TILE_ROWS as i32;
        let dx = column as i32 - self.origin_col as i32;
        let dy = row as i32 - self.origin_row as i32;

        Vec2::new(
            dx * self.tile_size / cols + self.tile_size / (2 * cols),
            dy * self.tile_size / rows + self.tile_size / (2 * rows),
        )
    }

    /// Terminal cell where a board index's tile starts
    pub fn to_terminal(&self, index: Vec2) -> (u16, u16) {
        let col = self.origin_col as i32 + index.x * TERM_TILE_COLS as i32;
        let row = self.origin_row as i32 + index.y * TERM_TILE_ROWS as i32;
        (col.max(0) as u16, row.max(0) as u16)
    }

    /// Pixel centre of a board index
    pub fn tile_center(&self, index: Vec2) -> Vec2 {
        index * self.tile_size + Vec2::new(self.tile_size / 2, self.tile_size / 2)
    }
}

/// Left-button mouse events as pointer input
pub fn handle_mouse_event(event: MouseEvent, mapping: &BoardMapping) -> Option<PointerInput> {
    let pos = mapping.to_pixel(event.column, event.row);
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerInput::Down(pos)),
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerInput::Move(pos)),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerInput::Up(pos)),
        _ => None,
    }
}
