//! Core types shared across the workspace
//! This crate contains pure data types with no game logic

use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Default board dimensions
pub const DEFAULT_ROWS: u16 = 8;
pub const DEFAULT_COLS: u16 = 8;
pub const DEFAULT_TILE_KINDS: u8 = 5;

/// Smallest board on which a run of three fits in both directions
pub const MIN_BOARD_SIDE: u16 = 3;
/// Largest board side; 32 tiles span 128 terminal columns
pub const MAX_BOARD_SIDE: u16 = 32;
/// Two independent exclusions during fill need at least one kind left over
pub const MIN_TILE_KINDS: u8 = 3;

/// Tile edge length in board pixels
pub const TILE_SIZE: i32 = 70;

/// A drag further than this (per axis, in pixels) attempts a swap
pub const DRAG_SWAP_THRESHOLD: i32 = TILE_SIZE * 4 / 5;

/// Squared pointer travel (pixels) that turns a press into a drag
pub const DRAG_START_THRESHOLD_SQ: i32 = 4;

/// Animation timing (milliseconds)
pub const SWAP_ANIMATION_MS: u32 = 200;
pub const DESTROY_ANIMATION_MS: u32 = 400;
pub const FALL_ANIMATION_MS: u32 = 800;

/// Period of the selected-cell pulse (milliseconds)
pub const SELECTION_PULSE_PERIOD_MS: u64 = 1000;

/// Fixed frame time used by the terminal runner
pub const FRAME_MS: u64 = 16;

/// Terminal cells per tile (columns x rows)
pub const TERM_TILE_COLS: u16 = 4;
pub const TERM_TILE_ROWS: u16 = 2;

/// Classic mode: points needed to finish
pub const CLASSIC_TARGET_SCORE: u32 = 3000;
pub const CLASSIC_BASE_POINTS: u32 = 20;
pub const CLASSIC_STREAK_POINTS: u32 = 5;

/// QuickDeath mode: starting clock and per-cell bonus (milliseconds)
pub const QUICK_DEATH_INITIAL_MS: i64 = 15_000;
pub const QUICK_DEATH_BASE_BONUS_MS: i64 = 300;
pub const QUICK_DEATH_STREAK_BONUS_MS: i64 = 300;

/// Leaderboard entries kept per mode
pub const LEADERBOARD_SIZE: usize = 5;

/// Shortest run that gets destroyed
pub const MIN_RUN: usize = 3;

/// Tile kind id in `[0, K)`
pub type TileKind = u8;

/// Integer 2D vector.
///
/// Used both for board indices (`x` = column, `y` = row) and for board-relative
/// pixel positions.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(self, other: Vec2) -> i32 {
        let d = self - other;
        d.x * d.x + d.y * d.y
    }

    /// Linear interpolation towards `other`, truncated to integers
    pub fn lerp(self, other: Vec2, progress: f64) -> Vec2 {
        let x = self.x as f64 + (other.x - self.x) as f64 * progress;
        let y = self.y as f64 + (other.y - self.y) as f64 * progress;
        Vec2::new(x as i32, y as i32)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: i32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<i32> for Vec2 {
    type Output = Vec2;

    /// Floor division, so negative pixels never map onto row/column 0
    fn div(self, rhs: i32) -> Vec2 {
        Vec2::new(self.x.div_euclid(rhs), self.y.div_euclid(rhs))
    }
}

/// Axis-aligned rectangle in board pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// Lifecycle tag of a board cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Normal,
    /// Selected or being dragged by the player
    Active,
    /// Drawn by the in-flight animation instead of in its slot
    WaitingForAnimation,
    /// Removed; the slot is refilled by the next gravity pass
    Destroyed,
}

/// A single board slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub kind: TileKind,
    pub state: CellState,
}

impl Cell {
    pub fn new(kind: TileKind) -> Self {
        Self {
            kind,
            state: CellState::Normal,
        }
    }

    pub fn destroy(&mut self) {
        self.state = CellState::Destroyed;
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == CellState::Destroyed
    }
}

/// Sound effects the engine can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    TileDisappear,
}

/// Game mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameModeKind {
    /// Reach the target score as fast as possible
    Classic,
    /// Keep the clock above zero for as long as possible
    QuickDeath,
}

impl GameModeKind {
    pub const ALL: [GameModeKind; 2] = [GameModeKind::Classic, GameModeKind::QuickDeath];

    /// Parse mode from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameModeKind::Classic),
            "quickdeath" | "quick-death" | "quick_death" => Some(GameModeKind::QuickDeath),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameModeKind::Classic => "classic",
            GameModeKind::QuickDeath => "quickDeath",
        }
    }

    /// Human-readable title for menus
    pub fn title(&self) -> &'static str {
        match self {
            GameModeKind::Classic => "Classic",
            GameModeKind::QuickDeath => "Quick Death",
        }
    }
}
