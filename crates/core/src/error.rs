//! Error types for board access and world configuration.

use thiserror::Error;

use crate::types::{TileKind, Vec2, MAX_BOARD_SIDE, MIN_BOARD_SIDE, MIN_TILE_KINDS};

/// Board access errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("coordinate ({}, {}) is outside the {cols}x{rows} board", .index.x, .index.y)]
    OutOfRange { index: Vec2, cols: usize, rows: usize },
}

/// Rejected [`WorldConfig`](crate::world::WorldConfig) values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must be at least {min}x{min}, got {cols}x{rows}", min = MIN_BOARD_SIDE)]
    BoardTooSmall { cols: u16, rows: u16 },
    #[error("board must be at most {max}x{max}, got {cols}x{rows}", max = MAX_BOARD_SIDE)]
    BoardTooLarge { cols: u16, rows: u16 },
    #[error("at least {min} tile kinds are required, got {0}", min = MIN_TILE_KINDS)]
    TooFewTileKinds(u8),
    #[error("tile size must be positive, got {0}")]
    InvalidTileSize(i32),
    #[error("tile kind {kind} at ({}, {}) is outside 0..{kinds}", .index.x, .index.y)]
    TileKindOutOfRange { index: Vec2, kind: TileKind, kinds: TileKind },
}
