//! Drawable view of the world, detached from its internals.

use serde::Serialize;

use crate::animation::{AnimationPayload, Easing};
use crate::types::{Cell, CellState, GameModeKind, Vec2};

/// The player's current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionSnapshot {
    pub index: Vec2,
    /// Drag offset in pixels
    pub offset: Vec2,
    pub elapsed_ms: u64,
}

/// The in-flight animation. Renderers lerp move records with `progress`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationSnapshot {
    pub payload: AnimationPayload,
    pub progress: f64,
    pub easing: Easing,
    pub elapsed_ms: u64,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub cols: usize,
    pub rows: usize,
    pub tile_size: i32,
    /// Row-major
    pub cells: Vec<Cell>,
    pub selection: Option<SelectionSnapshot>,
    pub animation: Option<AnimationSnapshot>,
    pub active: bool,
    pub interaction_enabled: bool,
    pub mode: Option<GameModeKind>,
    pub ui_text: Vec<String>,
}

impl WorldSnapshot {
    pub fn cell(&self, at: Vec2) -> Option<&Cell> {
        if at.x < 0 || at.y < 0 || at.x as usize >= self.cols || at.y as usize >= self.rows {
            return None;
        }
        self.cells.get(at.y as usize * self.cols + at.x as usize)
    }

    /// Cells drawn in their own slot
    pub fn settled_cells(&self) -> impl Iterator<Item = (Vec2, &Cell)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.state == CellState::Normal)
            .map(move |(i, cell)| (Vec2::new((i % cols) as i32, (i / cols) as i32), cell))
    }

    /// Board size in pixels
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.cols as i32, self.rows as i32) * self.tile_size
    }
}
