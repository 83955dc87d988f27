//! Player selection controller.
//!
//! Click a cell to select it, click a neighbour to swap. Or drag a cell
//! toward a neighbour. Every gesture is ignored while the world is busy.

use match3_core::World;

use crate::pointer::PointerEvent;
use crate::types::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SelectedCell {
    /// Press position in board pixels
    origin: Vec2,
    index: Vec2,
    dragging: bool,
    offset: Vec2,
}

#[derive(Debug, Clone, Default)]
pub struct Player {
    selected: Option<SelectedCell>,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected board index, if any
    pub fn selected(&self) -> Option<Vec2> {
        self.selected.map(|s| s.index)
    }

    pub fn is_dragging(&self) -> bool {
        self.selected.is_some_and(|s| s.dragging)
    }

    pub fn handle(&mut self, event: PointerEvent, world: &mut World) {
        if !world.is_interaction_enabled() {
            return;
        }

        match event {
            PointerEvent::Clicked(pos) => self.on_click(pos, world),
            PointerEvent::DragStarted(pos) => self.on_drag_started(pos, world),
            PointerEvent::DragMoved(pos) => self.on_drag_moved(pos, world),
            PointerEvent::DragEnded(_) => {
                if self.is_dragging() {
                    self.release(world);
                }
            }
        }
    }

    /// Drop the selection, e.g. when the session is left
    pub fn reset(&mut self, world: &mut World) {
        self.release(world);
    }

    fn on_click(&mut self, pos: Vec2, world: &mut World) {
        let target = world.tile_at_point(pos);

        if let Some(selected) = self.selected {
            self.release(world);
            if let Some(target) = target {
                world.try_switch_cells(selected.index, target, false);
            }
        } else if let Some(index) = target {
            self.select(pos, index, false, world);
        }
    }

    fn on_drag_started(&mut self, pos: Vec2, world: &mut World) {
        if let Some(index) = world.tile_at_point(pos) {
            self.release(world);
            self.select(pos, index, true, world);
        }
    }

    fn on_drag_moved(&mut self, pos: Vec2, world: &mut World) {
        let Some(selected) = self.selected.as_mut().filter(|s| s.dragging) else {
            return;
        };

        selected.offset = pos - selected.origin;
        let (index, offset) = (selected.index, selected.offset);

        if world.set_active_cell(Some(index), offset) == Some(index) {
            self.release(world);
        }
    }

    fn select(&mut self, origin: Vec2, index: Vec2, dragging: bool, world: &mut World) {
        world.set_active_cell(Some(index), Vec2::ZERO);
        self.selected = Some(SelectedCell {
            origin,
            index,
            dragging,
            offset: Vec2::ZERO,
        });
    }

    fn release(&mut self, world: &mut World) {
        if let Some(selected) = self.selected.take() {
            world.set_active_cell(None, selected.offset);
        }
    }
}
