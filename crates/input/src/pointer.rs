//! Pointer gesture tracking.
//!
//! Splits raw press/move/release input (board pixels) into clicks and drags.
//! A press becomes a drag once the pointer has travelled far enough from the
//! press point; releasing before that is a click.

use crate::types::{Vec2, DRAG_START_THRESHOLD_SQ};

/// Raw left-button pointer input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerInput {
    Down(Vec2),
    Move(Vec2),
    Up(Vec2),
}

/// Recognised gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Released without dragging, at the release position
    Clicked(Vec2),
    /// Carries the original press position
    DragStarted(Vec2),
    DragMoved(Vec2),
    DragEnded(Vec2),
}

impl PointerEvent {
    pub fn position(self) -> Vec2 {
        match self {
            PointerEvent::Clicked(pos)
            | PointerEvent::DragStarted(pos)
            | PointerEvent::DragMoved(pos)
            | PointerEvent::DragEnded(pos) => pos,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PointerTracker {
    press: Option<Vec2>,
    dragging: bool,
    threshold_sq: i32,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::with_threshold(DRAG_START_THRESHOLD_SQ)
    }

    /// `threshold_sq` is the squared travel that starts a drag
    pub fn with_threshold(threshold_sq: i32) -> Self {
        Self {
            press: None,
            dragging: false,
            threshold_sq,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn handle(&mut self, input: PointerInput) -> Option<PointerEvent> {
        match input {
            PointerInput::Down(pos) => {
                self.press = Some(pos);
                self.dragging = false;
                None
            }
            PointerInput::Move(pos) => {
                let press = self.press?;
                if self.dragging {
                    Some(PointerEvent::DragMoved(pos))
                } else if press.distance_squared(pos) >= self.threshold_sq {
                    self.dragging = true;
                    Some(PointerEvent::DragStarted(press))
                } else {
                    None
                }
            }
            PointerInput::Up(pos) => {
                self.press.take()?;
                if std::mem::take(&mut self.dragging) {
                    Some(PointerEvent::DragEnded(pos))
                } else {
                    Some(PointerEvent::Clicked(pos))
                }
            }
        }
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}
