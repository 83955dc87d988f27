//! Terminal input module (engine-facing).
//!
//! Turns raw pointer input into click and drag gestures, drives the world's
//! selection from those gestures, and maps `crossterm` key and mouse events
//! into commands and board pixels.

pub mod map;
pub mod player;
pub mod pointer;

pub use match3_types as types;

pub use map::{handle_key_event, handle_mouse_event, should_quit, BoardMapping, Command};
pub use player::Player;
pub use pointer::{PointerEvent, PointerInput, PointerTracker};
