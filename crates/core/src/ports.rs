//! Capabilities the engine consumes from its host.
//!
//! Pixel coordinates are board-relative; `(0, 0)` is the top-left corner of
//! the top-left tile.

use crate::types::{Rect, SoundEffect, TileKind, Vec2};

/// Drawing surface
pub trait Canvas {
    /// Draw a tile of `kind` at `pos`, scaling a `src_size` sprite to `dst_size`
    fn draw_cell(&mut self, pos: Vec2, kind: TileKind, src_size: i32, dst_size: i32);

    /// Overlay the destruction effect for a tile at `pos`
    fn draw_destroy_effect(&mut self, pos: Vec2, size: i32, progress: f64);

    fn draw_background(&mut self, rect: Rect);

    fn draw_text(&mut self, text: &str, rect: Rect, large: bool);
}

/// Sound output
pub trait AudioSink {
    fn play_sound_effect(&mut self, effect: SoundEffect);
}

/// Background music output; tracks are addressed by index
pub trait MusicPlayer {
    fn is_playing(&self) -> bool;
    fn play(&mut self, track: usize);
    fn stop(&mut self);
}

/// Discards every sound request
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_sound_effect(&mut self, _effect: SoundEffect) {}
}

/// Records sound requests, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingAudio {
    pub played: Vec<SoundEffect>,
}

impl AudioSink for RecordingAudio {
    fn play_sound_effect(&mut self, effect: SoundEffect) {
        self.played.push(effect);
    }
}
