//! Terminal stand-ins for audio output.
//!
//! Sound effects ring the terminal bell on the next flush. Background music
//! is simulated: a track "plays" for its nominal length so the scheduler
//! rotates through titles shown in the status line.

use crate::core::{AudioSink, MusicPlayer};
use crate::types::SoundEffect;

/// Titles and lengths (ms) of the background tracks
pub const TRACKS: [(&str, u64); 3] = [
    ("Sugar Rush", 95_000),
    ("Gumdrop Waltz", 120_000),
    ("Candy Cavern", 80_000),
];

#[derive(Debug, Clone, Default)]
pub struct TerminalBell {
    pending: u32,
    muted: bool,
}

impl TerminalBell {
    pub fn new(muted: bool) -> Self {
        Self { pending: 0, muted }
    }

    /// Number of rings requested since the last call
    pub fn take_pending(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }
}

impl AudioSink for TerminalBell {
    fn play_sound_effect(&mut self, effect: SoundEffect) {
        match effect {
            SoundEffect::TileDisappear if !self.muted => self.pending += 1,
            SoundEffect::TileDisappear => {}
        }
    }
}

/// Track timer implementing [`MusicPlayer`]
#[derive(Debug, Clone, Default)]
pub struct SilentMusic {
    current: Option<usize>,
    remaining_ms: u64,
}

impl SilentMusic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt_ms: u64) {
        if self.current.is_none() {
            return;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(dt_ms);
        if self.remaining_ms == 0 {
            self.current = None;
        }
    }

    pub fn now_playing(&self) -> Option<&'static str> {
        self.current.map(|i| TRACKS[i].0)
    }
}

impl MusicPlayer for SilentMusic {
    fn is_playing(&self) -> bool {
        self.current.is_some()
    }

    fn play(&mut self, track: usize) {
        let track = track % TRACKS.len();
        self.current = Some(track);
        self.remaining_ms = TRACKS[track].1;
    }

    fn stop(&mut self) {
        self.current = None;
        self.remaining_ms = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_counts_effects() {
        let mut bell = TerminalBell::new(false);
        bell.play_sound_effect(SoundEffect::TileDisappear);
        bell.play_sound_effect(SoundEffect::TileDisappear);
        assert_eq!(bell.take_pending(), 2);
        assert_eq!(bell.take_pending(), 0);

        let mut muted = TerminalBell::new(true);
        muted.play_sound_effect(SoundEffect::TileDisappear);
        assert_eq!(muted.take_pending(), 0);
    }

    #[test]
    fn test_track_ends_after_its_length() {
        let mut music = SilentMusic::new();
        music.play(2);
        assert_eq!(music.now_playing(), Some("Candy Cavern"));
        music.advance(79_999);
        assert!(music.is_playing());
        music.advance(1);
        assert!(!music.is_playing());
        assert_eq!(music.now_playing(), None);
    }

    #[test]
    fn test_stop() {
        let mut music = SilentMusic::new();
        music.play(0);
        music.stop();
        assert!(!music.is_playing());
    }
}
