//! Background music rotation.

use tracing::debug;

use crate::ports::MusicPlayer;
use crate::rng::SimpleRng;

/// Picks background tracks so the same one never plays twice in a row
#[derive(Debug, Clone)]
pub struct MusicScheduler {
    track_count: usize,
    last: Option<usize>,
    enabled: bool,
}

impl MusicScheduler {
    pub fn new(track_count: usize) -> Self {
        Self {
            track_count,
            last: None,
            enabled: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn last_track(&self) -> Option<usize> {
        self.last
    }

    /// Flip music on or off, stopping playback when turned off
    pub fn toggle(&mut self, player: &mut dyn MusicPlayer) -> bool {
        self.enabled = !self.enabled;
        if !self.enabled {
            player.stop();
        }
        self.enabled
    }

    /// Uniform pick among every track except the last one played
    pub fn next_track(&mut self, rng: &mut SimpleRng) -> Option<usize> {
        let track = match (self.track_count, self.last) {
            (0, _) => return None,
            (1, _) => 0,
            (count, None) => rng.next_range(count as u32) as usize,
            (count, Some(last)) => {
                let pick = rng.next_range(count as u32 - 1) as usize;
                if pick >= last {
                    pick + 1
                } else {
                    pick
                }
            }
        };
        self.last = Some(track);
        Some(track)
    }

    /// Start a new track once the previous one has ended
    pub fn update(&mut self, player: &mut dyn MusicPlayer, rng: &mut SimpleRng) {
        if !self.enabled || player.is_playing() {
            return;
        }
        if let Some(track) = self.next_track(rng) {
            debug!(track, "starting background track");
            player.play(track);
        }
    }
}
