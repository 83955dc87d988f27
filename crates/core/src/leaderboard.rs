//! Best ranking values per game mode.
//!
//! Classic ranks by the time taken to reach the target (lower is better);
//! QuickDeath by survival time (higher is better). Only the best
//! [`LEADERBOARD_SIZE`] entries per mode are kept, best first.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::types::{GameModeKind, LEADERBOARD_SIZE};

type Scores = ArrayVec<u64, LEADERBOARD_SIZE>;

/// On-disk shape; accepts unsorted and overlong lists
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredLeaderboard {
    #[serde(default)]
    classic: Vec<u64>,
    #[serde(default, rename = "quickDeath")]
    quick_death: Vec<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredLeaderboard", into = "StoredLeaderboard")]
pub struct Leaderboard {
    classic: Scores,
    quick_death: Scores,
}

fn better(kind: GameModeKind, a: u64, b: u64) -> bool {
    match kind {
        GameModeKind::Classic => a < b,
        GameModeKind::QuickDeath => a > b,
    }
}

fn ranked(kind: GameModeKind, mut values: Vec<u64>) -> Scores {
    match kind {
        GameModeKind::Classic => values.sort_unstable(),
        GameModeKind::QuickDeath => values.sort_unstable_by(|a, b| b.cmp(a)),
    }
    values.into_iter().take(LEADERBOARD_SIZE).collect()
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scores(&self, kind: GameModeKind) -> &[u64] {
        match kind {
            GameModeKind::Classic => &self.classic,
            GameModeKind::QuickDeath => &self.quick_death,
        }
    }

    fn scores_mut(&mut self, kind: GameModeKind) -> &mut Scores {
        match kind {
            GameModeKind::Classic => &mut self.classic,
            GameModeKind::QuickDeath => &mut self.quick_death,
        }
    }

    /// Record a finished game. Returns its 0-based rank, or `None` when it
    /// does not make the board.
    pub fn add_score(&mut self, kind: GameModeKind, value: u64) -> Option<usize> {
        let scores = self.scores_mut(kind);
        let rank = scores
            .iter()
            .position(|&existing| better(kind, value, existing))
            .unwrap_or(scores.len());

        if rank >= LEADERBOARD_SIZE {
            return None;
        }
        if scores.is_full() {
            scores.pop();
        }
        scores.insert(rank, value);
        Some(rank)
    }

    /// Re-sort both lists best first
    pub fn normalize(&mut self) {
        for kind in GameModeKind::ALL {
            let values = self.scores(kind).to_vec();
            *self.scores_mut(kind) = ranked(kind, values);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.classic.is_empty() && self.quick_death.is_empty()
    }
}

impl From<StoredLeaderboard> for Leaderboard {
    fn from(stored: StoredLeaderboard) -> Self {
        Self {
            classic: ranked(GameModeKind::Classic, stored.classic),
            quick_death: ranked(GameModeKind::QuickDeath, stored.quick_death),
        }
    }
}

impl From<Leaderboard> for StoredLeaderboard {
    fn from(board: Leaderboard) -> Self {
        Self {
            classic: board.classic.to_vec(),
            quick_death: board.quick_death.to_vec(),
        }
    }
}
