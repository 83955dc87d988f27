//! Scoring module - game mode policies
//!
//! Classic: 20 points per destroyed cell, plus 5 per cell for every step the
//! longest streak goes beyond three. The game ends at 3000 points and is
//! ranked by how long that took.
//!
//! QuickDeath: a 15 s clock runs down every tick. Each destroyed cell adds
//! 300 ms, plus 300 ms for every step the longest streak goes beyond three.
//! The game ends when the clock hits zero and is ranked by survival time.

use crate::matcher::DestructionResult;
use crate::types::{
    GameModeKind, CLASSIC_BASE_POINTS, CLASSIC_STREAK_POINTS, CLASSIC_TARGET_SCORE, MIN_RUN,
    QUICK_DEATH_BASE_BONUS_MS, QUICK_DEATH_INITIAL_MS, QUICK_DEATH_STREAK_BONUS_MS,
};

/// Streak steps beyond the minimum run
fn extra_streak(result: &DestructionResult) -> u32 {
    result.highest_streak().saturating_sub(MIN_RUN as u32)
}

/// Classic points for one destruction pass
pub fn classic_points(result: &DestructionResult) -> u32 {
    let per_cell = CLASSIC_BASE_POINTS + CLASSIC_STREAK_POINTS * extra_streak(result);
    per_cell * result.len() as u32
}

/// QuickDeath clock bonus (ms) for one destruction pass
pub fn quick_death_bonus_ms(result: &DestructionResult) -> i64 {
    let per_cell = QUICK_DEATH_BASE_BONUS_MS + QUICK_DEATH_STREAK_BONUS_MS * extra_streak(result) as i64;
    per_cell * result.len() as i64
}

/// Format milliseconds as seconds with two fractional digits ("12.05").
///
/// Negative values are shown as zero.
pub fn format_seconds(ms: i64) -> String {
    let ms = ms.max(0);
    format!("{}.{:02}", ms / 1000, (ms % 1000) / 10)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassicMode {
    elapsed_ms: u64,
    score: u32,
}

impl ClassicMode {
    pub fn score(&self) -> u32 {
        self.score
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickDeathMode {
    elapsed_ms: u64,
    time_left_ms: i64,
}

impl QuickDeathMode {
    pub fn time_left_ms(&self) -> i64 {
        self.time_left_ms
    }
}

impl Default for QuickDeathMode {
    fn default() -> Self {
        Self {
            elapsed_ms: 0,
            time_left_ms: QUICK_DEATH_INITIAL_MS,
        }
    }
}

/// The running session's scoring policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameMode {
    Classic(ClassicMode),
    QuickDeath(QuickDeathMode),
}

impl GameMode {
    pub fn new(kind: GameModeKind) -> Self {
        match kind {
            GameModeKind::Classic => GameMode::Classic(ClassicMode::default()),
            GameModeKind::QuickDeath => GameMode::QuickDeath(QuickDeathMode::default()),
        }
    }

    pub fn kind(&self) -> GameModeKind {
        match self {
            GameMode::Classic(_) => GameModeKind::Classic,
            GameMode::QuickDeath(_) => GameModeKind::QuickDeath,
        }
    }

    /// Apply one destruction pass
    pub fn update_score(&mut self, result: &DestructionResult) {
        match self {
            GameMode::Classic(mode) => {
                mode.score = mode.score.saturating_add(classic_points(result));
            }
            GameMode::QuickDeath(mode) => {
                mode.time_left_ms += quick_death_bonus_ms(result);
            }
        }
    }

    pub fn tick(&mut self, dt_ms: u64) {
        match self {
            GameMode::Classic(mode) => {
                mode.elapsed_ms += dt_ms;
            }
            GameMode::QuickDeath(mode) => {
                mode.elapsed_ms += dt_ms;
                mode.time_left_ms -= dt_ms as i64;
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        match self {
            GameMode::Classic(mode) => mode.score >= CLASSIC_TARGET_SCORE,
            GameMode::QuickDeath(mode) => mode.time_left_ms <= 0,
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        match self {
            GameMode::Classic(mode) => mode.elapsed_ms,
            GameMode::QuickDeath(mode) => mode.elapsed_ms,
        }
    }

    /// Value recorded on the leaderboard: elapsed time in both modes.
    ///
    /// For Classic this is not the point total; see [`ClassicMode::score`].
    pub fn raw_score_value(&self) -> u64 {
        self.elapsed_ms()
    }

    /// Lines shown next to the board while playing
    pub fn ui_text(&self) -> Vec<String> {
        match self {
            GameMode::Classic(mode) => vec![
                "Current score:".to_string(),
                mode.score.to_string(),
                "Goal:".to_string(),
                CLASSIC_TARGET_SCORE.to_string(),
                "Time passed:".to_string(),
                format_seconds(mode.elapsed_ms as i64),
            ],
            GameMode::QuickDeath(mode) => vec![
                "Survive as long as you can!".to_string(),
                "Time left".to_string(),
                format_seconds(mode.time_left_ms),
            ],
        }
    }

    /// Lines shown on the menu after the game ends
    pub fn summary_text(&self) -> Vec<String> {
        match self {
            GameMode::Classic(mode) => vec![format!(
                "You reached {} points in {} seconds!",
                CLASSIC_TARGET_SCORE,
                format_seconds(mode.elapsed_ms as i64)
            )],
            GameMode::QuickDeath(mode) => vec![format!(
                "You have survived for {} seconds!",
                format_seconds(mode.elapsed_ms as i64)
            )],
        }
    }
}
