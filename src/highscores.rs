//! Leaderboard persistence as JSON.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::core::Leaderboard;

pub const DEFAULT_SCORES_FILE: &str = "match3-scores.json";

/// Read a leaderboard; a missing file is an empty board.
pub fn try_load(path: &Path) -> Result<Leaderboard> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Leaderboard::new()),
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };
    let board: Leaderboard =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(board)
}

/// Like [`try_load`], but a broken file is logged and treated as empty.
pub fn load(path: &Path) -> Leaderboard {
    match try_load(path) {
        Ok(board) => board,
        Err(e) => {
            warn!("ignoring unreadable high scores: {e:#}");
            Leaderboard::new()
        }
    }
}

pub fn save(path: &Path, board: &Leaderboard) -> Result<()> {
    let text = serde_json::to_string_pretty(board)?;
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "high scores saved");
    Ok(())
}
