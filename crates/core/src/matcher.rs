//! Match detection - finds runs of three or more equal kinds.

use serde::Serialize;

use crate::board::Board;
use crate::types::{Vec2, MIN_RUN};

/// Cells to remove after one detection pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DestructionResult {
    /// Deduplicated, sorted coordinates
    pub cells: Vec<Vec2>,
    /// Longest horizontal run
    pub max_row_streak: u32,
    /// Longest vertical run
    pub max_col_streak: u32,
}

impl DestructionResult {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Longest run in either direction
    pub fn highest_streak(&self) -> u32 {
        self.max_row_streak.max(self.max_col_streak)
    }

    pub fn contains(&self, at: Vec2) -> bool {
        self.cells.binary_search(&at).is_ok()
    }
}

/// Scan every column and row for runs of at least three equal kinds.
///
/// Pure; callers may run it on a speculatively modified board.
pub fn find_matches(board: &Board) -> DestructionResult {
    let cols = board.cols() as i32;
    let rows = board.rows() as i32;
    let mut cells = Vec::new();

    let max_col_streak = scan_lines(cols, rows, |line, i| Vec2::new(line, i), board, &mut cells);
    let max_row_streak = scan_lines(rows, cols, |line, i| Vec2::new(i, line), board, &mut cells);

    cells.sort_unstable();
    cells.dedup();

    DestructionResult {
        cells,
        max_row_streak,
        max_col_streak,
    }
}

/// Walk `lines` lines of `len` cells each, collecting runs; returns the longest run.
fn scan_lines(
    lines: i32,
    len: i32,
    at: impl Fn(i32, i32) -> Vec2,
    board: &Board,
    out: &mut Vec<Vec2>,
) -> u32 {
    let mut longest = 0;

    for line in 0..lines {
        let mut start = 0;
        while start < len {
            let kind = board.kind(at(line, start));
            let mut end = start + 1;
            while end < len && board.kind(at(line, end)) == kind {
                end += 1;
            }

            let run = (end - start) as usize;
            if run >= MIN_RUN {
                longest = longest.max(run as u32);
                out.extend((start..end).map(|i| at(line, i)));
            }

            start = end;
        }
    }

    longest
}
