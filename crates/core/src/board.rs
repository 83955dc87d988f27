//! Board module - manages the game grid
//!
//! The board is a `cols x rows` grid where every slot always holds a cell.
//! Uses a flat vector in row-major order for cache locality.
//! Coordinates: `Vec2 { x, y }` where x is the column (left to right) and
//! y is the row (top to bottom).

use tracing::trace;

use crate::error::BoardError;
use crate::rng::SimpleRng;
use crate::types::{Cell, CellState, TileKind, Vec2, MIN_TILE_KINDS};

/// One cell moving down (or in from above) during a gravity pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fall {
    /// Start slot; rows above the board are negative
    pub from: Vec2,
    pub to: Vec2,
    pub kind: TileKind,
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cols: usize,
    rows: usize,
    /// Flat array of cells, row-major order (y * cols + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a board with every cell set to kind 0.
    ///
    /// Call [`Board::fill`] before play.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::new(0); cols * rows],
        }
    }

    /// Build a board from rows of tile kinds (top row first).
    ///
    /// Panics if the rows are empty or ragged.
    pub fn from_kinds<R: AsRef<[TileKind]>>(rows: &[R]) -> Self {
        assert!(!rows.is_empty(), "board needs at least one row");
        let cols = rows[0].as_ref().len();
        assert!(
            rows.iter().all(|row| row.as_ref().len() == cols),
            "all rows must have the same length"
        );

        let cells = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().map(|&kind| Cell::new(kind)))
            .collect();

        Self {
            cols,
            rows: rows.len(),
            cells,
        }
    }

    /// Calculate flat index from coordinates
    #[inline(always)]
    fn index(&self, at: Vec2) -> Option<usize> {
        if !self.contains(at) {
            return None;
        }
        Some((at.y as usize) * self.cols + (at.x as usize))
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Check if a coordinate lies on the board
    pub fn contains(&self, at: Vec2) -> bool {
        at.x >= 0 && (at.x as usize) < self.cols && at.y >= 0 && (at.y as usize) < self.rows
    }

    pub fn get(&self, at: Vec2) -> Option<&Cell> {
        self.index(at).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, at: Vec2) -> Option<&mut Cell> {
        self.index(at).map(|i| &mut self.cells[i])
    }

    pub fn try_at(&self, at: Vec2) -> Result<&Cell, BoardError> {
        self.get(at).ok_or(BoardError::OutOfRange {
            index: at,
            cols: self.cols,
            rows: self.rows,
        })
    }

    /// Cell at `at`.
    ///
    /// Panics when `at` is off the board: callers validate coordinates first.
    pub fn at(&self, at: Vec2) -> &Cell {
        match self.try_at(at) {
            Ok(cell) => cell,
            Err(err) => panic!("{err}"),
        }
    }

    /// Mutable cell at `at`. Panics when `at` is off the board.
    pub fn at_mut(&mut self, at: Vec2) -> &mut Cell {
        let (cols, rows) = (self.cols, self.rows);
        match self.get_mut(at) {
            Some(cell) => cell,
            None => panic!(
                "{}",
                BoardError::OutOfRange {
                    index: at,
                    cols,
                    rows
                }
            ),
        }
    }

    /// Kind at `at`; the board's kinds are compared regardless of cell state
    #[inline]
    pub fn kind(&self, at: Vec2) -> TileKind {
        self.at(at).kind
    }

    /// Exchange two cells in place
    pub fn swap(&mut self, a: Vec2, b: Vec2) {
        let ia = self.index(a);
        let ib = self.index(b);
        match (ia, ib) {
            (Some(ia), Some(ib)) => self.cells.swap(ia, ib),
            _ => panic!("cannot swap {:?} and {:?} on a {}x{} board", a, b, self.cols, self.rows),
        }
    }

    /// Get a reference to the internal cells (row-major)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate every coordinate in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Vec2> {
        let cols = self.cols as i32;
        let rows = self.rows as i32;
        (0..rows).flat_map(move |y| (0..cols).map(move |x| Vec2::new(x, y)))
    }

    /// Tile kinds as rows (top row first)
    pub fn kinds(&self) -> Vec<Vec<TileKind>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|cell| cell.kind).collect())
            .collect()
    }

    /// Move every cell in `from` state to `to`
    pub fn transition_all(&mut self, from: CellState, to: CellState) {
        for cell in self.cells.iter_mut().filter(|c| c.state == from) {
            cell.state = to;
        }
    }

    /// Regenerate every cell so that no run of three exists.
    ///
    /// A kind is excluded when the two cells above share it, and when the two
    /// cells to the left share it. An excluded draw steps to the next kind.
    ///
    /// Panics with fewer than [`MIN_TILE_KINDS`] kinds, where both exclusions
    /// can cover every kind.
    pub fn fill(&mut self, rng: &mut SimpleRng, kinds: TileKind) {
        assert!(
            kinds >= MIN_TILE_KINDS,
            "fill needs at least {MIN_TILE_KINDS} tile kinds, got {kinds}"
        );
        for y in 0..self.rows as i32 {
            for x in 0..self.cols as i32 {
                let at = Vec2::new(x, y);
                let mut excluded = [None, None];

                if y > 1 {
                    let above = self.kind(Vec2::new(x, y - 1));
                    if above == self.kind(Vec2::new(x, y - 2)) {
                        excluded[0] = Some(above);
                    }
                }
                if x > 1 {
                    let left = self.kind(Vec2::new(x - 1, y));
                    if left == self.kind(Vec2::new(x - 2, y)) {
                        excluded[1] = Some(left);
                    }
                }

                *self.at_mut(at) = Cell::new(rng.next_kind_excluding(kinds, excluded));
            }
        }
        trace!(cols = self.cols, rows = self.rows, "board filled");
    }

    /// Plan gravity after a destruction pass.
    ///
    /// Per column, scanning from the bottom row up, each surviving cell drops
    /// by the number of destroyed cells seen so far and its old slot becomes
    /// destroyed. The column is then topped up with exactly as many new cells
    /// as were destroyed, starting above the board. Only cell states change;
    /// target slots receive their kinds when the fall animation starts.
    pub fn gravity_plan(&mut self, mut next_kind: impl FnMut() -> TileKind) -> Vec<Fall> {
        let mut falls = Vec::new();

        for x in 0..self.cols as i32 {
            let mut destroyed = 0;

            for y in (0..self.rows as i32).rev() {
                let at = Vec2::new(x, y);
                if self.at(at).is_destroyed() {
                    destroyed += 1;
                } else if destroyed > 0 {
                    falls.push(Fall {
                        from: at,
                        to: Vec2::new(x, y + destroyed),
                        kind: self.kind(at),
                    });
                    self.at_mut(at).destroy();
                }
            }

            for row in 0..destroyed {
                falls.push(Fall {
                    from: Vec2::new(x, row - destroyed),
                    to: Vec2::new(x, row),
                    kind: next_kind(),
                });
            }
        }

        falls
    }

    /// Number of destroyed cells on the board
    pub fn destroyed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_destroyed()).count()
    }
}
