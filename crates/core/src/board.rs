//! Board module - manages the game grid
//!
//! The board is a `cols x rows` grid where each cell is empty or holds a piece kind.
//! Cells live in a flat row-major vector; dimensions never change after creation.
//! Coordinates: (x, y) with x growing to the right and y growing downwards.
//! The top `hidden_rows` rows are a spawn buffer that is not rendered.
//!
//! Settling is per cell: after a lock every occupied cell with an empty cell
//! below falls independently, and full rows are cleared, until nothing changes.

use crate::shape::Shape;
use crate::types::PieceKind;

/// Cell on the board (None = empty, Some = filled with piece kind)
pub type Cell = Option<PieceKind>;

/// Result of one settle-then-clear pass over the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassOutcome {
    /// At least one cell moved down during the gravity sweep.
    pub settled: bool,
    /// Rows removed by the clear step.
    pub cleared: usize,
}

impl PassOutcome {
    pub fn changed(&self) -> bool {
        self.settled || self.cleared > 0
    }
}

/// Summary of a full gravity/clear fixed point run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolveSummary {
    /// Passes that changed the board.
    pub passes: usize,
    /// Rows cleared by each clearing event, in order.
    pub clear_events: Vec<usize>,
}

impl ResolveSummary {
    pub fn total_cleared(&self) -> usize {
        self.clear_events.iter().sum()
    }
}

/// The game board using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cols: usize,
    rows: usize,
    hidden_rows: usize,
    /// Flat array of cells, row-major order (y * cols + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board with no hidden rows.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self::with_hidden_rows(cols, rows, 0)
    }

    /// Create an empty board with `hidden_rows` extra rows on top of `visible_rows`.
    pub fn with_hidden_rows(cols: usize, visible_rows: usize, hidden_rows: usize) -> Self {
        let rows = visible_rows + hidden_rows;
        Self {
            cols,
            rows,
            hidden_rows,
            cells: vec![None; cols * rows],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
            return None;
        }
        Some(y as usize * self.cols + x as usize)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total rows including the hidden spawn buffer.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn hidden_rows(&self) -> usize {
        self.hidden_rows
    }

    pub fn visible_rows(&self) -> usize {
        self.rows - self.hidden_rows
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether `shape` anchored at (x, y) fits.
    ///
    /// Every filled cell must land in a column inside the board and a row above
    /// the floor. Rows above the top (negative y) are allowed and count as empty.
    pub fn is_valid_placement(&self, shape: &Shape, x: i32, y: i32) -> bool {
        shape.cells().all(|(dx, dy)| {
            let bx = x + dx;
            let by = y + dy;
            if bx < 0 || bx as usize >= self.cols || by >= self.rows as i32 {
                return false;
            }
            by < 0 || !self.is_occupied(bx, by)
        })
    }

    /// Write `kind` into every board cell covered by `shape` at (x, y).
    ///
    /// No collision check: callers validate first. Cells outside the board
    /// (for example in rows above the top) are dropped.
    pub fn lock(&mut self, shape: &Shape, x: i32, y: i32, kind: PieceKind) {
        for (dx, dy) in shape.cells() {
            self.set(x + dx, y + dy, Some(kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.rows {
            return false;
        }
        let start = y * self.cols;
        self.cells[start..start + self.cols]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// One gravity sweep. Returns true if any cell moved.
    ///
    /// Rows are visited bottom to top and every occupied cell with an empty
    /// cell directly below moves down one row. A cell that moved is never
    /// visited again in the same sweep, so it falls at most one row; cells
    /// above it may follow into the space it left.
    pub fn apply_gravity_step(&mut self) -> bool {
        if self.rows < 2 {
            return false;
        }
        let cols = self.cols;
        let mut fell = false;
        for y in (0..self.rows - 1).rev() {
            for x in 0..cols {
                let here = y * cols + x;
                let below = here + cols;
                if self.cells[here].is_some() && self.cells[below].is_none() {
                    self.cells[below] = self.cells[here].take();
                    fell = true;
                }
            }
        }
        fell
    }

    /// Remove every full row, inserting empty rows at the top.
    ///
    /// Scans bottom to top; after a removal the same index is checked again
    /// because the row above has moved into it. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.rows;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.remove_row(row);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Remove row `y`, shift everything above down by one and clear the top row.
    fn remove_row(&mut self, y: usize) {
        let cols = self.cols;
        // copy_within handles the overlapping ranges.
        self.cells.copy_within(0..y * cols, cols);
        self.cells[..cols].fill(None);
    }

    /// One gravity sweep followed by one clear step.
    pub fn resolve_pass(&mut self) -> PassOutcome {
        let settled = self.apply_gravity_step();
        let cleared = self.clear_full_rows();
        PassOutcome { settled, cleared }
    }

    /// Run settle/clear passes until a full pass changes nothing.
    pub fn resolve(&mut self) -> ResolveSummary {
        let mut summary = ResolveSummary::default();
        loop {
            let outcome = self.resolve_pass();
            if !outcome.changed() {
                return summary;
            }
            summary.passes += 1;
            if outcome.cleared > 0 {
                summary.clear_events.push(outcome.cleared);
            }
        }
    }

    /// Column heights: rows from the floor up to the topmost filled cell (0 if empty).
    pub fn column_heights(&self) -> Vec<usize> {
        (0..self.cols)
            .map(|x| {
                (0..self.rows)
                    .find(|&y| self.cells[y * self.cols + x].is_some())
                    .map_or(0, |y| self.rows - y)
            })
            .collect()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows as slices, top to bottom.
    pub fn row_slices(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1))
    }

    /// Rows as 0 / type-id values.
    pub fn to_ids(&self) -> Vec<Vec<u8>> {
        self.row_slices()
            .map(|row| row.iter().map(|c| c.map_or(0, PieceKind::id)).collect())
            .collect()
    }

    /// Build a board from rows of 0 / type-id values.
    ///
    /// Returns None if the rows are empty or ragged, or hold an id outside 0-7.
    pub fn from_ids(rows: &[Vec<u8>], hidden_rows: usize) -> Option<Self> {
        let cols = rows.first()?.len();
        if cols == 0 || rows.iter().any(|r| r.len() != cols) || hidden_rows > rows.len() {
            return None;
        }
        let cells = rows
            .iter()
            .flatten()
            .map(|&id| match id {
                0 => Some(None),
                id => PieceKind::from_id(id).map(Some),
            })
            .collect::<Option<Vec<Cell>>>()?;
        Some(Self {
            cols,
            rows: rows.len(),
            hidden_rows,
            cells,
        })
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: i32, kind: PieceKind) {
        for x in 0..board.cols() as i32 {
            board.set(x, y, Some(kind));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(10, 20);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn hidden_rows_extend_total() {
        let board = Board::with_hidden_rows(10, 20, 4);
        assert_eq!(board.rows(), 24);
        assert_eq!(board.visible_rows(), 20);
        assert_eq!(board.cells().len(), 240);
    }

    #[test]
    fn gravity_sweep_moves_each_cell_at_most_one_row() {
        let mut board = Board::new(1, 5);
        board.set(0, 0, Some(PieceKind::T));
        assert!(board.apply_gravity_step());
        assert_eq!(board.get(0, 1), Some(Some(PieceKind::T)));
        assert_eq!(board.get(0, 0), Some(None));
    }

    #[test]
    fn gravity_sweep_lets_stacked_cells_follow() {
        // Two cells stacked with a gap below: both drop one row in the same sweep.
        let mut board = Board::new(1, 4);
        board.set(0, 0, Some(PieceKind::I));
        board.set(0, 1, Some(PieceKind::O));
        assert!(board.apply_gravity_step());
        assert_eq!(board.to_ids(), vec![vec![0], vec![1], vec![2], vec![0]]);
    }

    #[test]
    fn clear_handles_adjacent_full_rows() {
        let mut board = Board::new(3, 4);
        fill_row(&mut board, 2, PieceKind::I);
        fill_row(&mut board, 3, PieceKind::O);
        board.set(1, 1, Some(PieceKind::T));
        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(
            board.to_ids(),
            vec![vec![0, 0, 0], vec![0, 0, 0], vec![0, 0, 0], vec![0, 3, 0]]
        );
    }

    #[test]
    fn resolve_records_each_clear_event() {
        let mut board = Board::new(2, 4);
        // Staggered cells only complete the bottom row after the first clear settles.
        fill_row(&mut board, 3, PieceKind::I);
        board.set(0, 0, Some(PieceKind::S));
        board.set(1, 1, Some(PieceKind::Z));
        let summary = board.resolve();
        assert_eq!(summary.clear_events, vec![1, 1]);
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 0);
    }

    #[test]
    fn from_ids_roundtrip() {
        let rows = vec![vec![0, 1], vec![7, 0]];
        let board = Board::from_ids(&rows, 0).unwrap();
        assert_eq!(board.to_ids(), rows);
        assert!(Board::from_ids(&[vec![0, 1], vec![0]], 0).is_none());
        assert!(Board::from_ids(&[vec![0, 9], vec![1, 0]], 0).is_none());
        assert!(Board::from_ids(&[vec![8]], 0).is_none());
    }
}
