//! Pieces module - a tetromino instance on the board

use crate::board::Board;
use crate::shape::Shape;
use crate::types::{PieceKind, Turn};

/// Horizontal wall-kick offsets tried, in order, when a rotation collides.
pub const WALL_KICKS: [i32; 4] = [-1, 1, -2, 2];

/// A piece: its own shape matrix plus the top-left anchor on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Create a piece in spawn orientation, centered horizontally at row 0.
    pub fn spawn(kind: PieceKind, cols: usize) -> Self {
        let shape = Shape::spawn(kind);
        Self {
            kind,
            shape,
            x: spawn_x(cols, shape.width()),
            y: 0,
        }
    }

    /// Same piece moved to (x, y).
    pub fn at(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }

    /// Same piece moved by (dx, dy).
    pub fn shifted(self, dx: i32, dy: i32) -> Self {
        self.at(self.x + dx, self.y + dy)
    }

    pub fn fits(&self, board: &Board) -> bool {
        board.is_valid_placement(&self.shape, self.x, self.y)
    }

    /// Absolute board coordinates of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Rotate with wall kicks.
    ///
    /// Tries the rotated shape in place, then each of [`WALL_KICKS`]. Returns
    /// the first position that fits, or None when every candidate collides.
    pub fn rotated(&self, turn: Turn, board: &Board) -> Option<Self> {
        let candidate = Self {
            shape: self.shape.rotated(turn),
            ..*self
        };
        if candidate.fits(board) {
            return Some(candidate);
        }
        WALL_KICKS
            .iter()
            .map(|&kick| candidate.shifted(kick, 0))
            .find(|kicked| kicked.fits(board))
    }

    /// Lowest row this piece can reach by falling straight down.
    pub fn drop_y(&self, board: &Board) -> i32 {
        let mut y = self.y;
        while board.is_valid_placement(&self.shape, self.x, y + 1) {
            y += 1;
        }
        y
    }

    /// Copy of the piece moved to its landing row.
    pub fn dropped(&self, board: &Board) -> Self {
        self.at(self.x, self.drop_y(board))
    }
}

/// Column where a shape of `width` spawns on a board of `cols` columns.
pub fn spawn_x(cols: usize, width: usize) -> i32 {
    (cols / 2) as i32 - (width / 2) as i32
}
