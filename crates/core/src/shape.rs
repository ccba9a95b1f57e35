//! Shape module - tetromino shape matrices and rotation
//!
//! A shape is a small occupancy matrix (at most 4x4). Rotation is a pure
//! transform: transpose, then reverse each row (clockwise) or reverse the
//! row order (counter-clockwise). There is no rotation center and no hidden
//! state, so the footprint after a turn depends only on the matrix.

use crate::types::{PieceKind, Turn};

/// Largest side of any tetromino matrix
pub const MAX_SHAPE_SIDE: usize = 4;

/// Occupancy matrix of a piece, `height` rows by `width` columns.
///
/// `Shape` is `Copy`; every piece owns its own value so rotating one piece can
/// never alter another piece of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    filled: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl Shape {
    /// Build a shape from rows of 0/1 (or 0/type) values.
    ///
    /// Returns None when the matrix is empty, ragged or larger than 4x4.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if height == 0 || width == 0 || height > MAX_SHAPE_SIDE || width > MAX_SHAPE_SIDE {
            return None;
        }
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }

        let mut filled = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                filled[y][x] = value != 0;
            }
        }
        Some(Self {
            width: width as u8,
            height: height as u8,
            filled,
        })
    }

    /// Spawn orientation for a piece kind
    pub fn spawn(kind: PieceKind) -> Self {
        let rows: &[&[u8]] = match kind {
            PieceKind::I => &[&[1, 1, 1, 1]],
            PieceKind::O => &[&[1, 1], &[1, 1]],
            PieceKind::T => &[&[0, 1, 0], &[1, 1, 1]],
            PieceKind::S => &[&[0, 1, 1], &[1, 1, 0]],
            PieceKind::Z => &[&[1, 1, 0], &[0, 1, 1]],
            PieceKind::J => &[&[1, 0, 0], &[1, 1, 1]],
            PieceKind::L => &[&[0, 0, 1], &[1, 1, 1]],
        };
        // The table above is always within bounds and rectangular.
        match Self::from_rows(rows) {
            Some(shape) => shape,
            None => unreachable!("spawn table entries are valid shapes"),
        }
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Whether the matrix cell at (x, y) is filled. Out of range is empty.
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && self.filled[y][x]
    }

    /// Offsets (dx, dy) of all filled cells, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.height()).flat_map(move |y| {
            (0..self.width())
                .filter(move |&x| self.filled[y][x])
                .map(move |x| (x as i32, y as i32))
        })
    }

    /// Transposed copy (rows become columns).
    fn transposed(&self) -> Self {
        let mut filled = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for y in 0..self.height() {
            for x in 0..self.width() {
                filled[x][y] = self.filled[y][x];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            filled,
        }
    }

    /// Rotate by one quarter turn, returning a new matrix.
    pub fn rotated(&self, turn: Turn) -> Self {
        let t = self.transposed();
        let (w, h) = (t.width(), t.height());
        let mut filled = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for y in 0..h {
            for x in 0..w {
                filled[y][x] = match turn {
                    // Reverse each row.
                    Turn::Cw => t.filled[y][w - 1 - x],
                    // Reverse the row order.
                    Turn::Ccw => t.filled[h - 1 - y][x],
                };
            }
        }
        Self { filled, ..t }
    }

    /// Apply `count` clockwise quarter turns.
    pub fn rotated_cw_times(&self, count: u8) -> Self {
        (0..count % 4).fold(*self, |shape, _| shape.rotated(Turn::Cw))
    }

    /// Rows as 0/`id` values, for snapshots and debugging.
    pub fn to_rows(&self, id: u8) -> Vec<Vec<u8>> {
        (0..self.height())
            .map(|y| {
                (0..self.width())
                    .map(|x| if self.filled[y][x] { id } else { 0 })
                    .collect()
            })
            .collect()
    }
}
