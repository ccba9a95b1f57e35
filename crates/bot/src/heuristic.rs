//! Board evaluation for the placement bot.

use blockfall_core::Board;

/// Raw board features the evaluator weighs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardFeatures {
    /// Rows with every cell occupied.
    pub full_lines: u32,
    /// Sum of column heights.
    pub aggregate_height: u32,
    /// Empty cells with an occupied cell somewhere above them in the same column.
    pub holes: u32,
    /// Sum of absolute height differences between adjacent columns.
    pub bumpiness: u32,
}

impl BoardFeatures {
    pub fn from_board(board: &Board) -> Self {
        let heights = board.column_heights();
        let full_lines = (0..board.rows()).filter(|&y| board.is_row_full(y)).count() as u32;

        let mut holes = 0;
        for x in 0..board.cols() as i32 {
            let mut covered = false;
            for y in 0..board.rows() as i32 {
                if board.is_occupied(x, y) {
                    covered = true;
                } else if covered {
                    holes += 1;
                }
            }
        }

        let bumpiness = heights
            .windows(2)
            .map(|pair| pair[0].abs_diff(pair[1]) as u32)
            .sum();

        Self {
            full_lines,
            aggregate_height: heights.iter().sum::<usize>() as u32,
            holes,
            bumpiness,
        }
    }
}

pub trait PlacementEvaluator {
    /// Score a board after a hypothetical placement. Higher is better.
    fn evaluate(&self, board: &Board) -> f64;
}

/// Linear weights: reward full lines, penalize height, holes and bumpiness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub full_line: f64,
    pub height: f64,
    pub hole: f64,
    pub bumpiness: f64,
}

impl Weights {
    pub const DEFAULT: Self = Self {
        full_line: 50.0,
        height: 0.5,
        hole: 10.0,
        bumpiness: 0.2,
    };

    pub fn score(&self, features: &BoardFeatures) -> f64 {
        self.full_line * f64::from(features.full_lines)
            - self.height * f64::from(features.aggregate_height)
            - self.hole * f64::from(features.holes)
            - self.bumpiness * f64::from(features.bumpiness)
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl PlacementEvaluator for Weights {
    #[inline]
    fn evaluate(&self, board: &Board) -> f64 {
        self.score(&BoardFeatures::from_board(board))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::types::PieceKind;

    #[test]
    fn empty_board_scores_zero() {
        let board = Board::new(10, 20);
        assert_eq!(BoardFeatures::from_board(&board), BoardFeatures::default());
        assert_eq!(Weights::DEFAULT.evaluate(&board), 0.0);
    }

    #[test]
    fn features_count_heights_holes_and_bumps() {
        let mut board = Board::new(3, 4);
        // Column 0: cell at row 1 with a hole below at rows 2 and 3.
        board.set(0, 1, Some(PieceKind::T));
        // Column 2: one cell on the floor.
        board.set(2, 3, Some(PieceKind::O));
        let features = BoardFeatures::from_board(&board);
        assert_eq!(features.aggregate_height, 3 + 0 + 1);
        assert_eq!(features.holes, 2);
        assert_eq!(features.bumpiness, 3 + 1);
        assert_eq!(features.full_lines, 0);

        let expected = -0.5 * 4.0 - 10.0 * 2.0 - 0.2 * 4.0;
        assert!((Weights::DEFAULT.evaluate(&board) - expected).abs() < 1e-9);
    }

    #[test]
    fn full_lines_are_counted_before_clearing() {
        let mut board = Board::new(2, 2);
        board.set(0, 1, Some(PieceKind::I));
        board.set(1, 1, Some(PieceKind::I));
        let features = BoardFeatures::from_board(&board);
        assert_eq!(features.full_lines, 1);
        assert_eq!(features.aggregate_height, 2);
    }
}
