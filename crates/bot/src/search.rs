//! Greedy one-piece placement search.
//!
//! Every rotation (0 to 3 clockwise turns) is combined with every column
//! offset. A candidate must fit at row 0; it is dropped straight down, locked
//! into a copy of the board and the copy is scored without clearing rows.
//! Only a strictly better score replaces the best so far, so ties go to the
//! first candidate in rotation-then-offset order.

use blockfall_core::{Board, Piece};

use crate::heuristic::{PlacementEvaluator, Weights};

/// Leftmost column offset tried for every rotation.
pub const MIN_OFFSET: i32 = -2;

/// Chosen placement: the piece at its landing position, ready to lock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Clockwise quarter turns applied to the input shape.
    pub rotation: u8,
    pub piece: Piece,
    pub score: f64,
}

/// Best placement under the default weights.
pub fn find_best_move(board: &Board, piece: &Piece) -> Option<Placement> {
    find_best_move_with(board, piece, &Weights::DEFAULT)
}

/// Best placement for `piece` on `board` under `evaluator`.
///
/// Returns None when no rotation fits anywhere at row 0.
pub fn find_best_move_with<E>(board: &Board, piece: &Piece, evaluator: &E) -> Option<Placement>
where
    E: PlacementEvaluator + ?Sized,
{
    let mut best: Option<Placement> = None;
    let mut scratch = board.clone();

    for rotation in 0..4u8 {
        let shape = piece.shape.rotated_cw_times(rotation);
        for x in MIN_OFFSET..board.cols() as i32 {
            let candidate = Piece {
                shape,
                ..*piece
            }
            .at(x, 0);
            if !candidate.fits(board) {
                continue;
            }
            let landed = candidate.dropped(board);

            scratch.clone_from(board);
            scratch.lock(&landed.shape, landed.x, landed.y, landed.kind);
            let score = evaluator.evaluate(&scratch);

            if best.map_or(true, |b| score > b.score) {
                best = Some(Placement {
                    rotation,
                    piece: landed,
                    score,
                });
            }
        }
    }
    best
}
