//! Attract mode: the bot playing on its own board behind the menu.
//!
//! The bot places one piece per step. Each placement is locked and then the
//! board runs the full gravity and clear fixed point with no pauses. When a
//! piece has no placement at all the board starts over empty.

use arrayvec::ArrayVec;

use blockfall_core::types::{PieceKind, SoundEvent, ATTRACT_STEP_MS};
use blockfall_core::{Board, Piece, SimpleRng};

use crate::search::{find_best_move, Placement};

/// What one attract step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttractStep {
    /// A piece was locked; `cleared` rows were removed while resolving.
    Placed { cleared: usize },
    /// No placement existed and the board was emptied.
    Reset,
}

impl AttractStep {
    /// Sound cues for the menu mix.
    pub fn sounds(&self) -> ArrayVec<SoundEvent, 2> {
        let mut out = ArrayVec::new();
        if let AttractStep::Placed { cleared } = *self {
            out.push(SoundEvent::Lock);
            if cleared > 0 {
                out.push(SoundEvent::LineClear);
            }
        }
        out
    }
}

#[derive(Debug, Clone)]
pub struct AttractBot {
    board: Board,
    current: Piece,
    planned: Option<Placement>,
    rng: SimpleRng,
    step_ms: u32,
    timer_ms: u32,
}

impl AttractBot {
    pub fn new(cols: usize, rows: usize, seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let board = Board::new(cols, rows);
        let current = random_piece(&mut rng, cols);
        let planned = find_best_move(&board, &current);
        Self {
            board,
            current,
            planned,
            rng,
            step_ms: ATTRACT_STEP_MS,
            timer_ms: 0,
        }
    }

    pub fn with_step_ms(mut self, step_ms: u32) -> Self {
        self.step_ms = step_ms.max(1);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Piece waiting at the top.
    pub fn current(&self) -> &Piece {
        &self.current
    }

    /// Where the bot will put the current piece.
    pub fn preview(&self) -> Option<&Placement> {
        self.planned.as_ref()
    }

    /// Start over on an empty board of a new size. No-op if the size is unchanged.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        if self.board.cols() == cols && self.board.rows() == rows {
            return;
        }
        self.board = Board::new(cols, rows);
        self.next_piece();
    }

    /// Advance the step timer; runs at most one step per call.
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<AttractStep> {
        self.timer_ms = self.timer_ms.saturating_add(elapsed_ms);
        if self.timer_ms < self.step_ms {
            return None;
        }
        self.timer_ms = 0;
        Some(self.step())
    }

    /// Place the current piece (or reset), then draw the next one.
    pub fn step(&mut self) -> AttractStep {
        let outcome = match self.planned {
            Some(placement) => {
                let piece = placement.piece;
                self.board.lock(&piece.shape, piece.x, piece.y, piece.kind);
                let summary = self.board.resolve();
                AttractStep::Placed {
                    cleared: summary.total_cleared(),
                }
            }
            None => {
                self.board.clear();
                AttractStep::Reset
            }
        };
        self.next_piece();
        outcome
    }

    fn next_piece(&mut self) {
        self.current = random_piece(&mut self.rng, self.board.cols());
        self.planned = find_best_move(&self.board, &self.current);
    }
}

/// Random kind in spawn orientation at a random column in `[0, cols - width)`.
fn random_piece(rng: &mut SimpleRng, cols: usize) -> Piece {
    let kind: PieceKind = rng.next_kind();
    let piece = Piece::spawn(kind, cols);
    let span = cols.saturating_sub(piece.shape.width()) as u32;
    piece.at(rng.next_range(span) as i32, 0)
}
