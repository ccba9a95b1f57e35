//! Notifications produced by the game controller.
//!
//! The controller queues events as rules fire; the frontend drains them once
//! per frame and turns them into sounds and effects.

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::SoundEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Horizontal move succeeded.
    Moved,
    /// Rotation succeeded (possibly after a wall kick).
    Rotated,
    Held,
    /// Soft drop command, whether the piece moved or locked.
    SoftDropped,
    /// Hard drop; `piece` is the piece at its landing position, before locking.
    HardDropped { piece: Piece },
    Locked,
    /// A gravity sweep moved at least one cell.
    BlocksFell,
    /// One clearing event removed `rows` rows.
    LinesCleared { rows: usize },
    GameOver,
}

impl GameEvent {
    /// Sound cues for this event, in playback order.
    pub fn sounds(&self) -> ArrayVec<SoundEvent, 2> {
        let mut out = ArrayVec::new();
        match self {
            GameEvent::Moved => out.push(SoundEvent::Move),
            GameEvent::Rotated | GameEvent::Held => out.push(SoundEvent::Rotate),
            GameEvent::SoftDropped => out.push(SoundEvent::SoftDrop),
            GameEvent::HardDropped { .. } => out.push(SoundEvent::HardDrop),
            GameEvent::Locked => out.push(SoundEvent::Lock),
            GameEvent::BlocksFell => out.push(SoundEvent::BlockFall),
            GameEvent::LinesCleared { rows } => {
                out.push(SoundEvent::LineClear);
                if *rows == 4 {
                    out.push(SoundEvent::LineClearQuad);
                }
            }
            GameEvent::GameOver => out.push(SoundEvent::GameOver),
        }
        out
    }
}
