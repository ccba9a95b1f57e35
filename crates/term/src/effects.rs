//! Short-lived visual effects layered over the board.

use blockfall_core::Piece;

use crate::canvas::{draw_shape, Canvas};
use crate::palette::ColorSet;

pub const FLASH_LIFE: f32 = 1.0;
pub const FLASH_DECAY: f32 = 0.08;

/// Afterglow of a hard-dropped piece at its resting position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flash {
    pub piece: Piece,
    pub life: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Effects {
    flashes: Vec<Flash>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_flash(&mut self, piece: Piece) {
        self.flashes.push(Flash {
            piece,
            life: FLASH_LIFE,
        });
    }

    pub fn flashes(&self) -> &[Flash] {
        &self.flashes
    }

    pub fn is_empty(&self) -> bool {
        self.flashes.is_empty()
    }

    pub fn clear(&mut self) {
        self.flashes.clear();
    }

    /// Age every effect by one rendered frame, dropping the expired ones.
    pub fn advance_frame(&mut self) {
        self.flashes.retain_mut(|flash| {
            flash.life -= FLASH_DECAY;
            flash.life > 0.0
        });
    }

    /// Draw live effects; board rows above `row_offset` are off-canvas.
    pub fn draw<C>(&self, canvas: &mut C, row_offset: i32)
    where
        C: Canvas + ?Sized,
    {
        for flash in &self.flashes {
            let colors = ColorSet::flat(ColorSet::for_kind(flash.piece.kind).light);
            draw_shape(
                canvas,
                &flash.piece.shape,
                flash.piece.x,
                flash.piece.y - row_offset,
                colors,
                flash.life,
            );
        }
    }
}
