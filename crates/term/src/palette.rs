//! Piece colors and the fixed UI colors.

use crate::fb::Rgb;
use crate::types::PieceKind;

/// Main, highlight and shadow shades of one piece type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSet {
    pub main: Rgb,
    pub light: Rgb,
    pub dark: Rgb,
}

impl ColorSet {
    pub const fn new(main: Rgb, light: Rgb, dark: Rgb) -> Self {
        Self { main, light, dark }
    }

    /// Single-color set, used for effects that draw in one shade.
    pub const fn flat(color: Rgb) -> Self {
        Self::new(color, color, color)
    }

    pub fn for_kind(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::new(
                Rgb::new(0x00, 0xf0, 0xf0),
                Rgb::new(0xa0, 0xff, 0xff),
                Rgb::new(0x00, 0xa0, 0xa0),
            ),
            PieceKind::O => Self::new(
                Rgb::new(0xf0, 0xf0, 0x00),
                Rgb::new(0xff, 0xff, 0xa0),
                Rgb::new(0xa0, 0xa0, 0x00),
            ),
            PieceKind::T => Self::new(
                Rgb::new(0xa0, 0x00, 0xf0),
                Rgb::new(0xe0, 0xa0, 0xff),
                Rgb::new(0x60, 0x00, 0xa0),
            ),
            PieceKind::S => Self::new(
                Rgb::new(0x00, 0xf0, 0x00),
                Rgb::new(0xa0, 0xff, 0xa0),
                Rgb::new(0x00, 0xa0, 0x00),
            ),
            PieceKind::Z => Self::new(
                Rgb::new(0xf0, 0x00, 0x00),
                Rgb::new(0xff, 0xa0, 0xa0),
                Rgb::new(0xa0, 0x00, 0x00),
            ),
            PieceKind::J => Self::new(
                Rgb::new(0x00, 0x00, 0xf0),
                Rgb::new(0xa0, 0xa0, 0xff),
                Rgb::new(0x00, 0x00, 0xa0),
            ),
            PieceKind::L => Self::new(
                Rgb::new(0xf0, 0xa0, 0x00),
                Rgb::new(0xff, 0xc8, 0xa0),
                Rgb::new(0xa0, 0x60, 0x00),
            ),
        }
    }
}

pub const BACKGROUND: Rgb = Rgb::new(0x10, 0x10, 0x18);
pub const WELL: Rgb = Rgb::new(0x00, 0x00, 0x00);
pub const GRID: Rgb = Rgb::new(0x30, 0x30, 0x3c);
pub const BORDER: Rgb = Rgb::new(0x80, 0x80, 0x90);
pub const TEXT: Rgb = Rgb::new(0xdc, 0xdc, 0xdc);
pub const LABEL: Rgb = Rgb::new(0xa0, 0xa0, 0xb4);
pub const HIGHLIGHT: Rgb = Rgb::new(0xf0, 0xd0, 0x40);

/// Opacity of ghost pieces and the attract-mode placement preview.
pub const PREVIEW_ALPHA: f32 = 0.3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_distinct_main_color() {
        let mains: Vec<Rgb> = PieceKind::ALL
            .iter()
            .map(|&k| ColorSet::for_kind(k).main)
            .collect();
        for (i, a) in mains.iter().enumerate() {
            for b in &mains[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(ColorSet::for_kind(PieceKind::I).main, Rgb::new(0, 0xf0, 0xf0));
    }
}
