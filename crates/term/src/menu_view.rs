//! Title menu drawn over the attract-mode board.

use blockfall_bot::AttractBot;

use crate::canvas::{draw_board, draw_shape, Canvas, GridCanvas};
use crate::fb::{CellStyle, FrameBuffer};
use crate::game_view::{draw_border, Viewport};
use crate::palette::{self, ColorSet, PREVIEW_ALPHA};

const TITLE: &str = "BLOCKFALL";
const HINT: &str = "Enter select · q quit";

pub struct MenuView {
    cell_w: u16,
}

impl Default for MenuView {
    fn default() -> Self {
        Self { cell_w: 2 }
    }
}

impl MenuView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attract board dimensions that cover the whole viewport.
    pub fn board_size(&self, viewport: Viewport) -> (usize, usize) {
        let cols = (viewport.width / self.cell_w).max(4);
        let rows = viewport.height.max(4);
        (cols as usize, rows as usize)
    }

    pub fn render_into(
        &self,
        bot: &AttractBot,
        entries: &[&str],
        selected: usize,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        let board = bot.board();
        {
            let mut canvas = GridCanvas::new(
                fb,
                0,
                0,
                board.cols() as u16,
                board.rows() as u16,
            )
            .with_cell_width(self.cell_w)
            .with_background(palette::BACKGROUND);
            canvas.clear();
            draw_board(&mut canvas, board, 0);

            let current = bot.current();
            if let Some(plan) = bot.preview() {
                let p = plan.piece;
                draw_shape(
                    &mut canvas,
                    &p.shape,
                    p.x,
                    p.y,
                    ColorSet::for_kind(p.kind),
                    PREVIEW_ALPHA,
                );
            }
            draw_shape(
                &mut canvas,
                &current.shape,
                current.x,
                current.y,
                ColorSet::for_kind(current.kind),
                1.0,
            );
        }

        self.draw_menu(fb, entries, selected, viewport);
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, entries: &[&str], selected: usize, viewport: Viewport) {
        let inner_w = entries
            .iter()
            .map(|e| e.chars().count() + 4)
            .chain([TITLE.len(), HINT.chars().count()])
            .max()
            .unwrap_or(0) as u16;
        let box_w = inner_w + 4;
        let box_h = entries.len() as u16 + 6;
        let bx = viewport.width.saturating_sub(box_w) / 2;
        let by = viewport.height.saturating_sub(box_h) / 2;

        let fill = CellStyle::colors(palette::TEXT, palette::BACKGROUND);
        fb.fill_rect(bx, by, box_w, box_h, ' ', fill);
        draw_border(fb, bx, by, box_w, box_h);

        let center = |text: &str| bx + box_w.saturating_sub(text.chars().count() as u16) / 2;
        let title = CellStyle::colors(palette::HIGHLIGHT, palette::BACKGROUND).bold();
        fb.put_str(center(TITLE), by + 1, TITLE, title);

        for (i, entry) in entries.iter().enumerate() {
            let y = by + 3 + i as u16;
            let x = center(entry);
            if i == selected {
                let style = CellStyle::colors(palette::HIGHLIGHT, palette::BACKGROUND).bold();
                fb.put_char(x.saturating_sub(2), y, '▶', style);
                fb.put_str(x, y, entry, style);
            } else {
                fb.put_str(x, y, entry, fill);
            }
        }

        let hint = CellStyle::colors(palette::LABEL, palette::BACKGROUND);
        fb.put_str(center(HINT), by + box_h - 2, HINT, hint);
    }
}
