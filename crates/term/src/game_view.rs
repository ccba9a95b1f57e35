//! GameView: maps a running `GameState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use blockfall_core::{GameState, Shape};

use crate::canvas::{draw_board, draw_shape, Canvas, GridCanvas};
use crate::effects::Effects;
use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::palette::{self, ColorSet, PREVIEW_ALPHA};
use crate::types::PieceKind;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PANEL_GAP: u16 = 2;
const PANEL_W: u16 = 12;
/// Preview slot in board cells; fits every piece in spawn orientation.
const MINI_COLS: u16 = 4;
const MINI_ROWS: u16 = 2;

/// Terminal layout for the playfield and its side panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns and rows needed for the bordered board plus the side panel.
    pub fn required_size(&self, cols: usize, visible_rows: usize) -> (u16, u16) {
        let board_w = clamp_u16(cols).saturating_mul(self.cell_w).saturating_add(2);
        let board_h = clamp_u16(visible_rows).saturating_add(2);
        (board_w.saturating_add(PANEL_GAP + PANEL_W), board_h)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        state: &GameState,
        effects: &Effects,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell {
            ch: ' ',
            style: CellStyle::colors(palette::TEXT, palette::BACKGROUND),
        });

        let board = state.board();
        let cols = clamp_u16(board.cols());
        let rows = clamp_u16(board.visible_rows());
        let hidden = board.hidden_rows();
        let (total_w, total_h) = self.required_size(board.cols(), board.visible_rows());
        let origin_x = viewport.width.saturating_sub(total_w) / 2;
        let origin_y = viewport.height.saturating_sub(total_h) / 2;
        let well_w = cols.saturating_mul(self.cell_w);
        let (frame_w, frame_h) = (well_w.saturating_add(2), rows.saturating_add(2));

        draw_border(fb, origin_x, origin_y, frame_w, frame_h);

        {
            let mut well = GridCanvas::new(fb, origin_x + 1, origin_y + 1, cols, rows)
                .with_cell_width(self.cell_w)
                .with_background(palette::WELL)
                .with_grid(true);
            well.clear();
            draw_board(&mut well, board, hidden);

            let offset = hidden as i32;
            if let (Some(active), Some(ghost_y)) = (state.active(), state.ghost_y()) {
                if ghost_y != active.y {
                    draw_shape(
                        &mut well,
                        &active.shape,
                        active.x,
                        ghost_y - offset,
                        ColorSet::for_kind(active.kind),
                        PREVIEW_ALPHA,
                    );
                }
                draw_shape(
                    &mut well,
                    &active.shape,
                    active.x,
                    active.y - offset,
                    ColorSet::for_kind(active.kind),
                    1.0,
                );
            }
            effects.draw(&mut well, offset);
        }

        let panel_x = origin_x.saturating_add(frame_w).saturating_add(PANEL_GAP);
        self.draw_panel(fb, state, panel_x, origin_y);

        if state.game_over() {
            draw_game_over(fb, state.score(), origin_x, origin_y, frame_w, frame_h);
        }
    }

    /// Allocate a framebuffer and render into it.
    pub fn render(&self, state: &GameState, effects: &Effects, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(state, effects, viewport, &mut fb);
        fb
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, state: &GameState, x: u16, y: u16) {
        let label = CellStyle::colors(palette::LABEL, palette::BACKGROUND).bold();
        let value = CellStyle::colors(palette::TEXT, palette::BACKGROUND);

        let mut y = y;
        for (name, number) in [
            ("SCORE", state.score()),
            ("LINES", state.lines()),
            ("LEVEL", state.level()),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y + 1, number, value);
            y += 3;
        }

        fb.put_str(x, y, "HOLD", label);
        y += 1;
        if let Some(kind) = state.hold_piece() {
            let alpha = if state.can_hold() { 1.0 } else { 0.4 };
            self.draw_mini(fb, kind, x, y, alpha);
        }
        y += MINI_ROWS + 1;

        fb.put_str(x, y, "NEXT", label);
        y += 1;
        for kind in state.next_queue() {
            if y.saturating_add(MINI_ROWS) > fb.height() {
                break;
            }
            self.draw_mini(fb, kind, x, y, 1.0);
            y += MINI_ROWS + 1;
        }
    }

    fn draw_mini(&self, fb: &mut FrameBuffer, kind: PieceKind, x: u16, y: u16, alpha: f32) {
        let shape = Shape::spawn(kind);
        let dx = (MINI_COLS as i32 - shape.width() as i32) / 2;
        let dy = (MINI_ROWS as i32 - shape.height() as i32) / 2;
        let mut slot = GridCanvas::new(fb, x, y, MINI_COLS, MINI_ROWS)
            .with_cell_width(self.cell_w)
            .with_background(palette::BACKGROUND);
        draw_shape(&mut slot, &shape, dx, dy, ColorSet::for_kind(kind), alpha);
    }
}

/// Board dimensions past `u16::MAX` cannot be shown anyway.
fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

pub(crate) fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }
    let style = CellStyle::colors(palette::BORDER, palette::BACKGROUND);
    let right = x.saturating_add(w - 1);
    let bottom = y.saturating_add(h - 1);
    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for cx in x + 1..right {
        fb.put_char(cx, y, '─', style);
        fb.put_char(cx, bottom, '─', style);
    }
    for cy in y + 1..bottom {
        fb.put_char(x, cy, '│', style);
        fb.put_char(right, cy, '│', style);
    }
}

/// Centered panel over the board with the final score and the key hints.
fn draw_game_over(fb: &mut FrameBuffer, score: u32, x: u16, y: u16, w: u16, h: u16) {
    const BOX_W: u16 = 16;
    const BOX_H: u16 = 7;
    let bx = x + w.saturating_sub(BOX_W) / 2;
    let by = y + h.saturating_sub(BOX_H) / 2;
    let fill = CellStyle::colors(palette::TEXT, palette::BACKGROUND);
    fb.fill_rect(bx, by, BOX_W, BOX_H, ' ', fill);
    draw_border(fb, bx, by, BOX_W, BOX_H);

    let title = CellStyle::colors(palette::HIGHLIGHT, palette::BACKGROUND).bold();
    let center = |text_w: u16| bx + BOX_W.saturating_sub(text_w) / 2;
    fb.put_str(center(9), by + 1, "GAME OVER", title);

    let digits = score.checked_ilog10().unwrap_or(0) as u16 + 1;
    let after = fb.put_str(center(6 + digits), by + 3, "SCORE ", fill);
    fb.put_u32(after, by + 3, score, fill.bold());

    let hint = CellStyle::colors(palette::LABEL, palette::BACKGROUND);
    fb.put_str(center(9), by + 4, "R restart", hint);
    fb.put_str(center(8), by + 5, "Esc menu", hint);
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::{Board, GameConfig};

    fn find(fb: &FrameBuffer, needle: &str) -> Option<(u16, u16)> {
        (0..fb.height()).find_map(|y| {
            let row = fb.row_text(y);
            row.find(needle)
                .map(|byte| (row[..byte].chars().count() as u16, y))
        })
    }

    #[test]
    fn fresh_game_shows_panel_and_active_piece() {
        let mut state = GameState::new(GameConfig {
            seed: Some(5),
            ..GameConfig::instant()
        });
        state.start();

        let fb = GameView::new().render(&state, &Effects::new(), Viewport::new(60, 24));
        assert!(find(&fb, "SCORE").is_some());
        assert!(find(&fb, "NEXT").is_some());
        assert!(find(&fb, "GAME OVER").is_none());

        // The piece spawns in the hidden rows, so only the ghost at the floor is visible.
        let (w, h) = GameView::new().required_size(10, 20);
        let origin_x = (60 - w) / 2;
        let floor_y = (24 - h) / 2 + 20;
        let ghost_cells = (0..20u16)
            .filter(|&dx| fb.get(origin_x + 1 + dx, floor_y).is_some_and(|c| c.ch == '█'))
            .count();
        assert!(ghost_cells > 0);
    }

    #[test]
    fn settled_cells_render_below_hidden_rows() {
        let mut board = Board::with_hidden_rows(10, 20, 4);
        board.set(0, 23, Some(PieceKind::Z));
        let state = GameState::with_board(GameConfig::instant(), board);

        let fb = GameView::new().render(&state, &Effects::new(), Viewport::new(40, 22));
        // Board is 22 rows tall and 22 + 14 wide, centered horizontally.
        let origin_x = (40 - 36) / 2;
        let cell = fb.get(origin_x + 1, 20);
        assert_eq!(cell.map(|c| c.ch), Some('█'));
        assert_eq!(
            cell.map(|c| c.style.fg),
            Some(ColorSet::for_kind(PieceKind::Z).main)
        );
    }

    #[test]
    fn game_over_overlay_shows_score_and_hints() {
        let mut board = Board::with_hidden_rows(10, 20, 4);
        for y in 0..24 {
            for x in 0..10 {
                if x != 9 {
                    board.set(x, y, Some(PieceKind::L));
                }
            }
        }
        let mut state = GameState::with_board(GameConfig::instant(), board);
        state.start();
        assert!(state.game_over());

        let fb = GameView::new().render(&state, &Effects::new(), Viewport::new(60, 24));
        assert!(find(&fb, "GAME OVER").is_some());
        assert!(find(&fb, "SCORE 0").is_some());
        assert!(find(&fb, "R restart").is_some());
        assert!(find(&fb, "Esc menu").is_some());
    }

    #[test]
    fn oversized_board_renders_clipped() {
        assert_eq!(GameView::new().required_size(40_000, 20).0, u16::MAX);
        assert_eq!(GameView::new().required_size(70_000, 70_000), (u16::MAX, u16::MAX));

        let board = Board::with_hidden_rows(40_000, 20, 4);
        let mut state = GameState::with_board(
            GameConfig {
                seed: Some(3),
                ..GameConfig::instant()
            },
            board,
        );
        state.start();
        let fb = GameView::new().render(&state, &Effects::new(), Viewport::new(80, 24));
        // Wider than the viewport: the well starts at the left edge.
        assert_eq!(fb.get(0, 1).map(|c| c.ch), Some('┌'));
    }
}
