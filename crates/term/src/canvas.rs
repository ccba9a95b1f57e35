//! Cell-grid drawing surface.
//!
//! Views draw in board coordinates (one unit per board cell) through [`Canvas`];
//! [`GridCanvas`] maps those cells onto a region of a [`FrameBuffer`].

use blockfall_core::{Board, Shape};

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::palette::{ColorSet, GRID};

pub trait Canvas {
    /// Erase the whole drawing area.
    fn clear(&mut self);

    /// Paint one board cell. Cells outside the area are ignored.
    fn draw_cell(&mut self, col: i32, row: i32, colors: ColorSet, alpha: f32);
}

/// A `cols` x `rows` grid of board cells placed at (`x`, `y`) in a framebuffer.
pub struct GridCanvas<'a> {
    fb: &'a mut FrameBuffer,
    x: u16,
    y: u16,
    cols: u16,
    rows: u16,
    cell_w: u16,
    background: Rgb,
    grid: bool,
}

impl<'a> GridCanvas<'a> {
    pub fn new(fb: &'a mut FrameBuffer, x: u16, y: u16, cols: u16, rows: u16) -> Self {
        Self {
            fb,
            x,
            y,
            cols,
            rows,
            cell_w: 2,
            background: Rgb::new(0, 0, 0),
            grid: false,
        }
    }

    pub fn with_cell_width(mut self, cell_w: u16) -> Self {
        self.cell_w = cell_w.max(1);
        self
    }

    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    /// Mark empty cells with a faint dot.
    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }
}

impl Canvas for GridCanvas<'_> {
    fn clear(&mut self) {
        let empty = CellStyle::colors(GRID, self.background);
        self.fb.fill_rect(
            self.x,
            self.y,
            self.cols.saturating_mul(self.cell_w),
            self.rows,
            ' ',
            empty,
        );
        if self.grid {
            for row in 0..self.rows {
                for col in 0..self.cols {
                    let px = self.x.saturating_add(col.saturating_mul(self.cell_w));
                    self.fb.put_char(px, self.y.saturating_add(row), '·', empty);
                }
            }
        }
    }

    fn draw_cell(&mut self, col: i32, row: i32, colors: ColorSet, alpha: f32) {
        if col < 0 || row < 0 || col >= i32::from(self.cols) || row >= i32::from(self.rows) {
            return;
        }
        let fg = colors.main.blend(self.background, alpha);
        let bg = colors.dark.blend(self.background, alpha);
        let style = CellStyle::colors(fg, bg);

        let px = self.x.saturating_add((col as u16).saturating_mul(self.cell_w));
        let py = self.y.saturating_add(row as u16);
        for dx in 0..self.cell_w {
            // Last column shows the dark edge.
            let ch = if self.cell_w > 1 && dx + 1 == self.cell_w {
                '▊'
            } else {
                '█'
            };
            self.fb.put_char(px.saturating_add(dx), py, ch, style);
        }
    }
}

/// Draw every filled cell of `shape` with its top-left at (`x`, `y`).
pub fn draw_shape<C>(canvas: &mut C, shape: &Shape, x: i32, y: i32, colors: ColorSet, alpha: f32)
where
    C: Canvas + ?Sized,
{
    for (dx, dy) in shape.cells() {
        canvas.draw_cell(x + dx, y + dy, colors, alpha);
    }
}

/// Draw the settled cells of `board`, skipping the first `row_offset` rows.
pub fn draw_board<C>(canvas: &mut C, board: &Board, row_offset: usize)
where
    C: Canvas + ?Sized,
{
    for (y, row) in board.row_slices().enumerate().skip(row_offset) {
        for (x, cell) in row.iter().enumerate() {
            if let Some(kind) = cell {
                canvas.draw_cell(
                    x as i32,
                    (y - row_offset) as i32,
                    ColorSet::for_kind(*kind),
                    1.0,
                );
            }
        }
    }
}
