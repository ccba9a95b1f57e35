//! Terminal game renderer.
//!
//! A small, game-oriented rendering layer: views draw board cells through a
//! [`Canvas`] into a framebuffer, which [`TerminalRenderer`] flushes with
//! crossterm. No widget or layout library is involved.
//!
//! - Board cells are 2 columns wide to compensate for glyph aspect ratio
//! - Translucency is emulated by blending colors into the background
//! - Everything except [`renderer`] is pure and unit-tested

pub mod canvas;
pub mod effects;
pub mod fb;
pub mod game_view;
pub mod menu_view;
pub mod palette;
pub mod renderer;

pub use blockfall_bot as bot;
pub use blockfall_core as core;
pub use blockfall_types as types;

pub use canvas::{draw_board, draw_shape, Canvas, GridCanvas};
pub use effects::{Effects, Flash};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use menu_view::MenuView;
pub use palette::ColorSet;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
