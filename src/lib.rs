//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under `blockfall::{core,bot,input,term,audio,types}`
//! and holds the application layer: the menu/playing state machine, settings,
//! diagnostics, the CLI and headless simulation.

pub use blockfall_audio as audio;
pub use blockfall_bot as bot;
pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod app;
pub mod cli;
pub mod diag;
pub mod settings;
pub mod simulate;
