//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] commands and
//! menu navigation, and provides a DAS/ARR handler for horizontal movement
//! suitable for terminals with or without key-release events.
//!
//! All timing is driven by the elapsed milliseconds passed to
//! [`InputHandler::update`], never by the wall clock.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::{HorizontalDirection, InputConfig, InputHandler};
pub use map::{handle_key_event, handle_menu_key, should_quit, MenuCommand};
