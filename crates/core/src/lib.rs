//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules, state management and simulation. It has
//! no dependencies on terminal, audio or input handling, so it can run in any
//! environment (terminal, headless simulation, tests, benchmarks).
//!
//! # Module Structure
//!
//! - [`board`]: grid with collision queries, per-cell gravity and row clearing
//! - [`shape`]: tetromino matrices and the transpose-based rotation
//! - [`piece`]: a shape at a board position, wall kicks, drop distance
//! - [`rng`]: seeded LCG and the uniform lookahead queue
//! - [`scoring`]: flat line points, level and gravity interval
//! - [`config`]: board size, timings and seed
//! - [`events`]: notifications for sounds and effects
//! - [`game_state`]: the controller tying it all together
//! - [`snapshot`]: serializable view of a game
//!
//! # Game Rules
//!
//! - Pieces are drawn uniformly at random; five are visible ahead.
//! - Rotation transposes the matrix; blocked rotations try kicks of -1, +1, -2, +2 columns.
//! - After a lock every floating cell falls on its own and full rows clear,
//!   repeated until the board is stable. Chains score as separate clears.
//! - Every cleared row is worth 10 points. Level is `lines / 10 + 1`.
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, GameState};
//! use blockfall_core::types::GameAction;
//!
//! let mut game = GameState::new(GameConfig::instant());
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.board().cells().iter().any(|c| c.is_some()));
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed time in milliseconds. Gravity starts at 1000ms per row and speeds up
//! by 50ms per level down to 100ms.

pub mod board;
pub mod config;
pub mod events;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shape;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, PassOutcome, ResolveSummary};
pub use config::{ConfigError, GameConfig};
pub use events::GameEvent;
pub use game_state::{GameState, Phase, Resolve, ResolveStep};
pub use piece::{spawn_x, Piece, WALL_KICKS};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{drop_interval_ms, level_for_lines, line_clear_points};
pub use shape::Shape;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
