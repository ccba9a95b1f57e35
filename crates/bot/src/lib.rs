//! Placement bot: greedy one-piece search over rotations and columns.
//!
//! Used for the attract mode behind the menu and for headless simulation.

pub mod attract;
pub mod heuristic;
pub mod place;
pub mod search;

pub use attract::{AttractBot, AttractStep};
pub use heuristic::{BoardFeatures, PlacementEvaluator, Weights};
pub use place::{apply_placement, PlaceError};
pub use search::{find_best_move, find_best_move_with, Placement, MIN_OFFSET};
