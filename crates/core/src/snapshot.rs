use serde::{Deserialize, Serialize};

use crate::piece::Piece;

/// Active piece as exported in snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: String,
    pub x: i32,
    pub y: i32,
    /// Shape matrix as 0 / type-id rows.
    pub shape: Vec<Vec<u8>>,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind.as_str().to_string(),
            x: value.x,
            y: value.y,
            shape: value.shape.to_rows(value.kind.id()),
        }
    }
}

/// Serializable view of a game, used by headless runs and tests.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub cols: usize,
    /// Total rows including hidden rows.
    pub rows: usize,
    pub hidden_rows: usize,
    /// Board rows top to bottom, 0 for empty or the piece type id.
    pub board: Vec<Vec<u8>>,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i32>,
    pub hold: Option<String>,
    pub next_queue: Vec<String>,
    pub can_hold: bool,
    pub phase: String,
    pub game_over: bool,
    pub episode_id: u32,
    pub seed: u32,
    pub pieces_spawned: u32,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && self.active.is_some()
    }

    /// Number of occupied board cells.
    pub fn filled_cells(&self) -> usize {
        self.board
            .iter()
            .flatten()
            .filter(|&&id| id != 0)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use crate::game_state::GameState;

    #[test]
    fn snapshot_json_uses_camel_case() {
        let mut state = GameState::with_seed(3);
        state.start();
        let snapshot = state.snapshot();
        assert!(snapshot.playable());
        assert_eq!(snapshot.filled_cells(), 0);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["hiddenRows"], 4);
        assert_eq!(json["nextQueue"].as_array().map(|a| a.len()), Some(5));
        assert_eq!(json["phase"], "active");
        assert_eq!(json["level"], 1);
    }
}
