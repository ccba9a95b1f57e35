//! Game configuration: board size, timings, lookahead and seed.

use serde::{Deserialize, Serialize};

use crate::scoring;
use crate::types::{
    BASE_DROP_MS, BOARD_COLS, CLEAR_PAUSE_MS, DROP_STEP_MS, HIDDEN_ROWS, MIN_DROP_MS,
    NEXT_QUEUE_LEN, SETTLE_PAUSE_MS, VISIBLE_ROWS,
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("failed to read config {path}: {message}")]
    Read { path: String, message: String },
    #[display("invalid config JSON: {message}")]
    Parse { message: String },
    #[display("invalid config: {reason}")]
    Invalid { reason: &'static str },
}

/// Largest board width a terminal view can draw.
pub const MAX_COLS: usize = 255;
/// Largest board height, hidden rows included.
pub const MAX_ROWS: usize = 255;

/// Rules and timing for one game instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub cols: usize,
    pub visible_rows: usize,
    pub hidden_rows: usize,
    pub next_queue_len: usize,
    pub base_drop_ms: u32,
    pub drop_step_ms: u32,
    pub min_drop_ms: u32,
    /// Pause after a gravity sweep moved cells. 0 resolves instantly.
    pub settle_pause_ms: u32,
    /// Pause after a clearing event. 0 resolves instantly.
    pub clear_pause_ms: u32,
    /// None picks a seed from the clock at startup.
    pub seed: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: BOARD_COLS,
            visible_rows: VISIBLE_ROWS,
            hidden_rows: HIDDEN_ROWS,
            next_queue_len: NEXT_QUEUE_LEN,
            base_drop_ms: BASE_DROP_MS,
            drop_step_ms: DROP_STEP_MS,
            min_drop_ms: MIN_DROP_MS,
            settle_pause_ms: SETTLE_PAUSE_MS,
            clear_pause_ms: CLEAR_PAUSE_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Defaults with both resolve pauses set to zero (headless play and tests).
    pub fn instant() -> Self {
        Self {
            settle_pause_ms: 0,
            clear_pause_ms: 0,
            ..Self::default()
        }
    }

    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `BLOCKFALL_SEED` and `BLOCKFALL_BASE_DROP_MS` overrides.
    ///
    /// `lookup` returns the raw variable value; unparsable values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup("BLOCKFALL_SEED").and_then(|s| s.trim().parse().ok()) {
            self.seed = Some(seed);
        }
        if let Some(ms) = lookup("BLOCKFALL_BASE_DROP_MS").and_then(|s| s.trim().parse().ok()) {
            self.base_drop_ms = ms;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == 0 || self.visible_rows == 0 {
            return Err(ConfigError::Invalid {
                reason: "board dimensions must be non-zero",
            });
        }
        if self.cols > MAX_COLS {
            return Err(ConfigError::Invalid {
                reason: "cols must be at most 255",
            });
        }
        if self.total_rows() > MAX_ROWS {
            return Err(ConfigError::Invalid {
                reason: "visible_rows + hidden_rows must be at most 255",
            });
        }
        if self.min_drop_ms > self.base_drop_ms {
            return Err(ConfigError::Invalid {
                reason: "min_drop_ms must not exceed base_drop_ms",
            });
        }
        if self.next_queue_len == 0 {
            return Err(ConfigError::Invalid {
                reason: "next_queue_len must be at least 1",
            });
        }
        Ok(())
    }

    pub fn total_rows(&self) -> usize {
        self.visible_rows.saturating_add(self.hidden_rows)
    }

    /// Gravity interval for `level` under this configuration.
    pub fn drop_interval_ms(&self, level: u32) -> u32 {
        scoring::drop_interval_ms(level, self.base_drop_ms, self.drop_step_ms, self.min_drop_ms)
    }
}
