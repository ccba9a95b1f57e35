//! DAS/ARR input handler for terminal environments.
//!
//! Only horizontal movement repeats. A press moves once; holding past the DAS
//! delay repeats every ARR interval until release.
//!
//! Supports terminals that do not emit key release events: a direction is
//! released automatically once no press for it has been seen for
//! `release_timeout_ms`. Terminal autorepeat shows up as repeated presses,
//! which keep the hold alive without emitting extra moves.

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use crate::types::{GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS};

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state that triggers DAS/ARR repeats.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub das_ms: u32,
    pub arr_ms: u32,
    pub release_timeout_ms: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }
}

impl InputConfig {
    /// Apply `BLOCKFALL_DAS_MS` and `BLOCKFALL_ARR_MS` overrides; unparsable values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ms) = lookup("BLOCKFALL_DAS_MS").and_then(|s| s.trim().parse().ok()) {
            self.das_ms = ms;
        }
        if let Some(ms) = lookup("BLOCKFALL_ARR_MS").and_then(|s| s.trim().parse().ok()) {
            self.arr_ms = ms;
        }
    }
}

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    fn from_key(code: KeyCode) -> Self {
        match code {
            KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => HorizontalDirection::Left,
            KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => HorizontalDirection::Right,
            _ => HorizontalDirection::None,
        }
    }

    fn action(self) -> Option<GameAction> {
        match self {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        }
    }
}

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    /// Time since the held direction was last pressed.
    since_press_ms: u32,
    das_timer: u32,
    arr_accumulator: u32,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::from_config(&InputConfig::default())
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self::with_config(config.das_ms, config.arr_ms)
            .with_key_release_timeout_ms(config.release_timeout_ms)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            since_press_ms: 0,
            das_timer: 0,
            arr_accumulator: 0,
            das_delay,
            // A zero rate would repeat forever within one update.
            arr_rate: arr_rate.max(1),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    /// Register a key press. Returns the immediate move for a new direction.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let direction = HorizontalDirection::from_key(code);
        if direction == HorizontalDirection::None {
            return None;
        }

        self.since_press_ms = 0;
        if self.horizontal == direction {
            return None;
        }
        self.horizontal = direction;
        self.das_timer = 0;
        self.arr_accumulator = 0;
        direction.action()
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        let direction = HorizontalDirection::from_key(code);
        if direction != HorizontalDirection::None && self.horizontal == direction {
            self.release();
        }
    }

    fn release(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.das_timer = 0;
        self.arr_accumulator = 0;
    }

    /// Advance timers by `elapsed_ms` and return the repeat moves that fired.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 32> {
        let mut actions = ArrayVec::<GameAction, 32>::new();

        // Auto-release when terminal does not emit release events.
        self.since_press_ms = self.since_press_ms.saturating_add(elapsed_ms);
        if self.since_press_ms > self.key_release_timeout_ms {
            self.release();
        }

        let Some(action) = self.horizontal.action() else {
            return actions;
        };

        let prev_das = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);

        if self.das_timer >= self.das_delay {
            let excess = if prev_das < self.das_delay {
                self.das_timer - self.das_delay
            } else {
                elapsed_ms
            };
            self.arr_accumulator += excess;

            while self.arr_accumulator >= self.arr_rate {
                let _ = actions.try_push(action);
                self.arr_accumulator -= self.arr_rate;
            }
        }

        actions
    }

    pub fn reset(&mut self) {
        self.release();
        self.since_press_ms = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_das_arr_repeats_after_delay() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));

        // Before DAS expires: no repeats.
        let actions = ih.update(99);
        assert!(actions.is_empty());

        // Exactly at DAS: still no repeats (needs excess over DAS to accumulate ARR).
        let actions = ih.update(1);
        assert!(actions.is_empty());

        // First ARR interval after DAS: one repeat.
        let actions = ih.update(25);
        assert_eq!(actions.as_slice(), &[GameAction::MoveLeft]);

        // Another ARR interval: one repeat again.
        let actions = ih.update(25);
        assert_eq!(actions.as_slice(), &[GameAction::MoveLeft]);
    }

    #[test]
    fn default_timing_first_repeat_at_210ms() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);
        assert_eq!(ih.handle_key_press(KeyCode::Right), Some(GameAction::MoveRight));
        assert!(ih.update(209).is_empty());
        assert_eq!(ih.update(1).as_slice(), &[GameAction::MoveRight]);
    }

    #[test]
    fn test_auto_release_triggers_after_timeout_without_key_release_events() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
        assert_eq!(ih.horizontal(), HorizontalDirection::Left);

        let actions = ih.update(51);
        assert!(actions.is_empty());
        assert_eq!(ih.horizontal(), HorizontalDirection::None);
    }

    #[test]
    fn repeated_presses_keep_the_hold_alive() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);
        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
        for _ in 0..3 {
            assert!(ih.update(40).is_empty());
            assert_eq!(ih.handle_key_press(KeyCode::Left), None);
        }
        // 160ms held: 60ms past DAS is two ARR intervals.
        assert_eq!(
            ih.update(40).as_slice(),
            &[GameAction::MoveLeft, GameAction::MoveLeft]
        );
        assert_eq!(ih.horizontal(), HorizontalDirection::Left);
    }

    #[test]
    fn test_non_movement_key_does_not_extend_auto_release_timeout() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
        ih.update(30);
        assert_eq!(ih.handle_key_press(KeyCode::Up), None);
        ih.update(30);
        assert_eq!(ih.horizontal(), HorizontalDirection::None);
    }

    #[test]
    fn release_of_other_direction_is_ignored() {
        let mut ih = InputHandler::with_config(100, 25);
        ih.handle_key_press(KeyCode::Left);
        ih.handle_key_release(KeyCode::Right);
        assert_eq!(ih.horizontal(), HorizontalDirection::Left);
        ih.handle_key_release(KeyCode::Left);
        assert_eq!(ih.horizontal(), HorizontalDirection::None);
    }

    #[test]
    fn soft_drop_does_not_repeat() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);
        assert_eq!(ih.handle_key_press(KeyCode::Down), None);
        assert!(ih.update(1000).is_empty());
    }

    #[test]
    fn test_reset_clears_held_state_and_stops_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
        assert!(!ih.update(200).is_empty(), "expected repeats before reset");

        ih.reset();
        assert!(ih.update(200).is_empty(), "reset should stop repeats");
    }

    #[test]
    fn config_env_and_json() {
        let mut config: InputConfig = serde_json::from_str(r#"{"das_ms": 120}"#).unwrap();
        assert_eq!(config.das_ms, 120);
        assert_eq!(config.arr_ms, DEFAULT_ARR_MS);
        config.apply_env(|key| (key == "BLOCKFALL_ARR_MS").then(|| "30".to_string()));
        assert_eq!(config.arr_ms, 30);
        assert_eq!(config.das_ms, 120);
    }
}
