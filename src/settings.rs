//! Application settings: defaults, then an optional JSON file, then the environment.
//!
//! Command-line flags are applied last by [`crate::cli`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{ConfigError, GameConfig};
use crate::input::InputConfig;
use crate::types::ATTRACT_STEP_MS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameConfig,
    pub input: InputConfig,
    /// Attract-mode bot places one piece per interval.
    pub attract_step_ms: u32,
    pub audio: bool,
    pub log_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            input: InputConfig::default(),
            attract_step_ms: ATTRACT_STEP_MS,
            audio: false,
            log_path: None,
        }
    }
}

impl Settings {
    /// Defaults overlaid with `path` (if any) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok());
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Environment overrides; unparsable values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.game.apply_env(&lookup);
        self.input.apply_env(&lookup);

        if let Some(path) = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
        {
            self.log_path = Some(PathBuf::from(path));
        }
        if let Some(enabled) = lookup("BLOCKFALL_AUDIO").and_then(|s| parse_flag(&s)) {
            self.audio = enabled;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;
        if self.attract_step_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "attract_step_ms must be non-zero",
            });
        }
        Ok(())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn nested_json_overrides_only_given_fields() {
        let settings = Settings::from_json_str(
            r#"{"game": {"seed": 42}, "input": {"das_ms": 120}, "audio": true}"#,
        )
        .unwrap();
        assert_eq!(settings.game.seed, Some(42));
        assert_eq!(settings.game.cols, 10);
        assert_eq!(settings.input.das_ms, 120);
        assert_eq!(settings.input.arr_ms, 50);
        assert_eq!(settings.attract_step_ms, ATTRACT_STEP_MS);
        assert!(settings.audio);
    }

    #[test]
    fn env_overrides_file_values_and_ignores_garbage() {
        let mut settings = Settings::from_json_str(r#"{"game": {"seed": 1}}"#).unwrap();
        settings.apply_env(env(&[
            ("BLOCKFALL_SEED", "99"),
            ("BLOCKFALL_ARR_MS", "fast"),
            ("BLOCKFALL_AUDIO", "on"),
            ("BLOCKFALL_LOG_PATH", " /tmp/blockfall.log "),
        ]));
        assert_eq!(settings.game.seed, Some(99));
        assert_eq!(settings.input.arr_ms, 50);
        assert!(settings.audio);
        assert_eq!(settings.log_path, Some(PathBuf::from("/tmp/blockfall.log")));
    }

    #[test]
    fn invalid_documents_are_reported() {
        assert!(matches!(
            Settings::from_json_str("{"),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            Settings::from_json_str(r#"{"attract_step_ms": 0}"#),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            Settings::from_file(Path::new("/nonexistent/blockfall.json")),
            Err(ConfigError::Read { .. })
        ));
    }
}
