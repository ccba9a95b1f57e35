//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::ConfigError;
use crate::settings::Settings;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON settings file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for the piece sequence and the menu bot
    #[arg(long, global = true)]
    pub seed: Option<u32>,

    /// Append diagnostics to this file
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Play in the terminal (default)
    Play {
        /// Enable synthesized sound effects
        #[arg(long)]
        audio: bool,
        /// Delay before a held direction repeats
        #[arg(long)]
        das_ms: Option<u32>,
        /// Interval between repeats
        #[arg(long)]
        arr_ms: Option<u32>,
    },
    /// Let the bot play without a terminal and print the final state as JSON
    Simulate {
        /// Number of pieces to place
        #[arg(long, default_value_t = 100)]
        pieces: u32,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Play {
            audio: false,
            das_ms: None,
            arr_ms: None,
        })
    }

    /// Settings from defaults, the config file and the environment, with flags on top.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let mut settings = Settings::load(self.config.as_deref())?;
        self.apply(&mut settings);
        settings.validate()?;
        Ok(settings)
    }

    pub fn apply(&self, settings: &mut Settings) {
        if let Some(seed) = self.seed {
            settings.game.seed = Some(seed);
        }
        if let Some(path) = &self.log {
            settings.log_path = Some(path.clone());
        }
        if let Some(Command::Play {
            audio,
            das_ms,
            arr_ms,
        }) = &self.command
        {
            if *audio {
                settings.audio = true;
            }
            if let Some(ms) = das_ms {
                settings.input.das_ms = *ms;
            }
            if let Some(ms) = arr_ms {
                settings.input.arr_ms = *ms;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_play() {
        let cli = Cli::parse_from(["blockfall"]);
        assert!(matches!(cli.command(), Command::Play { audio: false, .. }));
    }

    #[test]
    fn flags_override_settings() {
        let cli = Cli::parse_from([
            "blockfall", "--seed", "5", "play", "--audio", "--das-ms", "120",
        ]);
        let mut settings = Settings::default();
        cli.apply(&mut settings);
        assert_eq!(settings.game.seed, Some(5));
        assert!(settings.audio);
        assert_eq!(settings.input.das_ms, 120);
        assert_eq!(settings.input.arr_ms, 50);
    }

    #[test]
    fn simulate_takes_piece_count_and_global_flags_after_it() {
        let cli = Cli::parse_from(["blockfall", "simulate", "--pieces", "25", "--seed", "3"]);
        assert!(matches!(
            cli.command(),
            Command::Simulate {
                pieces: 25,
                pretty: false
            }
        ));
        assert_eq!(cli.seed, Some(3));
    }
}
