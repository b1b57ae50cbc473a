use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{round, storage, undo};
use crate::error::Result;
use crate::rules::GameKind;

/// User settings, loaded from `updog.toml`.
///
/// ```toml
/// data_dir = "scores"
/// undo_depth = 150
/// export_json_on_next = true
///
/// [round_seconds]
/// boom = 45
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    /// Overrides every game's built-in undo depth.
    pub undo_depth: Option<usize>,
    pub export_json_on_next: bool,
    /// Round length overrides keyed by game slug. Zero is raised to one second.
    pub round_seconds: HashMap<String, u32>,
    /// Remote result posting. Not implemented; kept so existing files parse.
    pub api_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(storage::DEFAULT_DATA_DIR),
            undo_depth: None,
            export_json_on_next: true,
            round_seconds: HashMap::new(),
            api_enabled: false,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn session_config(&self, game: GameKind) -> SessionConfig {
        let rules = game.rules();
        let round_seconds = self
            .round_seconds
            .get(game.slug())
            .copied()
            .unwrap_or(rules.round_seconds)
            .max(round::MIN_SECONDS);
        SessionConfig {
            undo_depth: self
                .undo_depth
                .unwrap_or(rules.undo_depth)
                .clamp(undo::MIN_DEPTH, undo::MAX_DEPTH),
            round_millis: u64::from(round_seconds) * 1000,
            export_json_on_next: self.export_json_on_next,
        }
    }
}

/// Settings for one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub undo_depth: usize,
    pub round_millis: u64,
    pub export_json_on_next: bool,
}

impl SessionConfig {
    pub fn for_game(game: GameKind) -> Self {
        Config::default().session_config(game)
    }
}
