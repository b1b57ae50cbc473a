//! CLI command implementations.
//!
//! Every command opens the game's saved session from the data directory,
//! so state carries over between invocations.

pub mod clear;
pub mod export;
pub mod games;
pub mod import;
pub mod score;
pub mod status;

use std::path::Path;

use tracing::{info, warn};
use updog_core::{Config, FileStore, GameKind, GameSession};

/// Load the config file, falling back to defaults when it is missing or invalid.
pub fn load_config(path: &Path, data_dir: Option<&Path>) -> Config {
    let mut config = if path.exists() {
        match Config::load(path) {
            Ok(c) => {
                info!("Loaded config from {:?}", path);
                c
            }
            Err(e) => {
                warn!("Failed to load config: {}, using defaults", e);
                Config::default()
            }
        }
    } else {
        info!("No config at {:?}, using defaults", path);
        Config::default()
    };
    if config.api_enabled {
        warn!("api_enabled is set but result posting is not supported; ignoring");
    }
    if let Some(dir) = data_dir {
        config.data_dir = dir.to_path_buf();
    }
    config
}

pub fn open_session(config: &Config, game: GameKind) -> GameSession<FileStore> {
    GameSession::with_countdown(
        game,
        config.session_config(game),
        FileStore::new(&config.data_dir),
    )
}
