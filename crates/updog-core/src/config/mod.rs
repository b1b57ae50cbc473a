//! Configuration and tunables.
//!
//! This module contains:
//! - `Config` - user settings loaded from a TOML file
//! - `SessionConfig` - per-game settings handed to a session
//! - Undo, round and storage constants

mod settings;

pub use settings::*;

/// Undo history depth.
///
/// Games pick a depth inside this range; config overrides are clamped to it.
pub mod undo {
    /// Depth used when nothing else is configured.
    pub const DEFAULT_DEPTH: usize = 100;

    /// Smallest history kept by any game.
    pub const MIN_DEPTH: usize = 50;

    /// Largest history kept by any game.
    pub const MAX_DEPTH: usize = 250;
}

/// Round timing.
pub mod round {
    /// Shortest round a config override may set.
    pub const MIN_SECONDS: u32 = 1;
}

/// Persistence configuration.
pub mod storage {
    /// Directory (under the data dir) receiving per-round JSON exports.
    pub const EXPORT_DIR: &str = "exports";

    /// Default data directory when none is configured.
    pub const DEFAULT_DATA_DIR: &str = "updog-data";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_constants() {
        assert!(undo::MIN_DEPTH <= undo::DEFAULT_DEPTH);
        assert!(undo::DEFAULT_DEPTH <= undo::MAX_DEPTH);
    }
}
