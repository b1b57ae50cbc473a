use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::roster::Roster;
use crate::rules::GameKind;
use crate::scoring::RoundState;
use crate::storage::KeyValueStore;
use crate::timer::TimerSnapshot;

/// Everything a game screen shows. Undo snapshots are whole `UiState` values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub round: RoundState,
    pub roster: Roster,
    /// Field drawn mirrored for the scorer's side of the field.
    #[serde(default)]
    pub field_flipped: bool,
}

impl UiState {
    pub fn new(game: GameKind) -> Self {
        Self {
            round: RoundState::new(game.rules()),
            roster: Roster::new(),
            field_flipped: false,
        }
    }
}

/// Persisted document for one game, stored under the game's storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    pub game: GameKind,
    pub saved_at: DateTime<Utc>,
    pub ui: UiState,
    #[serde(default)]
    pub timer: TimerSnapshot,
}

impl SavedGame {
    pub fn new(game: GameKind, ui: UiState, timer: TimerSnapshot) -> Self {
        Self {
            game,
            saved_at: Utc::now(),
            ui,
            timer,
        }
    }
}

/// Load the saved document for `game`.
///
/// Missing, unreadable or malformed documents all count as no saved state.
pub fn load_game<S: KeyValueStore + ?Sized>(store: &S, game: GameKind) -> Option<SavedGame> {
    let key = game.storage_key();
    let content = match store.load(key) {
        Ok(Some(content)) => content,
        Ok(None) => {
            debug!("No saved state for {}", game);
            return None;
        }
        Err(e) => {
            warn!("Failed to read {}: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str::<SavedGame>(&content) {
        Ok(saved) if saved.game == game => Some(saved),
        Ok(saved) => {
            warn!("{} holds state for {}, ignoring", key, saved.game);
            None
        }
        Err(e) => {
            warn!("Discarding malformed {}: {}", key, e);
            None
        }
    }
}

pub fn save_game<S: KeyValueStore + ?Sized>(store: &mut S, saved: &SavedGame) -> Result<()> {
    let content = serde_json::to_string(saved)?;
    store.save(saved.game.storage_key(), &content)
}

pub fn delete_game<S: KeyValueStore + ?Sized>(store: &mut S, game: GameKind) -> Result<()> {
    store.delete(game.storage_key())
}
