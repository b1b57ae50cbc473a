pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod roster;
pub mod rules;
pub mod scoring;
pub mod session;
pub mod storage;
pub mod timer;
pub mod undo;

pub use config::{Config, SessionConfig};
pub use error::{Error, Result};
pub use export::{JsonExport, results_to_csv, roster_to_csv, sorted_export_rows};
pub use import::{CsvReader, SpreadsheetReader, parse_csv, parse_rows};
pub use roster::{CompletedRound, Participant, Roster};
pub use rules::{GameKind, RuleTable};
pub use scoring::{ApplyOutcome, RoundState, RoundSummary};
pub use session::{GameSession, RoundAdvance};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SavedGame, UiState};
pub use timer::{Countdown, ManualClock, TimerService};
pub use undo::UndoStack;
