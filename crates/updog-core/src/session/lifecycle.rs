use chrono::Utc;
use tracing::{debug, info};

use crate::export::JsonExport;
use crate::import::{self, SpreadsheetReader};
use crate::roster::{CompletedRound, Participant};
use crate::scoring::{RoundState, RoundSummary};
use crate::session::GameSession;
use crate::storage::{KeyValueStore, UiState};

/// Result of finalizing the active participant's round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundAdvance {
    pub participant: Participant,
    pub summary: RoundSummary,
    /// Present when JSON export on next is enabled.
    pub export: Option<JsonExport>,
}

impl<S: KeyValueStore> GameSession<S> {
    /// Finalize the active round and bring up the next participant.
    ///
    /// Returns `None` when there is no active participant.
    pub fn next(&mut self) -> Option<RoundAdvance> {
        let participant = self.ui.roster.active()?.clone();

        self.timer.pause();
        self.ui.round.finish(self.time_left());

        let summary = self.ui.round.summary(self.rules);
        let entry = CompletedRound {
            participant: participant.clone(),
            round: self.ui.round.finalized(),
            summary: summary.clone(),
            completed_at: Utc::now(),
        };
        let export = self
            .config
            .export_json_on_next
            .then(|| JsonExport::new(self.game, &entry));

        info!(
            "{}: {} finished with {} points",
            self.game, participant, summary.total
        );
        self.ui.roster.complete(entry);
        self.begin_round();

        Some(RoundAdvance {
            participant,
            summary,
            export,
        })
    }

    /// Send the active participant to the back of the queue, discarding
    /// their in-progress score.
    pub fn skip(&mut self) -> bool {
        let Some(active) = self.ui.roster.active() else {
            return false;
        };
        info!("{}: skipped {}", self.game, active);
        self.ui.roster.rotate();
        self.begin_round();
        true
    }

    /// Reopen the most recently completed participant with their final round.
    pub fn previous(&mut self) -> bool {
        let Some(entry) = self.ui.roster.step_back() else {
            return false;
        };
        info!("{}: back to {}", self.game, entry.participant);

        self.timer.stop();
        if let Some(remaining) = entry.round.time_remaining_ms() {
            let elapsed = self.timer.duration_millis().saturating_sub(remaining);
            self.timer.seek(elapsed);
        }
        self.ui.round = entry.round;
        self.undo.clear();
        self.persist();
        true
    }

    /// Append imported participants to the queue. Returns how many were added.
    pub fn import(&mut self, participants: Vec<Participant>) -> usize {
        let count = participants.len();
        if count == 0 {
            debug!("{}: import had no participants", self.game);
            return 0;
        }
        self.ui.roster.extend(participants);
        self.undo.clear();
        self.persist();
        info!("{}: imported {} participants", self.game, count);
        count
    }

    pub fn import_csv(&mut self, text: &str) -> usize {
        self.import(import::parse_csv(text))
    }

    pub fn import_file<R>(&mut self, reader: &R, bytes: &[u8]) -> usize
    where
        R: SpreadsheetReader + ?Sized,
    {
        self.import(import::import_bytes(reader, bytes))
    }

    /// Drop every participant and result. Field orientation is kept.
    pub fn clear_all(&mut self) {
        let field_flipped = self.ui.field_flipped;
        self.ui = UiState {
            field_flipped,
            ..UiState::new(self.game)
        };
        self.timer.stop();
        self.undo.clear();
        self.persist();
        info!("{}: cleared all participants and results", self.game);
    }

    /// Fresh round for whoever is now active. Undo history does not cross
    /// round boundaries.
    fn begin_round(&mut self) {
        self.ui.round = RoundState::new(self.rules);
        self.timer.stop();
        self.undo.clear();
        self.persist();
    }
}
