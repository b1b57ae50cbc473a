use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::export::{
    self, AssetLoader, ExportRow, SpreadsheetWriter, format_round_console,
    format_standings_console,
};
use crate::error::Result;
use crate::roster::{Participant, Roster};
use crate::rules::{GameKind, RuleTable};
use crate::scoring::{ApplyOutcome, RoundState, RoundSummary};
use crate::storage::{KeyValueStore, SavedGame, UiState, load_game, save_game};
use crate::timer::{Countdown, TimerService};
use crate::undo::UndoStack;

pub type BoxedTimer = Box<dyn TimerService + Send>;

pub struct GameSession<S: KeyValueStore> {
    pub(super) game: GameKind,
    pub(super) rules: &'static RuleTable,
    pub(super) config: SessionConfig,
    pub(super) ui: UiState,
    pub(super) undo: UndoStack<UiState>,
    pub(super) timer: BoxedTimer,
    pub(super) store: S,
}

impl<S: KeyValueStore> GameSession<S> {
    /// Open a session, restoring any saved state for `game`.
    ///
    /// A restored timer keeps its position but is left paused.
    pub fn open(game: GameKind, config: SessionConfig, store: S, mut timer: BoxedTimer) -> Self {
        let ui = match load_game(&store, game) {
            Some(saved) => {
                info!(
                    "{}: restored state saved at {}",
                    game,
                    saved.saved_at.format("%Y-%m-%d %H:%M:%S")
                );
                timer.seek(saved.timer.position_millis);
                saved.ui
            }
            None => UiState::new(game),
        };

        Self {
            game,
            rules: game.rules(),
            config,
            ui,
            undo: UndoStack::new(config.undo_depth),
            timer,
            store,
        }
    }

    /// Open with the built-in countdown sized from `config`.
    pub fn with_countdown(game: GameKind, config: SessionConfig, store: S) -> Self {
        let timer = Box::new(Countdown::new(config.round_millis));
        Self::open(game, config, store, timer)
    }

    /// Snapshot the current state before a mutation.
    pub(super) fn checkpoint(&mut self) {
        self.undo.push(&self.ui);
    }

    /// Time left on the clock, or `None` when the timer never ran this round.
    pub(super) fn time_left(&self) -> Option<u64> {
        (self.timer.position_millis() > 0).then(|| self.timer.remaining_millis())
    }

    /// Scoring input only lands on a round that belongs to someone.
    fn accepts_scoring(&self) -> bool {
        self.ui.roster.active().is_some() && !self.ui.round.is_finished()
    }

    /// Save the whole document. Failures are logged and otherwise ignored.
    pub(super) fn persist(&mut self) {
        let saved = SavedGame::new(self.game, self.ui.clone(), self.timer.snapshot());
        if let Err(e) = save_game(&mut self.store, &saved) {
            warn!("{}: failed to save state: {}", self.game, e);
        }
    }

    /// Press a scoring button.
    pub fn press(&mut self, action: &str) -> ApplyOutcome {
        if self.ui.roster.active().is_none() {
            debug!("{}: no active team for {:?}", self.game, action);
            return ApplyOutcome::Ignored;
        }
        if !self.ui.round.is_enabled(self.rules, action) {
            debug!("{}: {:?} not enabled", self.game, action);
            return ApplyOutcome::Ignored;
        }
        self.checkpoint();
        let outcome = self.ui.round.apply(self.rules, action);
        if let ApplyOutcome::Completed { .. } = outcome {
            self.timer.pause();
            if let Some(remaining) = self.time_left() {
                self.ui.round.capture_time(remaining);
            }
            info!(
                "{}: round complete with {} points",
                self.game,
                self.ui.round.score(self.rules)
            );
        }
        self.persist();
        outcome
    }

    /// Flip a bonus toggle such as the sweet spot.
    pub fn toggle(&mut self, toggle: &str) -> bool {
        if self.rules.toggle(toggle).is_none() || !self.accepts_scoring() {
            return false;
        }
        self.checkpoint();
        let changed = self.ui.round.toggle(self.rules, toggle);
        self.persist();
        changed
    }

    /// Restore the state before the last mutation. No-op on empty history.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo.pop() else {
            return false;
        };
        self.ui = previous;
        self.timer.pause();
        // An unfinished round never sits on an expired clock.
        if self.timer.has_reached_zero() && !self.ui.round.is_finished() {
            self.timer.stop();
        }
        self.persist();
        true
    }

    /// End the round now ("Boom!", "Time Warp" or an explicit stop).
    pub fn finish(&mut self) -> bool {
        let started = self.ui.round.in_progress() || self.timer.position_millis() > 0;
        if !self.accepts_scoring() || !started {
            return false;
        }
        self.checkpoint();
        self.timer.pause();
        self.ui.round.finish(self.time_left());
        self.persist();
        true
    }

    /// Clear the active round back to the game's initial configuration.
    pub fn reset_round(&mut self) {
        self.checkpoint();
        self.ui.round = RoundState::new(self.rules);
        self.timer.stop();
        self.persist();
    }

    pub fn add_team(&mut self, participant: Participant) {
        info!("{}: added {}", self.game, participant);
        self.checkpoint();
        self.ui.roster.add(participant);
        self.persist();
    }

    /// Mirror the field layout for the scorer's side.
    pub fn flip_field(&mut self) {
        self.checkpoint();
        self.ui.field_flipped = !self.ui.field_flipped;
        self.persist();
    }

    pub fn start_timer(&mut self) -> bool {
        if self.ui.round.is_finished() || self.timer.has_reached_zero() {
            return false;
        }
        self.timer.play();
        self.persist();
        true
    }

    pub fn pause_timer(&mut self) {
        self.timer.pause();
        self.persist();
    }

    pub fn stop_timer(&mut self) {
        self.timer.stop();
        self.persist();
    }

    /// Poll the timer; finishes the round when time has run out.
    ///
    /// Returns true when this call finished the round.
    pub fn tick(&mut self) -> bool {
        if !self.timer.has_reached_zero() || !self.accepts_scoring() {
            return false;
        }
        info!("{}: time expired", self.game);
        self.checkpoint();
        self.ui.round.finish(Some(0));
        self.persist();
        true
    }

    pub fn game(&self) -> GameKind {
        self.game
    }

    pub fn rules(&self) -> &'static RuleTable {
        self.rules
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn round(&self) -> &RoundState {
        &self.ui.round
    }

    pub fn roster(&self) -> &Roster {
        &self.ui.roster
    }

    pub fn active(&self) -> Option<&Participant> {
        self.ui.roster.active()
    }

    pub fn score(&self) -> i32 {
        self.ui.round.score(self.rules)
    }

    pub fn summary(&self) -> RoundSummary {
        self.ui.round.summary(self.rules)
    }

    pub fn enabled_actions(&self) -> Vec<&'static str> {
        self.ui.round.enabled_actions(self.rules)
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn timer(&self) -> &dyn TimerService {
        self.timer.as_ref()
    }

    pub fn remaining_millis(&self) -> u64 {
        self.timer.remaining_millis()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn results_csv(&self) -> String {
        export::results_to_csv(self.rules, self.ui.roster.completed())
    }

    pub fn roster_csv(&self) -> String {
        export::roster_to_csv(&self.ui.roster.all_participants())
    }

    pub fn export_rows(&self) -> Vec<ExportRow> {
        export::sorted_export_rows(self.rules, self.ui.roster.completed())
    }

    /// Filled template bytes, or `None` when there is nothing to write.
    pub fn export_spreadsheet<L, W>(&self, loader: &L, writer: &W) -> Result<Option<Vec<u8>>>
    where
        L: AssetLoader + ?Sized,
        W: SpreadsheetWriter + ?Sized,
    {
        export::export_spreadsheet(self.rules, self.ui.roster.completed(), loader, writer)
    }

    pub fn scoreboard(&self) -> String {
        format_round_console(
            self.rules,
            self.active(),
            &self.ui.round,
            self.remaining_millis(),
        )
    }

    pub fn standings(&self) -> String {
        format_standings_console(self.rules, self.ui.roster.completed())
    }
}
