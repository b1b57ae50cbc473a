use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rules::{ActionKind, ActionSpec, Flow, PhaseKind, RuleTable, ScoreRule};
use crate::scoring::{ActionGate, BoardState, PhaseEvent, PhaseTracker, RoundSummary};

/// One scored action or toggle, in press order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub seq: u32,
    pub action: String,
    pub points: i32,
    pub score_after: i32,
}

/// What an `apply` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Unknown, disabled or capped action; state untouched.
    Ignored,
    Scored { points: i32 },
    /// Scored and exhausted the gated actions, which finishes the round.
    Completed { points: i32 },
}

impl ApplyOutcome {
    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Scoring state of the active participant's round.
///
/// The score is never stored; `score` derives it from the action counts,
/// toggles and captured time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundState {
    counts: BTreeMap<String, u32>,
    toggles: BTreeSet<String>,
    gate: ActionGate,
    phase: Option<PhaseTracker>,
    board: Option<BoardState>,
    presses: u32,
    last_points: i32,
    finished: bool,
    time_remaining_ms: Option<u64>,
    log: Vec<LogEntry>,
}

impl RoundState {
    /// Fresh round in the game's initial configuration.
    pub fn new(rules: &RuleTable) -> Self {
        Self {
            gate: ActionGate::new(rules.initial_enabled()),
            phase: matches!(rules.flow, Flow::Phased { .. }).then(PhaseTracker::default),
            board: matches!(rules.flow, Flow::Board { .. }).then(BoardState::default),
            ..Default::default()
        }
    }

    pub fn is_enabled(&self, rules: &RuleTable, id: &str) -> bool {
        match rules.action(id) {
            Some(spec) => self.spec_enabled(rules, spec),
            None => false,
        }
    }

    fn spec_enabled(&self, rules: &RuleTable, spec: &ActionSpec) -> bool {
        if self.finished {
            return false;
        }
        if let Flow::Open {
            press_limit: Some(limit),
        } = rules.flow
            && self.presses >= limit
        {
            return false;
        }
        if let Some(max) = spec.max_count
            && self.count(spec.id) >= max
        {
            return false;
        }
        if spec.is_gated() {
            self.gate.is_enabled(spec.id)
        } else {
            true
        }
    }

    /// Every action currently accepting presses, in rule table order.
    pub fn enabled_actions(&self, rules: &RuleTable) -> Vec<&'static str> {
        rules
            .actions
            .iter()
            .filter(|spec| self.spec_enabled(rules, spec))
            .map(|spec| spec.id)
            .collect()
    }

    pub fn apply(&mut self, rules: &RuleTable, id: &str) -> ApplyOutcome {
        let Some(spec) = rules.action(id) else {
            debug!("{}: ignoring unknown action {:?}", rules.game, id);
            return ApplyOutcome::Ignored;
        };
        if !self.spec_enabled(rules, spec) {
            debug!("{}: ignoring disabled action {:?}", rules.game, id);
            return ApplyOutcome::Ignored;
        }

        match spec.kind {
            ActionKind::OneShot => {
                self.gate.click(spec.id);
                if let Some(next) = rules.successor(spec.id) {
                    self.gate.unlock(next);
                }
            }
            ActionKind::Repeatable => {}
            ActionKind::Miss => {
                if let Flow::Phased { miss_cap, .. } = rules.flow {
                    let event = self.phase_mut().miss(miss_cap);
                    self.on_phase_event(rules, event);
                }
            }
            ActionKind::Cell { zone, bonus } => self.mark_cell(rules, zone, bonus),
            ActionKind::Phase(_) => {
                if let Flow::Phased { quota, .. } = rules.flow {
                    let event = self.phase_mut().mark(spec.id, quota);
                    self.on_phase_event(rules, event);
                }
            }
        }

        *self.counts.entry(spec.id.to_string()).or_default() += 1;
        self.presses += 1;
        self.last_points = spec.points;
        self.push_log(rules, spec.id, spec.points);

        if rules.is_chain() && self.gate.is_exhausted() {
            self.finished = true;
            ApplyOutcome::Completed {
                points: spec.points,
            }
        } else {
            ApplyOutcome::Scored {
                points: spec.points,
            }
        }
    }

    fn phase_mut(&mut self) -> &mut PhaseTracker {
        self.phase.get_or_insert_with(PhaseTracker::default)
    }

    fn on_phase_event(&mut self, rules: &RuleTable, event: PhaseEvent) {
        let Some(tracker) = &self.phase else {
            return;
        };
        let kind = tracker.kind();
        let open: Vec<&str> = rules
            .phase_actions(kind)
            .into_iter()
            .filter(|id| !tracker.is_clicked(id))
            .collect();
        if event != PhaseEvent::Progress {
            debug!("{}: phase event {:?}, now {:?}", rules.game, event, kind);
        }
        let clicked: Vec<String> = tracker.phase.progress().clicked.iter().cloned().collect();
        self.gate.reset_to(open);
        for id in clicked {
            self.gate.click(&id);
        }
    }

    fn mark_cell(&mut self, rules: &RuleTable, zone: u8, bonus: bool) {
        let Flow::Board { zones } = rules.flow else {
            return;
        };
        let board = self.board.get_or_insert_with(BoardState::default);
        board.mark(zone, bonus);
        for id in rules.zone_actions(zone) {
            self.gate.click(id);
        }
        if board.is_complete(zones) {
            board.fold();
            debug!(
                "{}: board {} complete",
                rules.game,
                board.boards_completed()
            );
            self.gate.reset_to(rules.cell_actions());
        }
    }

    fn push_log(&mut self, rules: &RuleTable, action: &str, points: i32) {
        let entry = LogEntry {
            seq: self.log.len() as u32 + 1,
            action: action.to_string(),
            points,
            score_after: self.score(rules),
        };
        self.log.push(entry);
    }

    /// Flip a bonus toggle. Returns false for unknown toggles or finished rounds.
    pub fn toggle(&mut self, rules: &RuleTable, id: &str) -> bool {
        let Some(spec) = rules.toggle(id) else {
            debug!("{}: ignoring unknown toggle {:?}", rules.game, id);
            return false;
        };
        if self.finished {
            return false;
        }
        let delta = if self.toggles.remove(spec.id) {
            -spec.points
        } else {
            self.toggles.insert(spec.id.to_string());
            spec.points
        };
        self.push_log(rules, spec.id, delta);
        true
    }

    /// Freeze the round, capturing the time left on the clock.
    /// `time_remaining_ms` is `None` for a round played without the timer.
    pub fn finish(&mut self, time_remaining_ms: Option<u64>) -> bool {
        if self.finished {
            return false;
        }
        self.finished = true;
        self.time_remaining_ms = time_remaining_ms;
        self.gate.disable_all();
        true
    }

    /// Attach the remaining time to a round that finished on its own.
    pub fn capture_time(&mut self, time_remaining_ms: u64) {
        if self.time_remaining_ms.is_none() {
            self.time_remaining_ms = Some(time_remaining_ms);
        }
    }

    pub fn score(&self, rules: &RuleTable) -> i32 {
        let base = match rules.score {
            ScoreRule::Sum => self
                .counted(rules)
                .map(|(spec, n)| spec.points * n as i32)
                .sum(),
            ScoreRule::HighestReached => self
                .counted(rules)
                .map(|(spec, _)| spec.points)
                .max()
                .unwrap_or(0),
        };
        base + self.bonus_points(rules)
    }

    /// Toggle, set and time bonuses.
    fn bonus_points(&self, rules: &RuleTable) -> i32 {
        let toggles: i32 = rules
            .toggles
            .iter()
            .filter(|t| self.toggles.contains(t.id))
            .map(|t| t.points)
            .sum();
        let set = rules
            .set_bonus
            .filter(|b| b.actions.iter().all(|id| self.count(id) > 0))
            .map_or(0, |b| b.points);
        toggles + set + self.time_bonus(rules)
    }

    fn time_bonus(&self, rules: &RuleTable) -> i32 {
        if rules.time_bonus && self.finished && self.presses > 0 {
            self.time_remaining_ms.map_or(0, |ms| (ms / 1000) as i32)
        } else {
            0
        }
    }

    fn counted<'a>(
        &'a self,
        rules: &'a RuleTable,
    ) -> impl Iterator<Item = (&'static ActionSpec, u32)> + 'a {
        self.counts
            .iter()
            .filter(|(_, n)| **n > 0)
            .filter_map(|(id, n)| rules.action(id).map(|spec| (spec, *n)))
    }

    pub fn summary(&self, rules: &RuleTable) -> RoundSummary {
        let best_throw = self
            .counted(rules)
            .filter(|(spec, _)| !spec.is_miss())
            .map(|(spec, _)| spec.points)
            .max()
            .unwrap_or(0);
        let highest_zone = self
            .counted(rules)
            .filter_map(|(spec, _)| match spec.kind {
                ActionKind::Cell { zone, .. } => Some(zone),
                _ => None,
            })
            .max()
            .unwrap_or(0);
        let cell_bonus: i32 = self
            .counted(rules)
            .filter(|(spec, _)| matches!(spec.kind, ActionKind::Cell { bonus: true, .. }))
            .map(|(spec, n)| spec.points * n as i32)
            .sum();
        let misses = self
            .counted(rules)
            .filter(|(spec, _)| spec.is_miss())
            .map(|(_, n)| n)
            .sum();

        RoundSummary {
            total: self.score(rules),
            best_throw,
            highest_zone,
            bonus_points: cell_bonus + self.bonus_points(rules),
            misses,
            presses: self.presses,
            time_remaining_ms: self.time_remaining_ms,
            cycles_completed: self.phase.as_ref().map_or(0, |p| p.cycles_completed),
            boards_completed: self.board.as_ref().map_or(0, |b| b.boards_completed()),
        }
    }

    /// Copy kept for a completed participant; per-throw display counters reset.
    pub fn finalized(&self) -> Self {
        Self {
            last_points: 0,
            ..self.clone()
        }
    }

    pub fn count(&self, id: &str) -> u32 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &BTreeMap<String, u32> {
        &self.counts
    }

    pub fn active_toggles(&self) -> impl Iterator<Item = &str> {
        self.toggles.iter().map(String::as_str)
    }

    pub fn is_toggled(&self, id: &str) -> bool {
        self.toggles.contains(id)
    }

    pub fn gate(&self) -> &ActionGate {
        &self.gate
    }

    pub fn phase(&self) -> Option<&PhaseTracker> {
        self.phase.as_ref()
    }

    pub fn phase_kind(&self) -> Option<PhaseKind> {
        self.phase.as_ref().map(PhaseTracker::kind)
    }

    pub fn obstacle_phase_active(&self) -> bool {
        self.phase_kind() == Some(PhaseKind::Obstacle)
    }

    pub fn catch_phase_active(&self) -> bool {
        self.phase_kind() == Some(PhaseKind::Catch)
    }

    pub fn board(&self) -> Option<&BoardState> {
        self.board.as_ref()
    }

    pub fn presses(&self) -> u32 {
        self.presses
    }

    pub fn last_points(&self) -> i32 {
        self.last_points
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether anything has happened since the round was reset.
    pub fn in_progress(&self) -> bool {
        self.presses > 0 || !self.toggles.is_empty() || self.finished
    }

    pub fn time_remaining_ms(&self) -> Option<u64> {
        self.time_remaining_ms
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::GameKind;

    fn press_all(round: &mut RoundState, rules: &RuleTable, ids: &[&str]) {
        for id in ids {
            round.apply(rules, id);
        }
    }

    #[test]
    fn test_boom_starts_with_one_enabled() {
        let rules = GameKind::Boom.rules();
        let round = RoundState::new(rules);
        assert_eq!(round.enabled_actions(rules), ["1"]);
    }

    #[test]
    fn test_boom_highest_zone_reached() {
        let rules = GameKind::Boom.rules();
        let mut round = RoundState::new(rules);
        press_all(&mut round, rules, &["1", "2a", "2b", "5"]);
        assert!(round.finish(Some(0)));
        assert_eq!(round.score(rules), 5);
    }

    #[test]
    fn test_boom_sweet_spot_adds_ten() {
        let rules = GameKind::Boom.rules();
        let mut round = RoundState::new(rules);
        press_all(&mut round, rules, &["1", "2a", "2b", "5"]);
        assert!(round.toggle(rules, "sweet_spot"));
        round.finish(Some(0));
        assert_eq!(round.score(rules), 15);
    }

    #[test]
    fn test_toggle_pair_cancels() {
        let rules = GameKind::Boom.rules();
        let mut round = RoundState::new(rules);
        round.apply(rules, "1");
        let before = round.score(rules);
        round.toggle(rules, "sweet_spot");
        round.toggle(rules, "sweet_spot");
        assert_eq!(round.score(rules), before);
        assert!(!round.is_toggled("sweet_spot"));
    }

    #[test]
    fn test_unlock_chain_successor() {
        let rules = GameKind::Boom.rules();
        let mut round = RoundState::new(rules);
        round.apply(rules, "1");
        assert!(round.gate().is_clicked("1"));
        assert_eq!(round.gate().enabled().collect::<Vec<_>>(), ["2a"]);
    }

    #[test]
    fn test_disabled_action_is_ignored() {
        let rules = GameKind::Boom.rules();
        let mut round = RoundState::new(rules);
        let before = round.clone();
        assert_eq!(round.apply(rules, "5"), ApplyOutcome::Ignored);
        assert_eq!(round.apply(rules, "nope"), ApplyOutcome::Ignored);
        assert_eq!(round, before);
    }

    #[test]
    fn test_boom_terminal_completes() {
        let rules = GameKind::Boom.rules();
        let mut round = RoundState::new(rules);
        press_all(&mut round, rules, &["1", "2a", "2b", "5", "10", "20", "25"]);
        assert_eq!(
            round.apply(rules, "35"),
            ApplyOutcome::Completed { points: 35 }
        );
        assert!(round.is_finished());
        assert_eq!(round.score(rules), 35);
    }

    #[test]
    fn test_seven_up_initial_and_cap() {
        let rules = GameKind::SevenUp.rules();
        let mut round = RoundState::new(rules);
        let enabled = round.enabled_actions(rules);
        assert_eq!(enabled.iter().filter(|id| id.starts_with("jump")).count(), 7);
        assert_eq!(round.count("non_jump"), 0);

        for _ in 0..9 {
            round.apply(rules, "non_jump");
        }
        assert_eq!(round.count("non_jump"), 7);
        assert_eq!(round.score(rules), 7);
    }

    #[test]
    fn test_seven_up_all_jumps_complete() {
        let rules = GameKind::SevenUp.rules();
        let mut round = RoundState::new(rules);
        press_all(
            &mut round,
            rules,
            &["jump_1", "jump_2", "jump_3", "jump_4", "jump_5", "jump_6"],
        );
        assert!(!round.is_finished());
        assert!(matches!(
            round.apply(rules, "jump_7"),
            ApplyOutcome::Completed { .. }
        ));
        assert_eq!(round.score(rules), 21);
    }

    #[test]
    fn test_fun_key_tree_unlock() {
        let rules = GameKind::FunKey.rules();
        let mut round = RoundState::new(rules);
        press_all(&mut round, rules, &["a1", "a2"]);
        assert!(round.is_enabled(rules, "key"));
        round.apply(rules, "key");
        press_all(&mut round, rules, &["b1", "b2"]);
        assert!(!round.is_enabled(rules, "key"));
        assert_eq!(round.count("key"), 1);
    }

    #[test]
    fn test_far_out_press_limit() {
        let rules = GameKind::FarOut.rules();
        let mut round = RoundState::new(rules);
        press_all(&mut round, rules, &["10", "miss", "50", "20", "30"]);
        assert_eq!(round.apply(rules, "40"), ApplyOutcome::Ignored);
        let summary = round.summary(rules);
        assert_eq!(summary.total, 110);
        assert_eq!(summary.best_throw, 50);
        assert_eq!(summary.misses, 1);
    }

    #[test]
    fn test_spaced_out_six_throws() {
        let rules = GameKind::SpacedOut.rules();
        let mut round = RoundState::new(rules);
        press_all(&mut round, rules, &["5", "10", "miss", "20", "15", "5"]);
        assert!(round.enabled_actions(rules).is_empty());
        assert_eq!(round.apply(rules, "20"), ApplyOutcome::Ignored);
        assert_eq!(round.presses(), 6);
        assert_eq!(round.score(rules), 55);
        assert!(!round.is_finished());
    }

    #[test]
    fn test_throw_n_go_all_rollers() {
        let rules = GameKind::ThrowNGo.rules();
        let mut round = RoundState::new(rules);
        press_all(&mut round, rules, &["short", "long", "go"]);
        assert!(round.toggle(rules, "all_rollers"));
        assert_eq!(round.score(rules), 13);
        assert!(round.is_toggled("all_rollers"));
        round.toggle(rules, "all_rollers");
        assert_eq!(round.score(rules), 8);
    }

    #[test]
    fn test_fun_key_finishes_when_every_key_taken() {
        let rules = GameKind::FunKey.rules();
        let mut round = RoundState::new(rules);
        press_all(&mut round, rules, &["a1", "a2", "key", "b1", "b2", "c1"]);
        assert!(!round.is_finished());
        assert!(!round.is_enabled(rules, "key"));
        assert_eq!(
            round.apply(rules, "c2"),
            ApplyOutcome::Completed { points: 10 }
        );
        assert!(round.is_finished());
        assert_eq!(round.score(rules), 70);
    }

    #[test]
    fn test_frizgility_phase_transition() {
        let rules = GameKind::Frizgility.rules();
        let mut round = RoundState::new(rules);
        assert!(round.obstacle_phase_active());
        press_all(&mut round, rules, &["obstacle_a", "obstacle_b"]);
        assert!(round.obstacle_phase_active());
        assert!(!round.is_enabled(rules, "obstacle_a"));
        round.apply(rules, "obstacle_c");
        assert!(round.catch_phase_active());
        assert!(!round.obstacle_phase_active());
        assert!(round.is_enabled(rules, "catch_long"));
        assert!(!round.is_enabled(rules, "obstacle_d"));
        assert_eq!(round.score(rules), 15);
    }

    #[test]
    fn test_frizgility_catch_misses_reset_cycle() {
        let rules = GameKind::Frizgility.rules();
        let mut round = RoundState::new(rules);
        press_all(
            &mut round,
            rules,
            &["obstacle_a", "obstacle_b", "obstacle_c", "catch_long"],
        );
        press_all(&mut round, rules, &["miss", "miss", "miss"]);
        assert!(round.obstacle_phase_active());
        assert!(round.is_enabled(rules, "obstacle_a"));
        assert_eq!(round.gate().clicked().count(), 0);
        // Points already earned stay on the board.
        assert_eq!(round.score(rules), 35);
        assert_eq!(round.summary(rules).misses, 3);
    }

    #[test]
    fn test_fireball_board_folds() {
        let rules = GameKind::Fireball.rules();
        let mut round = RoundState::new(rules);
        press_all(&mut round, rules, &["1", "2", "3", "4", "5", "6", "7"]);
        assert!(!round.is_enabled(rules, "f3"));
        round.apply(rules, "f8");
        let summary = round.summary(rules);
        assert_eq!(summary.total, 28 + 16);
        assert_eq!(summary.boards_completed, 1);
        assert_eq!(summary.highest_zone, 8);
        assert_eq!(summary.bonus_points, 16);
        // A fresh board accepts the same zones again.
        assert!(round.is_enabled(rules, "3"));
        assert!(round.is_enabled(rules, "f3"));
        round.apply(rules, "f3");
        assert_eq!(round.score(rules), 50);
    }

    #[test]
    fn test_four_way_set_bonus() {
        let rules = GameKind::FourWayPlay.rules();
        let mut round = RoundState::new(rules);
        press_all(&mut round, rules, &["north", "east", "south"]);
        assert_eq!(round.score(rules), 9);
        round.apply(rules, "west");
        assert_eq!(round.score(rules), 24);
    }

    #[test]
    fn test_time_warp_time_bonus() {
        let rules = GameKind::TimeWarp.rules();
        let mut round = RoundState::new(rules);
        press_all(&mut round, rules, &["z1", "z2"]);
        assert_eq!(round.score(rules), 15);
        round.finish(Some(12_400));
        assert_eq!(round.score(rules), 27);
        assert!(!round.finish(Some(0)));
    }

    #[test]
    fn test_time_bonus_needs_a_scored_zone() {
        let rules = GameKind::TimeWarp.rules();
        let mut round = RoundState::new(rules);
        round.finish(Some(60_000));
        assert_eq!(round.score(rules), 0);
    }

    #[test]
    fn test_log_tracks_running_score() {
        let rules = GameKind::Greedy.rules();
        let mut round = RoundState::new(rules);
        press_all(&mut round, rules, &["5", "miss", "greedy"]);
        let scores: Vec<i32> = round.log().iter().map(|e| e.score_after).collect();
        assert_eq!(scores, [5, 5, 15]);
        assert_eq!(round.last_points(), 10);
        assert_eq!(round.finalized().last_points(), 0);
    }
}
