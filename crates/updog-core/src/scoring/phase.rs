use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::rules::PhaseKind;

/// Marks and misses collected in the current phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseProgress {
    pub clicked: BTreeSet<String>,
    pub misses: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "progress", rename_all = "camelCase")]
pub enum Phase {
    Obstacle(PhaseProgress),
    Catch(PhaseProgress),
}

impl Default for Phase {
    fn default() -> Self {
        Self::Obstacle(PhaseProgress::default())
    }
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Self::Obstacle(_) => PhaseKind::Obstacle,
            Self::Catch(_) => PhaseKind::Catch,
        }
    }

    pub fn progress(&self) -> &PhaseProgress {
        match self {
            Self::Obstacle(p) | Self::Catch(p) => p,
        }
    }

    fn progress_mut(&mut self) -> &mut PhaseProgress {
        match self {
            Self::Obstacle(p) | Self::Catch(p) => p,
        }
    }

    fn fresh(kind: PhaseKind) -> Self {
        match kind {
            PhaseKind::Obstacle => Self::Obstacle(PhaseProgress::default()),
            PhaseKind::Catch => Self::Catch(PhaseProgress::default()),
        }
    }
}

/// Result of feeding one mark or miss to the phase machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    Progress,
    /// Obstacle phase ended (quota met or miss cap reached).
    EnteredCatch,
    /// Catch quota met; a new obstacle phase begins.
    CycleCompleted,
    /// Catch miss cap reached; marks are discarded and the cycle restarts.
    ForcedReset,
}

/// Obstacle ⇄ Catch state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTracker {
    pub phase: Phase,
    pub cycles_completed: u32,
    pub forced_resets: u32,
}

impl PhaseTracker {
    pub fn kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    pub fn mark(&mut self, id: &str, quota: usize) -> PhaseEvent {
        let progress = self.phase.progress_mut();
        progress.clicked.insert(id.to_string());
        if progress.clicked.len() < quota {
            return PhaseEvent::Progress;
        }
        match self.kind() {
            PhaseKind::Obstacle => {
                self.phase = Phase::fresh(PhaseKind::Catch);
                PhaseEvent::EnteredCatch
            }
            PhaseKind::Catch => {
                self.phase = Phase::fresh(PhaseKind::Obstacle);
                self.cycles_completed += 1;
                PhaseEvent::CycleCompleted
            }
        }
    }

    pub fn miss(&mut self, miss_cap: u32) -> PhaseEvent {
        let progress = self.phase.progress_mut();
        progress.misses += 1;
        if progress.misses < miss_cap {
            return PhaseEvent::Progress;
        }
        match self.kind() {
            PhaseKind::Obstacle => {
                self.phase = Phase::fresh(PhaseKind::Catch);
                PhaseEvent::EnteredCatch
            }
            PhaseKind::Catch => {
                self.phase = Phase::fresh(PhaseKind::Obstacle);
                self.forced_resets += 1;
                PhaseEvent::ForcedReset
            }
        }
    }

    pub fn is_clicked(&self, id: &str) -> bool {
        self.phase.progress().clicked.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_moves_to_catch() {
        let mut tracker = PhaseTracker::default();
        assert_eq!(tracker.mark("a", 3), PhaseEvent::Progress);
        assert_eq!(tracker.mark("b", 3), PhaseEvent::Progress);
        assert_eq!(tracker.mark("c", 3), PhaseEvent::EnteredCatch);
        assert_eq!(tracker.kind(), PhaseKind::Catch);
        assert!(tracker.phase.progress().clicked.is_empty());
    }

    #[test]
    fn test_repeated_mark_does_not_count_twice() {
        let mut tracker = PhaseTracker::default();
        tracker.mark("a", 3);
        tracker.mark("a", 3);
        assert_eq!(tracker.kind(), PhaseKind::Obstacle);
        assert_eq!(tracker.phase.progress().clicked.len(), 1);
    }

    #[test]
    fn test_obstacle_misses_force_catch() {
        let mut tracker = PhaseTracker::default();
        tracker.miss(3);
        tracker.miss(3);
        assert_eq!(tracker.miss(3), PhaseEvent::EnteredCatch);
        assert_eq!(tracker.kind(), PhaseKind::Catch);
    }

    #[test]
    fn test_catch_misses_force_reset() {
        let mut tracker = PhaseTracker {
            phase: Phase::Catch(PhaseProgress::default()),
            ..Default::default()
        };
        tracker.mark("catch_short", 3);
        tracker.miss(3);
        tracker.miss(3);
        assert_eq!(tracker.miss(3), PhaseEvent::ForcedReset);
        assert_eq!(tracker.kind(), PhaseKind::Obstacle);
        assert_eq!(tracker.forced_resets, 1);
        assert_eq!(tracker.cycles_completed, 0);
    }

    #[test]
    fn test_catch_quota_completes_cycle() {
        let mut tracker = PhaseTracker {
            phase: Phase::Catch(PhaseProgress::default()),
            ..Default::default()
        };
        tracker.mark("x", 3);
        tracker.mark("y", 3);
        assert_eq!(tracker.mark("z", 3), PhaseEvent::CycleCompleted);
        assert_eq!(tracker.cycles_completed, 1);
    }
}
