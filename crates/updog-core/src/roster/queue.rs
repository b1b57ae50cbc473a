use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::roster::Participant;
use crate::scoring::{RoundState, RoundSummary};

/// A participant together with their finalized round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedRound {
    pub participant: Participant,
    pub round: RoundState,
    pub summary: RoundSummary,
    pub completed_at: DateTime<Utc>,
}

/// Active participant, pending queue and completed list.
///
/// `active` is only empty when the queue is empty too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roster {
    active: Option<Participant>,
    queue: VecDeque<Participant>,
    completed: Vec<CompletedRound>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the queue, promoting to active when nobody is up.
    pub fn add(&mut self, participant: Participant) {
        self.queue.push_back(participant);
        self.promote();
    }

    pub fn extend<I: IntoIterator<Item = Participant>>(&mut self, participants: I) {
        self.queue.extend(participants);
        self.promote();
    }

    fn promote(&mut self) {
        if self.active.is_none() {
            self.active = self.queue.pop_front();
        }
    }

    /// Archive the active participant's round and bring up the next one.
    pub fn complete(&mut self, entry: CompletedRound) {
        self.completed.push(entry);
        self.active = self.queue.pop_front();
    }

    /// Move the active participant to the back of the queue.
    pub fn rotate(&mut self) {
        if let Some(current) = self.active.take() {
            self.queue.push_back(current);
        }
        self.promote();
    }

    /// Reinstate the most recently completed participant as active.
    ///
    /// The current active participant goes back to the front of the queue.
    pub fn step_back(&mut self) -> Option<CompletedRound> {
        let entry = self.completed.pop()?;
        if let Some(current) = self.active.take() {
            self.queue.push_front(current);
        }
        self.active = Some(entry.participant.clone());
        Some(entry)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn active(&self) -> Option<&Participant> {
        self.active.as_ref()
    }

    pub fn queue(&self) -> &VecDeque<Participant> {
        &self.queue
    }

    pub fn completed(&self) -> &[CompletedRound] {
        &self.completed
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_none() && self.queue.is_empty() && self.completed.is_empty()
    }

    /// Every known participant: completed, active, then queued.
    pub fn all_participants(&self) -> Vec<&Participant> {
        self.completed
            .iter()
            .map(|c| &c.participant)
            .chain(self.active.iter())
            .chain(self.queue.iter())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(participant: Participant) -> CompletedRound {
        CompletedRound {
            participant,
            round: RoundState::default(),
            summary: RoundSummary::default(),
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn test_first_added_becomes_active() {
        let mut roster = Roster::new();
        roster.add(Participant::new("A", "1"));
        roster.add(Participant::new("B", "2"));
        assert_eq!(roster.active().unwrap().handler, "A");
        assert_eq!(roster.queue().len(), 1);
    }

    #[test]
    fn test_complete_advances_to_none() {
        let mut roster = Roster::new();
        roster.add(Participant::new("A", "1"));
        let active = roster.active().cloned().unwrap();
        roster.complete(entry(active));
        assert!(roster.active().is_none());
        assert_eq!(roster.completed().len(), 1);
    }

    #[test]
    fn test_rotate_moves_to_tail() {
        let mut roster = Roster::new();
        roster.extend([
            Participant::new("A", "1"),
            Participant::new("B", "2"),
            Participant::new("C", "3"),
        ]);
        roster.rotate();
        assert_eq!(roster.active().unwrap().handler, "B");
        let queued: Vec<&str> = roster.queue().iter().map(|p| p.handler.as_str()).collect();
        assert_eq!(queued, ["C", "A"]);
    }

    #[test]
    fn test_step_back_restores_previous() {
        let mut roster = Roster::new();
        roster.extend([Participant::new("A", "1"), Participant::new("B", "2")]);
        let first = roster.active().cloned().unwrap();
        roster.complete(entry(first.clone()));

        let restored = roster.step_back().unwrap();
        assert_eq!(restored.participant, first);
        assert_eq!(roster.active(), Some(&first));
        assert_eq!(roster.queue().front().unwrap().handler, "B");
        assert!(roster.step_back().is_none());
    }
}
