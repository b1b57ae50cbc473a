use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Clicked/enabled bookkeeping for gated actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionGate {
    clicked: BTreeSet<String>,
    enabled: BTreeSet<String>,
}

impl ActionGate {
    pub fn new<I, S>(enabled: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            clicked: BTreeSet::new(),
            enabled: enabled.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.enabled.contains(id)
    }

    pub fn is_clicked(&self, id: &str) -> bool {
        self.clicked.contains(id)
    }

    /// Record a press: the action leaves the enabled set.
    pub fn click(&mut self, id: &str) {
        self.enabled.remove(id);
        self.clicked.insert(id.to_string());
    }

    /// Enable `id` unless it was already clicked this round.
    pub fn unlock(&mut self, id: &str) {
        if !self.clicked.contains(id) {
            self.enabled.insert(id.to_string());
        }
    }

    pub fn disable(&mut self, id: &str) {
        self.enabled.remove(id);
    }

    pub fn disable_all(&mut self) {
        self.enabled.clear();
    }

    /// Replace both sets, e.g. on a phase or board transition.
    pub fn reset_to<I, S>(&mut self, enabled: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self = Self::new(enabled);
    }

    pub fn enabled(&self) -> impl Iterator<Item = &str> {
        self.enabled.iter().map(String::as_str)
    }

    pub fn clicked(&self) -> impl Iterator<Item = &str> {
        self.clicked.iter().map(String::as_str)
    }

    pub fn is_exhausted(&self) -> bool {
        self.enabled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_moves_to_clicked() {
        let mut gate = ActionGate::new(["1"]);
        gate.click("1");
        assert!(gate.is_clicked("1"));
        assert!(!gate.is_enabled("1"));
        assert!(gate.is_exhausted());
    }

    #[test]
    fn test_unlock_skips_clicked() {
        let mut gate = ActionGate::new(["a2", "b2"]);
        gate.unlock("key");
        gate.click("key");
        gate.unlock("key");
        assert!(!gate.is_enabled("key"));
        assert_eq!(gate.enabled().collect::<Vec<_>>(), ["a2", "b2"]);
    }

    #[test]
    fn test_reset_to_clears_clicked() {
        let mut gate = ActionGate::new(["x"]);
        gate.click("x");
        gate.reset_to(["y", "z"]);
        assert_eq!(gate.clicked().count(), 0);
        assert!(gate.is_enabled("y"));
    }
}
