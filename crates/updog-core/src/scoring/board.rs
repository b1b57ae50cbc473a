use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Marks on the current Fireball board.
///
/// `normal` and `bonus` are disjoint; the board is complete once their union
/// covers every scoreable zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    normal: BTreeSet<u8>,
    bonus: BTreeSet<u8>,
    boards_completed: u32,
}

impl BoardState {
    pub fn is_marked(&self, zone: u8) -> bool {
        self.normal.contains(&zone) || self.bonus.contains(&zone)
    }

    /// Returns false if the zone already carries a mark.
    pub fn mark(&mut self, zone: u8, bonus: bool) -> bool {
        if self.is_marked(zone) {
            return false;
        }
        if bonus {
            self.bonus.insert(zone);
        } else {
            self.normal.insert(zone);
        }
        true
    }

    pub fn is_complete(&self, zones: &[u8]) -> bool {
        !zones.is_empty() && zones.iter().all(|z| self.is_marked(*z))
    }

    /// Clear the marks and count the finished board.
    pub fn fold(&mut self) {
        self.normal.clear();
        self.bonus.clear();
        self.boards_completed += 1;
    }

    pub fn boards_completed(&self) -> u32 {
        self.boards_completed
    }

    pub fn normal(&self) -> &BTreeSet<u8> {
        &self.normal
    }

    pub fn bonus(&self) -> &BTreeSet<u8> {
        &self.bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_are_disjoint() {
        let mut board = BoardState::default();
        assert!(board.mark(3, false));
        assert!(!board.mark(3, true));
        assert!(board.bonus().is_empty());
    }

    #[test]
    fn test_completion_by_union() {
        let mut board = BoardState::default();
        let zones = [1, 2, 3];
        board.mark(1, false);
        board.mark(2, true);
        assert!(!board.is_complete(&zones));
        board.mark(3, false);
        assert!(board.is_complete(&zones));

        board.fold();
        assert_eq!(board.boards_completed(), 1);
        assert!(!board.is_marked(1));
    }
}
