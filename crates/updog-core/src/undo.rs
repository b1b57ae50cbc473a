//! Bounded snapshot-based undo history.
//!
//! Snapshots are whole values, so popping one restores state exactly,
//! including compound side effects such as unlock chains.

use std::collections::VecDeque;

use crate::config::undo as undo_config;

#[derive(Debug, Clone)]
pub struct UndoStack<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> UndoStack<T> {
    /// Capacity is clamped to the supported undo depth range.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(undo_config::MIN_DEPTH, undo_config::MAX_DEPTH);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a pre-mutation snapshot, evicting the oldest when full.
    pub fn push(&mut self, snapshot: &T) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot.clone());
    }

    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Clone> Default for UndoStack<T> {
    fn default() -> Self {
        Self::new(undo_config::DEFAULT_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_returns_latest() {
        let mut stack = UndoStack::new(50);
        stack.push(&1);
        stack.push(&2);
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let mut stack = UndoStack::new(50);
        for i in 0..60 {
            stack.push(&i);
        }
        assert_eq!(stack.len(), 50);
        let mut last = None;
        while let Some(v) = stack.pop() {
            last = Some(v);
        }
        assert_eq!(last, Some(10));
    }

    #[test]
    fn test_capacity_clamped() {
        assert_eq!(UndoStack::<u8>::new(1).capacity(), undo_config::MIN_DEPTH);
        assert_eq!(UndoStack::<u8>::new(10_000).capacity(), undo_config::MAX_DEPTH);
    }

    #[test]
    fn test_clear() {
        let mut stack = UndoStack::default();
        stack.push(&"a");
        stack.clear();
        assert!(stack.is_empty());
    }
}
