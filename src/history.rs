//! Undo/redo history
//!
//! Each recorded transaction becomes a step holding its changes and their
//! inverse. Consecutive typing at the cursor joins the previous group when it
//! arrives within the group delay, so undo removes a typed word at once.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::transaction::{ChangeSet, Selection};

/// Typing further apart than this starts a new undo group
pub const GROUP_DELAY: Duration = Duration::from_millis(500);

/// One applied change set and what reverts it
#[derive(Debug, Clone)]
pub struct HistoryStep {
    pub changes: ChangeSet,
    pub inverse: ChangeSet,
}

/// A group of steps undone and redone together
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub steps: Vec<HistoryStep>,
    pub selection_before: Selection,
    pub selection_after: Selection,
    user_event: Option<&'static str>,
    last_at: Instant,
}

impl HistoryEntry {
    fn joins(&self, user_event: Option<&'static str>, first_from: usize, now: Instant) -> bool {
        matches!(user_event, Some("input.type") | Some("delete.backward"))
            && self.user_event == user_event
            && now.duration_since(self.last_at) < GROUP_DELAY
            && self.selection_after.main().head == first_from
    }
}

/// Undo and redo stacks for one editor
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Record an applied change set; clears the redo stack
    pub fn record(
        &mut self,
        step: HistoryStep,
        selection_before: Selection,
        selection_after: Selection,
        user_event: Option<&'static str>,
    ) {
        let Some(first) = step.changes.changes().first() else {
            return;
        };
        let now = Instant::now();

        match self.undo_stack.last_mut() {
            Some(last) if last.joins(user_event, first.from, now) => {
                last.steps.push(step);
                last.selection_after = selection_after;
                last.last_at = now;
                trace!(steps = last.steps.len(), "history step joined group");
            }
            _ => {
                self.undo_stack.push(HistoryEntry {
                    steps: vec![step],
                    selection_before,
                    selection_after,
                    user_event,
                    last_at: now,
                });
                trace!(undo_stack = self.undo_stack.len(), "history group pushed");
            }
        }

        if !self.redo_stack.is_empty() {
            trace!(cleared = self.redo_stack.len(), "redo stack cleared");
        }
        self.redo_stack.clear();
    }

    /// Take the most recent group to undo. Hand it back with [`History::undone`].
    pub fn take_undo(&mut self) -> Option<HistoryEntry> {
        self.undo_stack.pop()
    }

    /// Store an undone group so it can be redone
    pub fn undone(&mut self, entry: HistoryEntry) {
        self.redo_stack.push(entry);
        trace!(redo_stack = self.redo_stack.len(), "undo applied");
    }

    /// Take the most recently undone group. Hand it back with [`History::redone`].
    pub fn take_redo(&mut self) -> Option<HistoryEntry> {
        self.redo_stack.pop()
    }

    /// Store a redone group on the undo stack without touching redo
    pub fn redone(&mut self, mut entry: HistoryEntry) {
        // A redone group never absorbs later typing
        entry.user_event = None;
        self.undo_stack.push(entry);
        trace!(undo_stack = self.undo_stack.len(), "redo applied");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::Change;

    fn step(from: usize, insert: &str) -> HistoryStep {
        HistoryStep {
            changes: ChangeSet::new(vec![Change::insert(from, insert)]),
            inverse: ChangeSet::new(vec![Change::delete(from, from + insert.len())]),
        }
    }

    #[test]
    fn test_typing_groups() {
        let mut history = History::new();
        history.record(step(0, "a"), Selection::cursor(0), Selection::cursor(1), Some("input.type"));
        history.record(step(1, "b"), Selection::cursor(1), Selection::cursor(2), Some("input.type"));
        assert_eq!(history.undo_len(), 1);

        let entry = history.take_undo().unwrap();
        assert_eq!(entry.steps.len(), 2);
        assert_eq!(entry.selection_before, Selection::cursor(0));
    }

    #[test]
    fn test_non_adjacent_typing_splits() {
        let mut history = History::new();
        history.record(step(0, "a"), Selection::cursor(0), Selection::cursor(1), Some("input.type"));
        history.record(step(5, "b"), Selection::cursor(5), Selection::cursor(6), Some("input.type"));
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn test_untyped_changes_never_group() {
        let mut history = History::new();
        history.record(step(0, "a"), Selection::cursor(0), Selection::cursor(1), None);
        history.record(step(1, "b"), Selection::cursor(1), Selection::cursor(2), None);
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::new();
        history.record(step(0, "a"), Selection::cursor(0), Selection::cursor(1), None);
        let entry = history.take_undo().unwrap();
        history.undone(entry);
        assert!(history.can_redo());

        history.record(step(0, "c"), Selection::cursor(0), Selection::cursor(1), None);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_redo_roundtrip() {
        let mut history = History::new();
        history.record(step(0, "a"), Selection::cursor(0), Selection::cursor(1), Some("input.type"));
        let entry = history.take_undo().unwrap();
        history.undone(entry);
        let entry = history.take_redo().unwrap();
        history.redone(entry);
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 0);

        // Typing after a redo starts a fresh group
        history.record(step(1, "b"), Selection::cursor(1), Selection::cursor(2), Some("input.type"));
        assert_eq!(history.undo_len(), 2);
    }
}
