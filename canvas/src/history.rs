//! Linear undo/redo over full-surface snapshots.
//!
//! `undo` holds past states oldest-first; `redo` holds states undone, most
//! recent on top. Recording a new state always discards `redo`: there is no
//! branching history. An optional limit caps `undo`, evicting the oldest
//! state first.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use crate::surface::Snapshot;

#[derive(Debug, Clone, Default)]
pub struct History {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    limit: Option<usize>,
}

impl History {
    /// Unbounded history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// History keeping at most `limit` undo states, or unbounded for `None`.
    #[must_use]
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self { limit, ..Self::default() }
    }

    /// Record the state about to be overwritten by a mutation.
    pub fn record(&mut self, before: Snapshot) {
        self.redo.clear();
        self.push_undo(before);
    }

    /// Trade `current` for the most recent past state.
    ///
    /// Returns `None`, leaving both stacks untouched, when there is nothing to undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let target = self.undo.pop_back()?;
        self.redo.push(current);
        Some(target)
    }

    /// Trade `current` for the most recently undone state.
    ///
    /// Returns `None`, leaving both stacks untouched, when there is nothing to redo.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let target = self.redo.pop()?;
        self.push_undo(current);
        Some(target)
    }

    /// The state `undo` would return, without moving anything.
    #[must_use]
    pub fn peek_undo(&self) -> Option<&Snapshot> {
        self.undo.back()
    }

    /// The state `redo` would return, without moving anything.
    #[must_use]
    pub fn peek_redo(&self) -> Option<&Snapshot> {
        self.redo.last()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Total pixel bytes retained across both stacks.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.undo.iter().chain(self.redo.iter()).map(Snapshot::byte_len).sum()
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo.push_back(snapshot);
        if let Some(limit) = self.limit {
            while self.undo.len() > limit {
                self.undo.pop_front();
            }
        }
    }
}
