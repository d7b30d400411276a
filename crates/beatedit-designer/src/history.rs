//! Undo/Redo history for playfield edits
//!
//! Edits are bracketed by [`ChangeHandler::begin_change`] and
//! [`ChangeHandler::end_change`]. The [`UndoRedoManager`] records a snapshot
//! of the whole [`ShapeStore`] when the outermost bracket opens and keeps it
//! if the store differs when that bracket closes.

use std::collections::VecDeque;

use beatedit_settings::HistorySettings;

use crate::shape_store::ShapeStore;

/// Transaction log notified around every undoable edit.
pub trait ChangeHandler {
    /// Opens a transaction. Calls may nest.
    fn begin_change(&mut self, store: &ShapeStore);
    /// Closes the most recently opened transaction.
    fn end_change(&mut self, store: &ShapeStore);
}

/// Manages bounded undo/redo stacks of playfield states
#[derive(Debug, Clone)]
pub struct UndoRedoManager {
    undo_stack: VecDeque<ShapeStore>,
    redo_stack: Vec<ShapeStore>,
    max_depth: usize,
    /// Open `begin_change` calls.
    depth: usize,
    /// State captured by the outermost `begin_change`.
    pending: Option<ShapeStore>,
}

impl UndoRedoManager {
    /// Create with custom maximum undo depth
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_depth.min(64)),
            redo_stack: Vec::new(),
            max_depth,
            depth: 0,
            pending: None,
        }
    }

    pub fn from_settings(settings: &HistorySettings) -> Self {
        Self::new(settings.max_depth)
    }

    fn push_undo(&mut self, state: ShapeStore) {
        self.redo_stack.clear();
        self.undo_stack.push_back(state);

        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
    }

    /// Restores the state before the last recorded change.
    ///
    /// Returns `false` when there is nothing to undo or a transaction is open.
    pub fn undo(&mut self, store: &mut ShapeStore) -> bool {
        if self.is_transaction_open() {
            tracing::warn!("Undo requested while a change is in progress");
            return false;
        }
        let Some(previous) = self.undo_stack.pop_back() else {
            return false;
        };
        let current = std::mem::replace(store, previous);
        self.redo_stack.push(current);
        tracing::debug!(
            "Undo applied ({} undo, {} redo remaining)",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        true
    }

    /// Re-applies the last undone change.
    pub fn redo(&mut self, store: &mut ShapeStore) -> bool {
        if self.is_transaction_open() {
            tracing::warn!("Redo requested while a change is in progress");
            return false;
        }
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(store, next);
        self.undo_stack.push_back(current);
        tracing::debug!("Redo applied");
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn is_transaction_open(&self) -> bool {
        self.depth > 0
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for UndoRedoManager {
    fn default() -> Self {
        Self::from_settings(&HistorySettings::default())
    }
}

impl ChangeHandler for UndoRedoManager {
    fn begin_change(&mut self, store: &ShapeStore) {
        if self.depth == 0 {
            self.pending = Some(store.clone());
        }
        self.depth += 1;
    }

    fn end_change(&mut self, store: &ShapeStore) {
        if self.depth == 0 {
            tracing::warn!("end_change called without a matching begin_change");
            return;
        }
        self.depth -= 1;
        if self.depth > 0 {
            return;
        }

        if let Some(before) = self.pending.take() {
            if before != *store {
                self.push_undo(before);
            } else {
                tracing::trace!("Change produced no difference; nothing recorded");
            }
        }
    }
}
