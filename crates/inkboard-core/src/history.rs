//! Linear undo/redo history.

use crate::shapes::{Element, ElementId};
use serde::{Deserialize, Serialize};

/// A snapshot of document state for undo/redo.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistorySnapshot {
    /// All elements in z-order.
    pub elements: Vec<Element>,
    /// Selected element at the time of the snapshot.
    pub selection: Option<ElementId>,
}

/// Ordered snapshots plus a cursor.
///
/// The snapshot under the cursor always mirrors the live document. Entries
/// after the cursor are redo states and are dropped on the next commit.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistorySnapshot>,
    index: usize,
    limit: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(None)
    }
}

impl History {
    /// Create a history seeded with one empty snapshot.
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            entries: vec![HistorySnapshot::default()],
            index: 0,
            limit,
        }
    }

    /// Record the given state as a new undo step.
    pub fn commit(&mut self, elements: &[Element], selection: Option<ElementId>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(HistorySnapshot {
            elements: elements.to_vec(),
            selection,
        });
        self.index = self.entries.len() - 1;

        if let Some(limit) = self.limit {
            let excess = self.entries.len().saturating_sub(limit.max(1));
            if excess > 0 {
                self.entries.drain(..excess);
                self.index -= excess;
            }
        }

        log::debug!("History commit: {} entries, cursor at {}", self.entries.len(), self.index);
    }

    /// Step back; returns the snapshot to restore.
    pub fn undo(&mut self) -> Option<&HistorySnapshot> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(&self.entries[self.index])
    }

    /// Step forward; returns the snapshot to restore.
    pub fn redo(&mut self) -> Option<&HistorySnapshot> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(&self.entries[self.index])
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> &HistorySnapshot {
        &self.entries[self.index]
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Number of snapshots, including the seed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true: the history always holds at least the seed snapshot.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor position.
    pub fn index(&self) -> usize {
        self.index
    }
}
