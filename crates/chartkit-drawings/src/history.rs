//! Scene-level undo/redo.
//!
//! The history is a bounded stack of full-scene snapshots plus a cursor
//! naming the current one. Pushing truncates any redo tail; when the stack
//! exceeds its depth the oldest snapshots are evicted and the cursor is
//! re-based. Snapshots are stored with selection flags stripped because
//! selection is not part of history.

use tracing::trace;

use crate::scene::Scene;

#[derive(Debug, Clone)]
pub struct HistoryManager {
    snapshots: Vec<Scene>,
    cursor: usize,
    max_depth: usize,
}

impl HistoryManager {
    /// Creates a history whose first entry is `initial`.
    ///
    /// A `max_depth` of zero is raised to one so the cursor always has a
    /// snapshot to point at.
    pub fn new(initial: Scene, max_depth: usize) -> Self {
        Self {
            snapshots: vec![initial.without_selection()],
            cursor: 0,
            max_depth: max_depth.max(1),
        }
    }

    /// Records `scene` as the new current state.
    pub fn snapshot(&mut self, scene: &Scene) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(scene.without_selection());
        if self.snapshots.len() > self.max_depth {
            let excess = self.snapshots.len() - self.max_depth;
            self.snapshots.drain(..excess);
        }
        self.cursor = self.snapshots.len() - 1;
        trace!(cursor = self.cursor, len = self.snapshots.len(), "History snapshot");
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Steps back one snapshot. Returns `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<Scene> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.get(self.cursor).cloned()
    }

    /// Steps forward one snapshot. Returns `None` at the newest entry.
    pub fn redo(&mut self) -> Option<Scene> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.snapshots.get(self.cursor).cloned()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> Option<&Scene> {
        self.snapshots.get(self.cursor)
    }

    /// Drops every snapshot and starts over from `scene`.
    pub fn clear_with(&mut self, scene: &Scene) {
        self.snapshots.clear();
        self.snapshots.push(scene.without_selection());
        self.cursor = 0;
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(Scene::new(), chartkit_core::constants::DEFAULT_HISTORY_DEPTH)
    }
}
