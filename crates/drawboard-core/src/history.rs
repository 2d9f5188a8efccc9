//! Snapshot-based undo/redo.

use crate::scene::Scene;

/// Linear undo history of scene snapshots.
///
/// `snapshots[0]` is always the empty scene and `cursor` points at the
/// snapshot equal to the live scene.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Scene>,
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self {
            snapshots: vec![Scene::new()],
            cursor: 0,
        }
    }
}

impl History {
    /// History holding only the empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// History whose baseline is the empty scene followed by `scene`.
    ///
    /// Used when a saved scene is loaded: undo goes back to blank.
    pub fn with_scene(scene: Scene) -> Self {
        let mut history = Self::new();
        if !scene.is_empty() {
            history.push(scene);
        }
        history
    }

    /// Record a committed state. Anything redoable is discarded.
    pub fn push(&mut self, snapshot: Scene) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;
        log::debug!("History push: {}/{}", self.cursor, self.snapshots.len());
    }

    /// Step back. Returns the snapshot to restore, or `None` at the oldest one.
    pub fn undo(&mut self) -> Option<Scene> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        log::debug!("Undo to {}", self.cursor);
        Some(self.snapshots[self.cursor].clone())
    }

    /// Step forward. Returns the snapshot to restore, or `None` at the newest one.
    pub fn redo(&mut self) -> Option<Scene> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        log::debug!("Redo to {}", self.cursor);
        Some(self.snapshots[self.cursor].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Cursor position.
    pub fn index(&self) -> usize {
        self.cursor
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Never true: the empty baseline is always present.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> &Scene {
        &self.snapshots[self.cursor]
    }
}
