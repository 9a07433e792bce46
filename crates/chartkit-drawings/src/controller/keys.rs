//! Keyboard commands: delete, undo, redo, escape.

use tracing::{debug, info};

use crate::scene::Scene;

use super::state::{InteractionState, KeyCommand};
use super::InteractionController;

impl InteractionController {
    /// Dispatches a key command. Returns whether anything changed.
    pub fn key(&mut self, command: KeyCommand) -> bool {
        match command {
            KeyCommand::Delete => self.delete_selected(),
            KeyCommand::Undo => self.undo(),
            KeyCommand::Redo => self.redo(),
            KeyCommand::Escape => self.escape(),
        }
    }

    /// Deletes the active selection, snapshotting the result when configured.
    pub fn delete_selected(&mut self) -> bool {
        let outcome = {
            let mut registry = self.registry.borrow_mut();
            let scene = registry.scene();
            registry.delete(&scene)
        };
        let Some(scene) = outcome.scene else {
            debug!("delete with nothing selected");
            return false;
        };
        if self.snapshot_on_delete {
            self.history.snapshot(&scene);
        }
        self.abandon_press();
        info!(items = scene.item_count(), "Deleted selection");
        true
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(scene) => {
                self.apply_history(&scene);
                info!(cursor = self.history.cursor(), "Undo");
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(scene) => {
                self.apply_history(&scene);
                info!(cursor = self.history.cursor(), "Redo");
                true
            }
            None => false,
        }
    }

    /// Clears the selection and abandons an unfinished draw.
    ///
    /// An in-progress drag is left alone; releasing the pointer still commits it.
    pub fn escape(&mut self) -> bool {
        let had_selection = !self.registry.borrow().selections().is_empty();
        self.registry.borrow_mut().deselect_all();
        self.pending_reselect = None;
        let was_drawing = self.state.is_drawing();
        if was_drawing {
            debug!("Draw abandoned");
            self.state = InteractionState::Idle;
        }
        had_selection || was_drawing
    }

    fn apply_history(&mut self, scene: &Scene) {
        self.registry.borrow_mut().restore(scene);
        self.abandon_press();
    }

    /// Drops any press or drag whose indices may no longer be valid.
    fn abandon_press(&mut self) {
        self.drag.cancel();
        if self.state.target().is_some() {
            self.state = InteractionState::Idle;
        }
        self.hover.clear();
        self.pending_reselect = None;
    }
}
