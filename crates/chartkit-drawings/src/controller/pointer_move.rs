//! Pointer-move handling: draw previews, drag staging and hover.

use chartkit_core::geometry::DataPoint;
use tracing::debug;

use super::state::{Grab, InteractionState, PointerEvent};
use super::InteractionController;

impl InteractionController {
    pub fn pointer_move(&mut self, event: PointerEvent) {
        self.hover.tick(event.time_ms);
        let pos = self.chart_position(&event);

        match &mut self.state {
            InteractionState::Drawing { cursor, .. } => {
                *cursor = Some(pos);
            }
            InteractionState::Pressing { origin, .. } => {
                let travelled = self.transform.screen_distance(*origin, pos);
                if travelled >= self.settings.drag_threshold_px {
                    self.start_drag(pos);
                }
            }
            InteractionState::Dragging { .. } => self.stage_drag(pos),
            InteractionState::Idle => {
                if self.active_tool.is_none() {
                    let hit = self.hovered_at(pos);
                    self.hover.update(hit, event.time_ms);
                }
            }
        }
    }

    fn start_drag(&mut self, pos: DataPoint) {
        let InteractionState::Pressing { target, origin } = std::mem::take(&mut self.state) else {
            return;
        };
        debug!(
            type_key = %target.type_key,
            index = target.index,
            "Drag started"
        );
        self.state = InteractionState::Dragging { target, origin };
        self.hover.clear();
        self.stage_drag(pos);
    }

    /// Recomputes the staged patch from the press origin to `pos`.
    pub(crate) fn stage_drag(&mut self, pos: DataPoint) {
        let InteractionState::Dragging { target, origin } = &self.state else {
            return;
        };
        let original = &target.original;
        let patch = match target.grab {
            Grab::Body => Some(original.translate(pos.x - origin.x, pos.y - origin.y)),
            Grab::Handle(h) => match target.kind {
                Some(kind) => kind.handle_patch(original, h, pos),
                None => original.handle_patch(h, pos),
            },
        };
        match patch {
            Some(patch) => self.drag.update(patch),
            None => debug!(grab = ?target.grab, "no patch for grabbed handle"),
        }
    }
}
