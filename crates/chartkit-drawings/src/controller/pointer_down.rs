//! Pointer-down handling: starts draws and presses, clears selection on
//! empty space.

use tracing::debug;

use crate::model::GeometryPatch;

use super::state::{InteractionState, PointerEvent};
use super::InteractionController;

impl InteractionController {
    pub fn pointer_down(&mut self, event: PointerEvent) {
        self.hover.tick(event.time_ms);
        let pos = self.chart_position(&event);

        match self.state {
            InteractionState::Idle => {}
            // The next point of an unfinished shape lands on pointer up.
            InteractionState::Drawing { .. } => return,
            InteractionState::Pressing { .. } | InteractionState::Dragging { .. } => {
                debug!("pointer down during an active press ignored");
                return;
            }
        }

        if let Some(kind) = self.active_tool {
            debug!(kind = %kind, x = pos.x, y = pos.y, "Draw started");
            self.state = InteractionState::Drawing {
                kind,
                points: vec![pos],
                cursor: None,
            };
            return;
        }

        match self.hit_target(pos) {
            Some(target) => {
                debug!(
                    type_key = %target.type_key,
                    index = target.index,
                    grab = ?target.grab,
                    "Press on annotation"
                );
                self.drag.begin(target.index, GeometryPatch::default());
                self.state = InteractionState::Pressing {
                    target,
                    origin: pos,
                };
            }
            None => {
                self.registry.borrow_mut().deselect_all();
                self.pending_reselect = None;
            }
        }
    }
}
