//! Pointer-up handling: finishes draws, clicks and drags.

use chartkit_core::error::AnnotationError;
use chartkit_core::geometry::DataPoint;
use chartkit_settings::ReselectPolicy;
use tracing::{debug, info, warn};

use crate::model::{Annotation, ShapeKind};
use crate::registry::SelectionHit;

use super::state::{DragTarget, InteractionState, PendingReselect, PointerEvent};
use super::InteractionController;

impl InteractionController {
    pub fn pointer_up(&mut self, event: PointerEvent) {
        self.hover.tick(event.time_ms);
        let pos = self.chart_position(&event);

        if self.state.is_dragging() {
            self.stage_drag(pos);
        }

        match std::mem::take(&mut self.state) {
            InteractionState::Idle => {}
            InteractionState::Drawing {
                kind, mut points, ..
            } => {
                if points.len() < kind.arity() {
                    points.push(pos);
                }
                if points.len() >= kind.arity() {
                    self.finish_drawing(kind, &points);
                } else {
                    debug!(kind = %kind, placed = points.len(), "Waiting for next point");
                    self.state = InteractionState::Drawing {
                        kind,
                        points,
                        cursor: Some(pos),
                    };
                }
            }
            InteractionState::Pressing { target, .. } => self.finish_click(target, pos),
            InteractionState::Dragging { target, .. } => self.finish_drag(target),
        }
    }

    fn finish_drawing(&mut self, kind: ShapeKind, points: &[DataPoint]) {
        let Some(geometry) = kind.build(points) else {
            warn!(kind = %kind, points = points.len(), "draw discarded, not enough points");
            return;
        };
        let type_key = kind.type_key();
        let select = self.settings.select_on_create;

        let mut registry = self.registry.borrow_mut();
        let Some(existing) = registry.items(type_key) else {
            let err = AnnotationError::UnregisteredType {
                type_key: type_key.to_string(),
            };
            warn!(%err, "draw discarded");
            return;
        };
        let mut items: Vec<Annotation> = existing
            .iter()
            .map(|item| {
                let mut item = item.clone();
                if select {
                    item.selected = false;
                }
                item
            })
            .collect();
        items.push(Annotation::new(geometry).with_selected(select));

        let scene = registry.scene();
        let history = &mut self.history;
        registry.complete(type_key, items, &scene, |next| history.snapshot(next));
        drop(registry);

        info!(type_key, "Annotation drawn");
        self.active_tool = None;
        self.pending_reselect = None;
    }

    /// A press released before crossing the drag threshold.
    ///
    /// Selects only if the release point is still within hover proximity.
    fn finish_click(&mut self, target: DragTarget, pos: DataPoint) {
        self.drag.cancel();
        let tolerance = self.settings.hit_tolerance_px;
        let mut registry = self.registry.borrow_mut();
        let still_near = registry
            .items(&target.type_key)
            .and_then(|items| items.get(target.index))
            .is_some_and(|item| item.geometry.hit_test(pos, tolerance, &self.transform));
        if !still_near {
            debug!(type_key = %target.type_key, index = target.index, "click released off target");
            return;
        }
        let scene = registry.scene();
        registry.select(&target.type_key, &[SelectionHit::index(target.index)], &scene);
        self.pending_reselect = None;
    }

    /// Commits the staged drag and re-selects the dragged item.
    fn finish_drag(&mut self, target: DragTarget) {
        let mut registry = self.registry.borrow_mut();
        let Some(items) = registry.items(&target.type_key).map(<[_]>::to_vec) else {
            self.drag.cancel();
            let err = AnnotationError::UnregisteredType {
                type_key: target.type_key.clone(),
            };
            warn!(%err, "drag discarded");
            return;
        };
        let Some(mut committed) = self.drag.commit(&items) else {
            return;
        };

        let policy = self.settings.reselect_after_drag;
        if policy == ReselectPolicy::Deferred {
            for item in committed.iter_mut() {
                item.selected = false;
            }
            registry.deselect_all();
        }

        let scene = registry.scene();
        let scene = registry.replace_items(&target.type_key, committed, &scene);
        debug!(type_key = %target.type_key, index = target.index, %policy, "Drag committed");

        match policy {
            ReselectPolicy::Immediate => {
                registry.select(&target.type_key, &[SelectionHit::index(target.index)], &scene);
            }
            ReselectPolicy::Deferred => {
                self.pending_reselect = Some(PendingReselect {
                    type_key: target.type_key,
                    index: target.index,
                });
            }
        }
    }
}
