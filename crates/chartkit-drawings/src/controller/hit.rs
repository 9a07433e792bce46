//! Pointer hit testing across registered collections.

use chartkit_core::geometry::DataPoint;

use crate::hover::HoveredComponent;
use crate::registry::AnnotationRegistry;

use super::state::{DragTarget, Grab};
use super::InteractionController;

impl InteractionController {
    /// Topmost item whose body is within tolerance of `pos`.
    ///
    /// Later collections and later items are drawn on top, so both are
    /// searched back to front.
    pub(crate) fn hit_body(
        &self,
        registry: &AnnotationRegistry,
        pos: DataPoint,
    ) -> Option<DragTarget> {
        let tolerance = self.settings.hit_tolerance_px;
        registry.collections().rev().find_map(|(type_key, items)| {
            items
                .iter()
                .enumerate()
                .rev()
                .find(|(_, item)| item.geometry.hit_test(pos, tolerance, &self.transform))
                .map(|(index, item)| DragTarget::new(type_key, index, Grab::Body, item.geometry))
        })
    }

    /// Handle of the selected item under `pos`, falling back to any body.
    pub(crate) fn hit_target(&self, pos: DataPoint) -> Option<DragTarget> {
        let registry = self.registry.borrow();
        let tolerance = self.settings.hit_tolerance_px;
        let pointer = self.transform.data_to_screen(pos);

        if let Some((type_key, index)) = registry.selected() {
            if let Some(item) = registry.items(type_key).and_then(|items| items.get(index)) {
                let handle = item
                    .geometry
                    .control_points(&self.transform)
                    .iter()
                    .position(|h| self.transform.data_to_screen(*h).distance_to(&pointer) <= tolerance);
                if let Some(h) = handle {
                    return Some(DragTarget::new(type_key, index, Grab::Handle(h), item.geometry));
                }
            }
        }

        self.hit_body(&registry, pos)
    }

    pub(crate) fn hovered_at(&self, pos: DataPoint) -> Option<HoveredComponent> {
        let registry = self.registry.borrow();
        let target = self.hit_body(&registry, pos)?;
        let bounds = target.original.screen_bounds(&self.transform)?;
        Some(HoveredComponent {
            type_key: target.type_key,
            index: target.index,
            bounds,
        })
    }
}
