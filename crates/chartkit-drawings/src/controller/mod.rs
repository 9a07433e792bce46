//! Interaction controller.
//!
//! Receives pointer events already translated into data space, decides
//! between drawing, clicking, dragging and hovering, and calls into the
//! registry, drag override and history at the right transitions.
//!
//! ## Modules
//!
//! - `state` - Interaction state machine and input event types
//! - `pointer_down` - Draw start, press start, empty-space deselect
//! - `pointer_move` - Draw preview, drag staging, hover
//! - `pointer_up` - Draw completion, click selection, drag commit
//! - `keys` - Delete, undo, redo, escape
//! - `hit` - Hit testing across collections

mod hit;
mod keys;
mod pointer_down;
mod pointer_move;
mod pointer_up;
mod state;

use std::collections::BTreeMap;
use std::rc::Rc;

use chartkit_core::geometry::{ChartTransform, DataPoint};
use chartkit_core::types::Shared;
use chartkit_settings::{Config, InteractionSettings};
use tracing::{debug, info};

use crate::drag_override::DragOverride;
use crate::history::HistoryManager;
use crate::hover::{HoverTracker, HoveredComponent};
use crate::model::{Annotation, Geometry, ShapeKind};
use crate::registry::{AnnotationRegistry, SelectionHit};
use crate::scene::Scene;

pub use state::{DragTarget, Grab, InteractionState, KeyCommand, PointerEvent};
use state::PendingReselect;

pub struct InteractionController {
    registry: Shared<AnnotationRegistry>,
    history: HistoryManager,
    drag: DragOverride,
    hover: HoverTracker,
    transform: ChartTransform,
    settings: InteractionSettings,
    snapshot_on_delete: bool,
    active_tool: Option<ShapeKind>,
    state: InteractionState,
    pending_reselect: Option<PendingReselect>,
}

impl InteractionController {
    /// Creates a controller over `registry`; its current scene becomes the
    /// first history entry.
    pub fn new(
        registry: Shared<AnnotationRegistry>,
        config: &Config,
        transform: ChartTransform,
    ) -> Self {
        let scene = registry.borrow().scene();
        info!(
            types = registry.borrow().type_keys().count(),
            items = scene.item_count(),
            history_depth = config.history.max_depth,
            "Interaction controller ready"
        );
        Self {
            history: HistoryManager::new(scene, config.history.max_depth),
            drag: DragOverride::new(),
            hover: HoverTracker::new(config.interaction.hover_grace_ms),
            transform,
            settings: config.interaction.clone(),
            snapshot_on_delete: config.history.snapshot_on_delete,
            active_tool: None,
            state: InteractionState::Idle,
            pending_reselect: None,
            registry,
        }
    }

    pub fn registry(&self) -> Shared<AnnotationRegistry> {
        Rc::clone(&self.registry)
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn transform(&self) -> &ChartTransform {
        &self.transform
    }

    /// Replaces the data/screen transform after a pan, zoom or resize.
    pub fn set_transform(&mut self, transform: ChartTransform) {
        self.transform = transform;
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn active_tool(&self) -> Option<ShapeKind> {
        self.active_tool
    }

    /// Pointer position with the price saturated to the visible range.
    fn chart_position(&self, event: &PointerEvent) -> DataPoint {
        let pos = event.position;
        DataPoint::new(pos.x, self.transform.clamp_y(pos.y))
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// Sets the drawable shape kind; `None` returns to select mode.
    ///
    /// An unfinished draw is abandoned.
    pub fn select_tool(&mut self, tool: Option<ShapeKind>) {
        if self.state.is_drawing() {
            debug!("Draw abandoned by tool change");
            self.state = InteractionState::Idle;
        }
        self.active_tool = tool;
        self.hover.clear();
    }

    /// The committed items of every collection.
    pub fn scene(&self) -> Scene {
        self.registry.borrow().scene()
    }

    pub fn selections(&self) -> BTreeMap<String, Vec<usize>> {
        self.registry.borrow().selections()
    }

    pub fn hovered(&self) -> Option<&HoveredComponent> {
        self.hover.current()
    }

    /// Keeps the hovered component alive while the pointer is over a
    /// floating control that belongs to it.
    pub fn hold_hover(&mut self, now_ms: u64) {
        self.hover.hold(now_ms);
    }

    /// Advances time for the hover grace period.
    pub fn tick(&mut self, now_ms: u64) {
        self.hover.tick(now_ms);
    }

    /// Geometry of the shape being drawn, including the pointer as its next point.
    pub fn drawing_preview(&self) -> Option<Geometry> {
        match &self.state {
            InteractionState::Drawing {
                kind,
                points,
                cursor,
            } => match cursor {
                Some(cursor) => kind.preview(points, *cursor),
                None => kind.build(points),
            },
            _ => None,
        }
    }

    /// The dragged item's live geometry: `(type_key, index, geometry)`.
    pub fn dragged_geometry(&self) -> Option<(String, usize, Geometry)> {
        let InteractionState::Dragging { target, .. } = &self.state else {
            return None;
        };
        let registry = self.registry.borrow();
        let item = registry.items(&target.type_key)?.get(target.index)?;
        Some((
            target.type_key.clone(),
            target.index,
            self.drag.resolve(target.index, &item.geometry),
        ))
    }

    /// Items to paint for `type_key`, with an active drag applied.
    pub fn render_items(&self, type_key: &str) -> Vec<Annotation> {
        let registry = self.registry.borrow();
        let items = registry.items(type_key).unwrap_or(&[]);
        match &self.state {
            InteractionState::Dragging { target, .. } if target.type_key == type_key => {
                self.drag.resolve_items(items)
            }
            _ => items.to_vec(),
        }
    }

    /// The drag commit awaiting re-selection, as `(type_key, index)`.
    pub fn pending_reselect(&self) -> Option<(&str, usize)> {
        self.pending_reselect
            .as_ref()
            .map(|p| (p.type_key.as_str(), p.index))
    }

    /// Second phase of a deferred re-select: the host has observed the
    /// committed geometry and the dragged item can be selected again.
    pub fn ready_for_selection(&mut self) -> Vec<usize> {
        let Some(pending) = self.pending_reselect.take() else {
            return Vec::new();
        };
        let mut registry = self.registry.borrow_mut();
        let scene = registry.scene();
        registry.select(
            &pending.type_key,
            &[SelectionHit::index(pending.index)],
            &scene,
        )
    }
}
