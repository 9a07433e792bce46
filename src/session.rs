//! Scripted session replay.
//!
//! A session file describes the chart surface, an optional starting scene
//! and the pointer/keyboard events a host would deliver. Replaying it drives
//! an [`InteractionController`] exactly as a UI would and reports the final
//! committed state.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use chartkit_core::constants::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH};
use chartkit_core::geometry::ChartTransform;
use chartkit_core::shared;
use chartkit_drawings::{
    AnnotationRegistry, HoveredComponent, InteractionController, KeyCommand, PointerEvent, Scene,
    ShapeKind, VecCollection,
};
use chartkit_settings::Config;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Visible data window and surface size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSpec {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for SurfaceSpec {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 100.0,
            y_min: 0.0,
            y_max: 100.0,
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
        }
    }
}

impl SurfaceSpec {
    pub fn to_transform(&self) -> chartkit_core::Result<ChartTransform> {
        let transform = ChartTransform::try_new(
            self.x_min,
            self.x_max,
            self.y_min,
            self.y_max,
            self.width,
            self.height,
        )?;
        Ok(transform)
    }
}

/// One host event. Pointer positions are in data space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    SelectTool {
        #[serde(default)]
        kind: Option<ShapeKind>,
    },
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        time_ms: u64,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        time_ms: u64,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        time_ms: u64,
    },
    Key {
        key: KeyCommand,
    },
    Tick {
        time_ms: u64,
    },
    HoldHover {
        time_ms: u64,
    },
    ReadyForSelection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionScript {
    #[serde(default)]
    pub surface: SurfaceSpec,
    /// Annotations present before the first event.
    #[serde(default)]
    pub initial: Scene,
    #[serde(default)]
    pub events: Vec<SessionEvent>,
}

/// Final state after a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub scene: Scene,
    pub selections: BTreeMap<String, Vec<usize>>,
    pub hovered: Option<HoveredComponent>,
    pub pending_reselect: Option<(String, usize)>,
    pub can_undo: bool,
    pub can_redo: bool,
}

pub fn load_session(path: &Path) -> anyhow::Result<SessionScript> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read session file {}", path.display()))?;
    let script = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse session file {}", path.display()))?;
    Ok(script)
}

/// Replays `script` against a fresh registry holding every shape kind.
pub fn replay(script: &SessionScript, config: &Config) -> anyhow::Result<SessionReport> {
    let transform = script
        .surface
        .to_transform()
        .context("Invalid session surface")?;

    let mut registry = AnnotationRegistry::with_shape_kinds();
    for (type_key, items) in script.initial.iter() {
        registry.register(type_key, VecCollection::with_items(items.to_vec()));
    }
    let mut controller = InteractionController::new(shared(registry), config, transform);

    for (n, event) in script.events.iter().enumerate() {
        debug!(n, ?event, "Replaying event");
        apply_event(&mut controller, event);
    }

    let report = SessionReport {
        scene: controller.scene(),
        selections: controller.selections(),
        hovered: controller.hovered().cloned(),
        pending_reselect: controller
            .pending_reselect()
            .map(|(type_key, index)| (type_key.to_string(), index)),
        can_undo: controller.can_undo(),
        can_redo: controller.can_redo(),
    };
    info!(
        events = script.events.len(),
        items = report.scene.item_count(),
        "Session replayed"
    );
    Ok(report)
}

fn apply_event(controller: &mut InteractionController, event: &SessionEvent) {
    match *event {
        SessionEvent::SelectTool { kind } => controller.select_tool(kind),
        SessionEvent::PointerDown { x, y, time_ms } => {
            controller.pointer_down(PointerEvent::new(x, y, time_ms))
        }
        SessionEvent::PointerMove { x, y, time_ms } => {
            controller.pointer_move(PointerEvent::new(x, y, time_ms))
        }
        SessionEvent::PointerUp { x, y, time_ms } => {
            controller.pointer_up(PointerEvent::new(x, y, time_ms))
        }
        SessionEvent::Key { key } => {
            controller.key(key);
        }
        SessionEvent::Tick { time_ms } => controller.tick(time_ms),
        SessionEvent::HoldHover { time_ms } => controller.hold_hover(time_ms),
        SessionEvent::ReadyForSelection => {
            controller.ready_for_selection();
        }
    }
}
