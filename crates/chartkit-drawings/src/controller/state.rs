//! Controller state machine and input event types.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Drawing        (pointer down with a drawing tool active)
//! Drawing -> Drawing     (pointer up while fewer points than the shape needs)
//! Drawing -> Idle        (pointer up completing the shape, or escape)
//! Idle -> Pressing       (pointer down on a handle or shape body)
//! Pressing -> Dragging   (pointer travels past the drag threshold)
//! Pressing -> Idle       (pointer up: treated as a click)
//! Dragging -> Idle       (pointer up: commits the drag)
//! ```

use chartkit_core::geometry::DataPoint;
use serde::{Deserialize, Serialize};

use crate::model::{Geometry, ShapeKind};

/// A pointer event already translated into data space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub position: DataPoint,
    /// Host timestamp in milliseconds, used for the hover grace period.
    #[serde(default)]
    pub time_ms: u64,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64, time_ms: u64) -> Self {
        Self {
            position: DataPoint::new(x, y),
            time_ms,
        }
    }
}

/// Keyboard commands the controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommand {
    Delete,
    Undo,
    Redo,
    Escape,
}

/// Which part of the shape the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grab {
    /// A control point, by position in the geometry's handle list
    Handle(usize),
    /// Anywhere on the shape: moves it as a whole
    Body,
}

/// The item a press or drag acts on.
#[derive(Debug, Clone, PartialEq)]
pub struct DragTarget {
    pub type_key: String,
    pub index: usize,
    pub grab: Grab,
    /// Committed geometry at press time; drag patches are computed from it.
    pub original: Geometry,
    pub kind: Option<ShapeKind>,
}

impl DragTarget {
    pub(crate) fn new(type_key: &str, index: usize, grab: Grab, original: Geometry) -> Self {
        Self {
            type_key: type_key.to_string(),
            index,
            grab,
            original,
            kind: ShapeKind::from_type_key(type_key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    /// No gesture in progress
    #[default]
    Idle,

    /// Collecting the points of a new shape
    Drawing {
        kind: ShapeKind,
        points: Vec<DataPoint>,
        /// Latest pointer position, for the live preview
        cursor: Option<DataPoint>,
    },

    /// Pointer pressed on an item but has not moved far enough to drag
    Pressing {
        target: DragTarget,
        origin: DataPoint,
    },

    /// Dragging an item; edits are staged in the drag override
    Dragging {
        target: DragTarget,
        origin: DataPoint,
    },
}

impl InteractionState {
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// The pressed or dragged item, if any.
    pub fn target(&self) -> Option<&DragTarget> {
        match self {
            Self::Pressing { target, .. } | Self::Dragging { target, .. } => Some(target),
            _ => None,
        }
    }
}

/// A drag commit waiting for the host to request re-selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingReselect {
    pub type_key: String,
    pub index: usize,
}
