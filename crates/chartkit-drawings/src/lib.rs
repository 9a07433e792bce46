//! # ChartKit Drawings
//!
//! Drawing tools for price charts: trend lines, rays, horizontal and
//! vertical lines, parallel channels, triangles and Fibonacci retracements.
//!
//! The crate owns the interaction protocol shared by every annotation type:
//! draw, hover, select, drag (staged, then committed) and delete, tied to a
//! single scene-level undo/redo history and a single selection across types.
//!
//! ## Modules
//!
//! - [`model`]: annotation geometry, patches and the shape-kind table
//! - [`scene`]: full-scene values handed to the host and the history
//! - [`registry`]: type-keyed collections with uniform select/delete/restore
//! - [`drag_override`]: staged drag edits
//! - [`history`]: bounded snapshot stack
//! - [`hover`]: hovered component with a grace period
//! - [`controller`]: the pointer/keyboard state machine tying it together

pub mod controller;
pub mod drag_override;
pub mod history;
pub mod hover;
pub mod model;
pub mod registry;
pub mod scene;

pub use controller::{InteractionController, InteractionState, KeyCommand, PointerEvent};
pub use drag_override::{DragOverride, DragState};
pub use history::HistoryManager;
pub use hover::{HoverTracker, HoveredComponent};
pub use model::{Annotation, Appearance, Geometry, GeometryPatch, LineExtent, ShapeKind};
pub use registry::{
    AnnotationCollection, AnnotationRegistry, DeleteOutcome, HitMatcher, SelectionHit,
    VecCollection,
};
pub use scene::Scene;
