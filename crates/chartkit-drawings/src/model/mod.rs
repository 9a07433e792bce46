mod annotation;
mod geometry;
mod kind;

pub use annotation::{Annotation, Appearance};
pub use geometry::{ControlPoints, Geometry, GeometryPatch, LineExtent, FIB_RATIOS};
pub use kind::{Constraint, KindSpec, ShapeKind, SHAPE_KINDS};
