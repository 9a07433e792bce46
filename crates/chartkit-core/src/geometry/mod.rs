//! Geometry utilities: value types, the data/screen transform, and the
//! hit-testing primitives built on them.

mod hit;
mod point;
mod transform;

pub use hit::{
    distance_to_segment, extend_segment, is_near_line, is_near_screen_segment, is_near_triangle,
    point_in_triangle, triangle_is_degenerate, Planar,
};
pub use point::{DataPoint, ScreenPoint, ScreenRect};
pub use transform::ChartTransform;
