//! Hit-testing primitives.
//!
//! Every proximity decision in the drawing layer goes through these
//! functions. Degenerate inputs (zero-length segments, collapsed triangles)
//! produce a defined "not near" answer instead of NaN comparisons.

use crate::constants::{DEGENERATE_EPSILON, ZERO_LENGTH_EPSILON};

use super::point::{DataPoint, ScreenPoint, ScreenRect};
use super::transform::ChartTransform;

/// Access to planar coordinates, shared by data and screen points.
pub trait Planar: Copy {
    fn xy(&self) -> (f64, f64);
}

impl Planar for DataPoint {
    fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl Planar for ScreenPoint {
    fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Shortest distance from `p` to the segment `a`-`b`.
///
/// The projection parameter is clamped to `[0, 1]`. A degenerate segment
/// (`a == b`) yields the point-to-point distance.
pub fn distance_to_segment<P: Planar>(p: P, a: P, b: P) -> f64 {
    let (px, py) = p.xy();
    let (ax, ay) = a.xy();
    let (bx, by) = b.xy();
    let dx = bx - ax;
    let dy = by - ay;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }
    let t = (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0);
    let proj_x = ax + t * dx;
    let proj_y = ay + t * dy;
    ((px - proj_x).powi(2) + (py - proj_y).powi(2)).sqrt()
}

/// Barycentric point-in-triangle test. Points on an edge count as inside.
///
/// Returns `false` for a degenerate triangle.
pub fn point_in_triangle<P: Planar>(p: P, v1: P, v2: P, v3: P) -> bool {
    let (px, py) = p.xy();
    let (ax, ay) = v1.xy();
    let (bx, by) = v2.xy();
    let (cx, cy) = v3.xy();

    let (v0x, v0y) = (cx - ax, cy - ay);
    let (v1x, v1y) = (bx - ax, by - ay);
    let (v2x, v2y) = (px - ax, py - ay);

    let dot00 = v0x * v0x + v0y * v0y;
    let dot01 = v0x * v1x + v0y * v1y;
    let dot02 = v0x * v2x + v0y * v2y;
    let dot11 = v1x * v1x + v1y * v1y;
    let dot12 = v1x * v2x + v1y * v2y;

    let denom = dot00 * dot11 - dot01 * dot01;
    if denom.abs() < DEGENERATE_EPSILON {
        return false;
    }
    let inv = 1.0 / denom;
    let u = (dot11 * dot02 - dot01 * dot12) * inv;
    let v = (dot00 * dot12 - dot01 * dot02) * inv;
    u >= 0.0 && v >= 0.0 && u + v <= 1.0
}

/// True when the triangle has no area (within the degeneracy tolerance).
pub fn triangle_is_degenerate<P: Planar>(v1: P, v2: P, v3: P) -> bool {
    let (ax, ay) = v1.xy();
    let (bx, by) = v2.xy();
    let (cx, cy) = v3.xy();
    let cross = (bx - ax) * (cy - ay) - (by - ay) * (cx - ax);
    cross.abs() < DEGENERATE_EPSILON
}

/// Screen-space proximity to a segment. Zero-length segments are never near.
pub fn is_near_screen_segment(
    pointer: ScreenPoint,
    a: ScreenPoint,
    b: ScreenPoint,
    tolerance_px: f64,
) -> bool {
    let len_sq = (b.x - a.x).powi(2) + (b.y - a.y).powi(2);
    if len_sq < ZERO_LENGTH_EPSILON {
        return false;
    }
    distance_to_segment(pointer, a, b) <= tolerance_px
}

/// Whether `pointer` lies within `tolerance_px` screen pixels of the data-space
/// segment `a`-`b`.
pub fn is_near_line(
    pointer: DataPoint,
    a: DataPoint,
    b: DataPoint,
    tolerance_px: f64,
    transform: &ChartTransform,
) -> bool {
    is_near_screen_segment(
        transform.data_to_screen(pointer),
        transform.data_to_screen(a),
        transform.data_to_screen(b),
        tolerance_px,
    )
}

/// Whether `pointer` is inside the data-space triangle or within
/// `tolerance_px` screen pixels of one of its edges.
pub fn is_near_triangle(
    pointer: DataPoint,
    vertices: [DataPoint; 3],
    tolerance_px: f64,
    transform: &ChartTransform,
) -> bool {
    let p = transform.data_to_screen(pointer);
    let [a, b, c] = vertices.map(|v| transform.data_to_screen(v));
    if triangle_is_degenerate(a, b, c) {
        return false;
    }
    point_in_triangle(p, a, b, c)
        || is_near_screen_segment(p, a, b, tolerance_px)
        || is_near_screen_segment(p, b, c, tolerance_px)
        || is_near_screen_segment(p, c, a, tolerance_px)
}

/// Extends the segment `a`-`b` to the edges of `bounds`.
///
/// With `both_directions` false the result starts at `a` and runs through
/// `b` to the boundary (a ray). The returned segment always covers the
/// original one; a zero-length input or a line that misses `bounds` is
/// returned unchanged.
pub fn extend_segment(
    a: ScreenPoint,
    b: ScreenPoint,
    bounds: &ScreenRect,
    both_directions: bool,
) -> (ScreenPoint, ScreenPoint) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    if dx * dx + dy * dy < ZERO_LENGTH_EPSILON {
        return (a, b);
    }

    let Some((x_lo, x_hi)) = slab(a.x, dx, bounds.min_x, bounds.max_x) else {
        return (a, b);
    };
    let Some((y_lo, y_hi)) = slab(a.y, dy, bounds.min_y, bounds.max_y) else {
        return (a, b);
    };
    let t_enter = x_lo.max(y_lo);
    let t_exit = x_hi.min(y_hi);
    if t_enter > t_exit {
        return (a, b);
    }

    let t_start = if both_directions { t_enter.min(0.0) } else { 0.0 };
    let t_end = t_exit.max(1.0);
    let at = |t: f64| ScreenPoint::new(a.x + t * dx, a.y + t * dy);
    (at(t_start), at(t_end))
}

// Parameter interval in which `origin + t * delta` lies within `[lo, hi]`.
fn slab(origin: f64, delta: f64, lo: f64, hi: f64) -> Option<(f64, f64)> {
    if delta.abs() < f64::EPSILON {
        if origin >= lo && origin <= hi {
            Some((f64::NEG_INFINITY, f64::INFINITY))
        } else {
            None
        }
    } else {
        let t1 = (lo - origin) / delta;
        let t2 = (hi - origin) / delta;
        Some((t1.min(t2), t1.max(t2)))
    }
}
