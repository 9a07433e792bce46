use chartkit_core::geometry::{
    extend_segment, is_near_line, is_near_screen_segment, is_near_triangle, point_in_triangle,
    ChartTransform, DataPoint, ScreenPoint, ScreenRect,
};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

/// Retracement ratios drawn between the two anchors of a Fibonacci tool.
pub const FIB_RATIOS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

/// Control points of a geometry, in data space.
pub type ControlPoints = SmallVec<[DataPoint; 3]>;

/// How far a two-point line extends past its anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineExtent {
    /// Drawn between the anchors only
    #[default]
    Bounded,
    /// Starts at `start` and runs through `end` to the chart edge
    Ray,
    /// Runs through both anchors to both chart edges
    Infinite,
}

/// The data-space shape of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    Line {
        start: DataPoint,
        end: DataPoint,
        #[serde(default)]
        extent: LineExtent,
    },
    HorizontalLine {
        y: f64,
    },
    VerticalLine {
        x: f64,
    },
    /// Two parallel lines: the base `start`-`end` and a copy shifted by `offset_y`.
    Channel {
        start: DataPoint,
        end: DataPoint,
        offset_y: f64,
    },
    Triangle {
        p1: DataPoint,
        p2: DataPoint,
        p3: DataPoint,
    },
    FibonacciRetracement {
        start: DataPoint,
        end: DataPoint,
    },
}

/// A partial geometry edit keyed by coordinate slot.
///
/// Lines, channels and Fibonacci tools map `start` to `(x1, y1)` and `end`
/// to `(x2, y2)`. Triangles map `p1..p3` to `(x1, y1)..(x3, y3)`. A
/// horizontal line reads `y1`, a vertical line reads `x1`. Keys that are
/// absent leave the original value untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x3: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y3: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f64>,
}

impl GeometryPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn point(slot_x: &mut Option<f64>, slot_y: &mut Option<f64>, p: DataPoint) {
        *slot_x = Some(p.x);
        *slot_y = Some(p.y);
    }
}

fn patched(p: DataPoint, x: Option<f64>, y: Option<f64>) -> DataPoint {
    DataPoint::new(x.unwrap_or(p.x), y.unwrap_or(p.y))
}

fn midpoint(a: DataPoint, b: DataPoint) -> DataPoint {
    DataPoint::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

impl Geometry {
    /// Returns a copy with every key present in `patch` applied.
    pub fn apply_patch(&self, patch: &GeometryPatch) -> Geometry {
        let p = patch;
        match *self {
            Geometry::Line { start, end, extent } => Geometry::Line {
                start: patched(start, p.x1, p.y1),
                end: patched(end, p.x2, p.y2),
                extent,
            },
            Geometry::HorizontalLine { y } => Geometry::HorizontalLine {
                y: p.y1.unwrap_or(y),
            },
            Geometry::VerticalLine { x } => Geometry::VerticalLine {
                x: p.x1.unwrap_or(x),
            },
            Geometry::Channel {
                start,
                end,
                offset_y,
            } => Geometry::Channel {
                start: patched(start, p.x1, p.y1),
                end: patched(end, p.x2, p.y2),
                offset_y: p.offset_y.unwrap_or(offset_y),
            },
            Geometry::Triangle { p1, p2, p3 } => Geometry::Triangle {
                p1: patched(p1, p.x1, p.y1),
                p2: patched(p2, p.x2, p.y2),
                p3: patched(p3, p.x3, p.y3),
            },
            Geometry::FibonacciRetracement { start, end } => Geometry::FibonacciRetracement {
                start: patched(start, p.x1, p.y1),
                end: patched(end, p.x2, p.y2),
            },
        }
    }

    /// Every coordinate slot this geometry uses, as a patch.
    pub fn to_patch(&self) -> GeometryPatch {
        let mut patch = GeometryPatch::default();
        match *self {
            Geometry::Line { start, end, .. } | Geometry::FibonacciRetracement { start, end } => {
                GeometryPatch::point(&mut patch.x1, &mut patch.y1, start);
                GeometryPatch::point(&mut patch.x2, &mut patch.y2, end);
            }
            Geometry::HorizontalLine { y } => patch.y1 = Some(y),
            Geometry::VerticalLine { x } => patch.x1 = Some(x),
            Geometry::Channel {
                start,
                end,
                offset_y,
            } => {
                GeometryPatch::point(&mut patch.x1, &mut patch.y1, start);
                GeometryPatch::point(&mut patch.x2, &mut patch.y2, end);
                patch.offset_y = Some(offset_y);
            }
            Geometry::Triangle { p1, p2, p3 } => {
                GeometryPatch::point(&mut patch.x1, &mut patch.y1, p1);
                GeometryPatch::point(&mut patch.x2, &mut patch.y2, p2);
                GeometryPatch::point(&mut patch.x3, &mut patch.y3, p3);
            }
        }
        patch
    }

    /// Drag handles in data space.
    ///
    /// Full-span lines put their single handle at the middle of the visible
    /// window. A channel's third handle sits on the offset line's midpoint.
    pub fn control_points(&self, transform: &ChartTransform) -> ControlPoints {
        match *self {
            Geometry::Line { start, end, .. } | Geometry::FibonacciRetracement { start, end } => {
                smallvec![start, end]
            }
            Geometry::HorizontalLine { y } => {
                let (x_min, x_max) = transform.visible_x_domain();
                smallvec![DataPoint::new((x_min + x_max) / 2.0, y)]
            }
            Geometry::VerticalLine { x } => {
                let (y_min, y_max) = transform.visible_y_domain();
                smallvec![DataPoint::new(x, (y_min + y_max) / 2.0)]
            }
            Geometry::Channel {
                start,
                end,
                offset_y,
            } => {
                let mid = midpoint(start, end);
                smallvec![start, end, mid.offset(0.0, offset_y)]
            }
            Geometry::Triangle { p1, p2, p3 } => smallvec![p1, p2, p3],
        }
    }

    /// Patch that moves the whole shape by a data-space delta.
    pub fn translate(&self, dx: f64, dy: f64) -> GeometryPatch {
        let mut patch = self.to_patch();
        let shift = |slot: &mut Option<f64>, d: f64| {
            if let Some(v) = slot {
                *v += d;
            }
        };
        shift(&mut patch.x1, dx);
        shift(&mut patch.x2, dx);
        shift(&mut patch.x3, dx);
        shift(&mut patch.y1, dy);
        shift(&mut patch.y2, dy);
        shift(&mut patch.y3, dy);
        // The offset is relative to the base line, so it travels with it.
        patch.offset_y = None;
        patch
    }

    /// Patch that moves one control point to `to`, or `None` for an unknown handle.
    pub fn handle_patch(&self, handle: usize, to: DataPoint) -> Option<GeometryPatch> {
        let mut patch = GeometryPatch::default();
        match (*self, handle) {
            (Geometry::HorizontalLine { .. }, 0) => patch.y1 = Some(to.y),
            (Geometry::VerticalLine { .. }, 0) => patch.x1 = Some(to.x),
            (Geometry::Channel { start, end, .. }, 2) => {
                patch.offset_y = Some(to.y - midpoint(start, end).y);
            }
            (
                Geometry::Line { .. }
                | Geometry::FibonacciRetracement { .. }
                | Geometry::Channel { .. }
                | Geometry::Triangle { .. },
                0,
            ) => GeometryPatch::point(&mut patch.x1, &mut patch.y1, to),
            (
                Geometry::Line { .. }
                | Geometry::FibonacciRetracement { .. }
                | Geometry::Channel { .. }
                | Geometry::Triangle { .. },
                1,
            ) => GeometryPatch::point(&mut patch.x2, &mut patch.y2, to),
            (Geometry::Triangle { .. }, 2) => {
                GeometryPatch::point(&mut patch.x3, &mut patch.y3, to)
            }
            _ => return None,
        }
        Some(patch)
    }

    /// Price of each retracement level, paired with its ratio.
    ///
    /// Ratio 0 sits at `end`, ratio 1 at `start`. Non-Fibonacci geometries
    /// have no levels.
    pub fn fib_levels(&self) -> Vec<(f64, f64)> {
        match *self {
            Geometry::FibonacciRetracement { start, end } => FIB_RATIOS
                .iter()
                .map(|&ratio| (ratio, end.y - ratio * (end.y - start.y)))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Whether `pointer` is within `tolerance_px` screen pixels of the shape.
    pub fn hit_test(
        &self,
        pointer: DataPoint,
        tolerance_px: f64,
        transform: &ChartTransform,
    ) -> bool {
        match *self {
            Geometry::Line { start, end, extent } => match extent {
                LineExtent::Bounded => is_near_line(pointer, start, end, tolerance_px, transform),
                LineExtent::Ray | LineExtent::Infinite => {
                    let (a, b) = self.extended_screen_segment(start, end, extent, transform);
                    is_near_screen_segment(transform.data_to_screen(pointer), a, b, tolerance_px)
                }
            },
            Geometry::HorizontalLine { y } => {
                let (x_min, x_max) = transform.visible_x_domain();
                is_near_line(
                    pointer,
                    DataPoint::new(x_min, y),
                    DataPoint::new(x_max, y),
                    tolerance_px,
                    transform,
                )
            }
            Geometry::VerticalLine { x } => {
                let (y_min, y_max) = transform.visible_y_domain();
                is_near_line(
                    pointer,
                    DataPoint::new(x, y_min),
                    DataPoint::new(x, y_max),
                    tolerance_px,
                    transform,
                )
            }
            Geometry::Channel {
                start,
                end,
                offset_y,
            } => {
                let top_start = start.offset(0.0, offset_y);
                let top_end = end.offset(0.0, offset_y);
                if is_near_line(pointer, start, end, tolerance_px, transform)
                    || is_near_line(pointer, top_start, top_end, tolerance_px, transform)
                {
                    return true;
                }
                let p = transform.data_to_screen(pointer);
                let [a, b, c, d] =
                    [start, end, top_end, top_start].map(|v| transform.data_to_screen(v));
                point_in_triangle(p, a, b, c) || point_in_triangle(p, a, c, d)
            }
            Geometry::Triangle { p1, p2, p3 } => {
                is_near_triangle(pointer, [p1, p2, p3], tolerance_px, transform)
            }
            Geometry::FibonacciRetracement { start, end } => {
                if is_near_line(pointer, start, end, tolerance_px, transform) {
                    return true;
                }
                let left = start.x.min(end.x);
                let right = start.x.max(end.x);
                self.fib_levels().into_iter().any(|(_, price)| {
                    is_near_line(
                        pointer,
                        DataPoint::new(left, price),
                        DataPoint::new(right, price),
                        tolerance_px,
                        transform,
                    )
                })
            }
        }
    }

    fn extended_screen_segment(
        &self,
        start: DataPoint,
        end: DataPoint,
        extent: LineExtent,
        transform: &ChartTransform,
    ) -> (ScreenPoint, ScreenPoint) {
        let a = transform.data_to_screen(start);
        let b = transform.data_to_screen(end);
        match extent {
            LineExtent::Bounded => (a, b),
            LineExtent::Ray => extend_segment(a, b, &transform.screen_bounds(), false),
            LineExtent::Infinite => extend_segment(a, b, &transform.screen_bounds(), true),
        }
    }

    /// Screen-space bounding box, as reported for the hovered component.
    pub fn screen_bounds(&self, transform: &ChartTransform) -> Option<ScreenRect> {
        let points: SmallVec<[ScreenPoint; 4]> = match *self {
            Geometry::Line { start, end, extent } => {
                let (a, b) = self.extended_screen_segment(start, end, extent, transform);
                smallvec![a, b]
            }
            Geometry::HorizontalLine { y } => {
                let sy = transform.data_to_screen(DataPoint::new(0.0, y)).y;
                smallvec![
                    ScreenPoint::new(0.0, sy),
                    ScreenPoint::new(transform.width(), sy)
                ]
            }
            Geometry::VerticalLine { x } => {
                let sx = transform.data_to_screen(DataPoint::new(x, 0.0)).x;
                smallvec![
                    ScreenPoint::new(sx, 0.0),
                    ScreenPoint::new(sx, transform.height())
                ]
            }
            Geometry::Channel {
                start,
                end,
                offset_y,
            } => [start, end, end.offset(0.0, offset_y), start.offset(0.0, offset_y)]
                .into_iter()
                .map(|p| transform.data_to_screen(p))
                .collect(),
            Geometry::Triangle { p1, p2, p3 } => [p1, p2, p3]
                .into_iter()
                .map(|p| transform.data_to_screen(p))
                .collect(),
            Geometry::FibonacciRetracement { start, end } => {
                smallvec![transform.data_to_screen(start), transform.data_to_screen(end)]
            }
        };
        ScreenRect::from_points(points)
    }
}
