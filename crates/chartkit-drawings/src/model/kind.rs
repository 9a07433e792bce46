//! Shape kinds and their draw rules.
//!
//! Each annotation type key maps to one row of [`SHAPE_KINDS`]: how many
//! points the draw gesture collects and which constraint shapes the
//! second point. Building a geometry from collected points and constraining
//! handle drags both go through this table.

use std::fmt;
use std::str::FromStr;

use chartkit_core::error::AnnotationError;
use chartkit_core::geometry::DataPoint;
use serde::{Deserialize, Serialize};

use super::geometry::{Geometry, GeometryPatch, LineExtent};

/// Endpoint constraint applied to the second point of a two-point shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Free,
    /// The second point keeps the first point's price.
    LockY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[serde(rename = "trendline")]
    TrendLine,
    Ray,
    ExtendedLine,
    HorizontalRay,
    HorizontalLine,
    VerticalLine,
    ParallelChannel,
    Triangle,
    FibonacciRetracement,
}

/// One row of the shape-kind table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSpec {
    pub kind: ShapeKind,
    pub type_key: &'static str,
    pub arity: usize,
    pub constraint: Constraint,
}

pub const SHAPE_KINDS: [KindSpec; 9] = [
    KindSpec {
        kind: ShapeKind::TrendLine,
        type_key: "trendline",
        arity: 2,
        constraint: Constraint::Free,
    },
    KindSpec {
        kind: ShapeKind::Ray,
        type_key: "ray",
        arity: 2,
        constraint: Constraint::Free,
    },
    KindSpec {
        kind: ShapeKind::ExtendedLine,
        type_key: "extended_line",
        arity: 2,
        constraint: Constraint::Free,
    },
    KindSpec {
        kind: ShapeKind::HorizontalRay,
        type_key: "horizontal_ray",
        arity: 2,
        constraint: Constraint::LockY,
    },
    KindSpec {
        kind: ShapeKind::HorizontalLine,
        type_key: "horizontal_line",
        arity: 1,
        constraint: Constraint::Free,
    },
    KindSpec {
        kind: ShapeKind::VerticalLine,
        type_key: "vertical_line",
        arity: 1,
        constraint: Constraint::Free,
    },
    KindSpec {
        kind: ShapeKind::ParallelChannel,
        type_key: "parallel_channel",
        arity: 3,
        constraint: Constraint::Free,
    },
    KindSpec {
        kind: ShapeKind::Triangle,
        type_key: "triangle",
        arity: 3,
        constraint: Constraint::Free,
    },
    KindSpec {
        kind: ShapeKind::FibonacciRetracement,
        type_key: "fibonacci_retracement",
        arity: 2,
        constraint: Constraint::Free,
    },
];

impl ShapeKind {
    pub fn all() -> impl Iterator<Item = ShapeKind> {
        SHAPE_KINDS.iter().map(|spec| spec.kind)
    }

    pub fn spec(&self) -> &'static KindSpec {
        // Rows are declared in variant order.
        &SHAPE_KINDS[*self as usize]
    }

    pub fn type_key(&self) -> &'static str {
        self.spec().type_key
    }

    /// Number of points the draw gesture collects.
    pub fn arity(&self) -> usize {
        self.spec().arity
    }

    pub fn constraint(&self) -> Constraint {
        self.spec().constraint
    }

    pub fn from_type_key(type_key: &str) -> Option<ShapeKind> {
        SHAPE_KINDS
            .iter()
            .find(|spec| spec.type_key == type_key)
            .map(|spec| spec.kind)
    }

    /// Constrains `end` relative to `start`.
    pub fn apply_constraint(&self, start: DataPoint, end: DataPoint) -> DataPoint {
        match self.constraint() {
            Constraint::Free => end,
            Constraint::LockY => DataPoint::new(end.x, start.y),
        }
    }

    /// Builds the finished geometry from the draw points.
    ///
    /// Returns `None` until at least [`arity`](Self::arity) points are given;
    /// extra points are ignored.
    pub fn build(&self, points: &[DataPoint]) -> Option<Geometry> {
        if points.len() < self.arity() {
            return None;
        }
        let first = points[0];
        let line = |extent| {
            let end = self.apply_constraint(first, points[1]);
            Geometry::Line {
                start: first,
                end,
                extent,
            }
        };
        let geometry = match self {
            ShapeKind::TrendLine => line(LineExtent::Bounded),
            ShapeKind::Ray | ShapeKind::HorizontalRay => line(LineExtent::Ray),
            ShapeKind::ExtendedLine => line(LineExtent::Infinite),
            ShapeKind::HorizontalLine => Geometry::HorizontalLine { y: first.y },
            ShapeKind::VerticalLine => Geometry::VerticalLine { x: first.x },
            ShapeKind::ParallelChannel => {
                let end = points[1];
                Geometry::Channel {
                    start: first,
                    end,
                    offset_y: channel_offset(first, end, points[2]),
                }
            }
            ShapeKind::Triangle => Geometry::Triangle {
                p1: first,
                p2: points[1],
                p3: points[2],
            },
            ShapeKind::FibonacciRetracement => Geometry::FibonacciRetracement {
                start: first,
                end: points[1],
            },
        };
        Some(geometry)
    }

    /// In-progress geometry while drawing, with `cursor` as the next point.
    ///
    /// A three-point shape with only its first point placed previews as a
    /// bounded line to the cursor.
    pub fn preview(&self, placed: &[DataPoint], cursor: DataPoint) -> Option<Geometry> {
        let mut points: Vec<DataPoint> = placed.iter().copied().take(self.arity()).collect();
        if points.len() < self.arity() {
            points.push(cursor);
        }
        if let Some(geometry) = self.build(&points) {
            return Some(geometry);
        }
        match points.as_slice() {
            [start, end] => Some(Geometry::Line {
                start: *start,
                end: *end,
                extent: LineExtent::Bounded,
            }),
            _ => None,
        }
    }

    /// Handle patch with this kind's constraint applied.
    ///
    /// A horizontal ray keeps both anchors on one price: moving the start
    /// carries the end's price with it, moving the end only changes time.
    pub fn handle_patch(
        &self,
        geometry: &Geometry,
        handle: usize,
        to: DataPoint,
    ) -> Option<GeometryPatch> {
        let mut patch = geometry.handle_patch(handle, to)?;
        if self.constraint() == Constraint::LockY {
            if let Geometry::Line { start, .. } = geometry {
                match handle {
                    0 => patch.y2 = Some(to.y),
                    1 => patch.y2 = Some(start.y),
                    _ => {}
                }
            }
        }
        Some(patch)
    }
}

/// Vertical distance from the base line to `p` at `p`'s time.
fn channel_offset(start: DataPoint, end: DataPoint, p: DataPoint) -> f64 {
    let dx = end.x - start.x;
    if dx.abs() < f64::EPSILON {
        return p.y - start.y;
    }
    let t = (p.x - start.x) / dx;
    let base_y = start.y + t * (end.y - start.y);
    p.y - base_y
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_key())
    }
}

impl FromStr for ShapeKind {
    type Err = AnnotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::from_type_key(s).ok_or_else(|| AnnotationError::UnknownShapeKind {
            name: s.to_string(),
        })
    }
}
