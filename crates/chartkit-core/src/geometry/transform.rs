//! Coordinate transformation between data space and screen space.
//!
//! Data space is the chart's price × time plane; screen space is the pixel
//! grid of the rendering surface with (0,0) at the top-left. The transform
//! is defined by the visible data window and the surface size, so panning
//! and zooming are expressed by the host as a new window.

use std::fmt;

use crate::constants::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH};
use crate::error::GeometryError;

use super::point::{DataPoint, ScreenPoint, ScreenRect};

/// Maps between the visible data window and the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTransform {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    width: f64,
    height: f64,
}

impl Default for ChartTransform {
    fn default() -> Self {
        Self::new(
            0.0,
            100.0,
            0.0,
            100.0,
            DEFAULT_SURFACE_WIDTH,
            DEFAULT_SURFACE_HEIGHT,
        )
    }
}

impl ChartTransform {
    /// Creates a transform without validating the window.
    ///
    /// A collapsed window is tolerated (spans fall back to 1.0) so that a host
    /// reporting an empty chart during startup never divides by zero.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64, width: f64, height: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            width,
            height,
        }
    }

    /// Creates a transform, rejecting empty domains and surfaces.
    pub fn try_new(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        width: f64,
        height: f64,
    ) -> Result<Self, GeometryError> {
        if !(x_min.is_finite() && x_max.is_finite()) || x_max <= x_min {
            return Err(GeometryError::DegenerateDomain {
                axis: "x",
                min: x_min,
                max: x_max,
            });
        }
        if !(y_min.is_finite() && y_max.is_finite()) || y_max <= y_min {
            return Err(GeometryError::DegenerateDomain {
                axis: "y",
                min: y_min,
                max: y_max,
            });
        }
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(GeometryError::InvalidSurface { width, height });
        }
        Ok(Self::new(x_min, x_max, y_min, y_max, width, height))
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Sets the surface dimensions (typically called when the chart resizes).
    pub fn set_surface_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Visible time range as `(min, max)`.
    pub fn visible_x_domain(&self) -> (f64, f64) {
        (self.x_min, self.x_max)
    }

    /// Visible price range as `(min, max)`.
    pub fn visible_y_domain(&self) -> (f64, f64) {
        (self.y_min, self.y_max)
    }

    pub fn set_x_domain(&mut self, min: f64, max: f64) {
        self.x_min = min;
        self.x_max = max;
    }

    pub fn set_y_domain(&mut self, min: f64, max: f64) {
        self.y_min = min;
        self.y_max = max;
    }

    /// The whole surface as a rectangle.
    pub fn screen_bounds(&self) -> ScreenRect {
        ScreenRect::new(0.0, 0.0, self.width, self.height)
    }

    fn span_x(&self) -> f64 {
        let span = self.x_max - self.x_min;
        if span.abs() > f64::EPSILON {
            span
        } else {
            1.0
        }
    }

    fn span_y(&self) -> f64 {
        let span = self.y_max - self.y_min;
        if span.abs() > f64::EPSILON {
            span
        } else {
            1.0
        }
    }

    /// Converts data coordinates to screen coordinates.
    ///
    /// ```text
    /// screen_x = (x - x_min) / span_x * width
    /// screen_y = height - (y - y_min) / span_y * height   // Flip Y-axis
    /// ```
    pub fn data_to_screen(&self, p: DataPoint) -> ScreenPoint {
        let sx = (p.x - self.x_min) / self.span_x() * self.width;
        let sy = self.height - (p.y - self.y_min) / self.span_y() * self.height;
        ScreenPoint::new(sx, sy)
    }

    /// Converts screen coordinates to data coordinates.
    ///
    /// The price component is clamped to the visible vertical domain, so a
    /// pointer dragged above or below the chart saturates at the edge instead
    /// of extrapolating. Time is not clamped.
    pub fn screen_to_data(&self, p: ScreenPoint) -> DataPoint {
        let x = self.x_min + p.x / self.width_or_one() * self.span_x();
        let y = self.y_min + (self.height - p.y) / self.height_or_one() * self.span_y();
        DataPoint::new(x, self.clamp_y(y))
    }

    /// Clamps a price to the visible vertical domain.
    pub fn clamp_y(&self, y: f64) -> f64 {
        let (lo, hi) = if self.y_min <= self.y_max {
            (self.y_min, self.y_max)
        } else {
            (self.y_max, self.y_min)
        };
        y.clamp(lo, hi)
    }

    /// Screen distance between two data points.
    pub fn screen_distance(&self, a: DataPoint, b: DataPoint) -> f64 {
        self.data_to_screen(a).distance_to(&self.data_to_screen(b))
    }

    fn width_or_one(&self) -> f64 {
        if self.width.abs() > f64::EPSILON {
            self.width
        } else {
            1.0
        }
    }

    fn height_or_one(&self) -> f64 {
        if self.height.abs() > f64::EPSILON {
            self.height
        } else {
            1.0
        }
    }
}

impl fmt::Display for ChartTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X: [{:.2}, {:.2}] | Y: [{:.2}, {:.2}] | Surface: {:.0}x{:.0}",
            self.x_min, self.x_max, self.y_min, self.y_max, self.width, self.height
        )
    }
}
