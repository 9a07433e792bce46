//! # ChartKit Core
//!
//! Core types and utilities for ChartKit.
//! Provides the geometry primitives used for hit testing, the data/screen
//! coordinate transform, the shared error taxonomy, and ownership aliases
//! for the single-threaded interaction layer.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod types;

pub use error::{AnnotationError, Error, GeometryError, Result};

pub use geometry::{
    distance_to_segment, extend_segment, is_near_line, is_near_screen_segment, is_near_triangle,
    point_in_triangle, ChartTransform, DataPoint, ScreenPoint, ScreenRect,
};

// Re-export type aliases for convenience
pub use types::{shared, Shared};
