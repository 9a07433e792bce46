//! Error handling for ChartKit
//!
//! Provides error types for the layers of the drawing core:
//! - Annotation errors (registry lookups, drag staging, shape kinds)
//! - Geometry errors (coordinate transform setup)
//!
//! None of these are fatal to an interaction. Public registry and controller
//! operations log them and degrade to a no-op; the typed variants exist so
//! internal lookups can use `?` and so tests can assert on the cause.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Annotation error type
///
/// Represents failures when addressing annotation collections or items.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnotationError {
    /// The annotation type key has not been registered
    #[error("Annotation type not registered: {type_key}")]
    UnregisteredType {
        /// The type key that was looked up.
        type_key: String,
    },

    /// An item index does not exist in the collection
    #[error("Index {index} out of range for '{type_key}' ({len} items)")]
    IndexOutOfRange {
        /// The collection that was addressed.
        type_key: String,
        /// The requested index.
        index: usize,
        /// The number of items in the collection.
        len: usize,
    },

    /// A drag operation was updated or committed while idle
    #[error("No drag in progress")]
    NoActiveDrag,

    /// The type key does not name a known shape kind
    #[error("Unknown shape kind: {name}")]
    UnknownShapeKind {
        /// The unrecognised name.
        name: String,
    },
}

/// Geometry error type
///
/// Represents invalid coordinate transform configurations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A visible data range has zero or negative width
    #[error("Degenerate {axis} domain: [{min}, {max}]")]
    DegenerateDomain {
        /// The axis name (`x` or `y`).
        axis: &'static str,
        /// Lower bound of the domain.
        min: f64,
        /// Upper bound of the domain.
        max: f64,
    },

    /// The rendering surface has no area or a non-finite size
    #[error("Invalid surface size {width}x{height}")]
    InvalidSurface {
        /// Surface width in pixels.
        width: f64,
        /// Surface height in pixels.
        height: f64,
    },
}

/// Main error type for ChartKit
///
/// A unified error type that can represent any error from the core layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Annotation error
    #[error(transparent)]
    Annotation(#[from] AnnotationError),

    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an unregistered-type error
    pub fn is_unregistered_type(&self) -> bool {
        matches!(
            self,
            Error::Annotation(AnnotationError::UnregisteredType { .. })
        )
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
