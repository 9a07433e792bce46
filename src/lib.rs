//! # ChartKit
//!
//! Drawing-tool interaction core for price charts.
//!
//! ## Architecture
//!
//! ChartKit is organized as a workspace with multiple crates:
//!
//! 1. **chartkit-core** - Geometry primitives, data/screen transform, errors
//! 2. **chartkit-settings** - Interaction and history configuration
//! 3. **chartkit-drawings** - Annotation registry, drag staging, history, controller
//! 4. **chartkit** - Logging setup and the session replay binary
//!
//! ## Features
//!
//! - **Drawing Tools**: trend lines, rays, extended lines, horizontal and
//!   vertical lines, parallel channels, triangles, Fibonacci retracements
//! - **One Selection**: at most one annotation type holds a selection
//! - **Staged Drags**: edits preview without touching committed geometry
//! - **Undo/Redo**: whole-scene snapshots with a bounded depth

pub mod session;

pub use chartkit_core::{
    AnnotationError, ChartTransform, DataPoint, Error, GeometryError, Result, ScreenPoint,
    ScreenRect,
};
pub use chartkit_drawings::{
    Annotation, AnnotationRegistry, Geometry, GeometryPatch, HistoryManager,
    InteractionController, KeyCommand, PointerEvent, Scene, ShapeKind,
};
pub use chartkit_settings::{Config, ReselectPolicy, SettingsError};
pub use session::{load_session, replay, SessionEvent, SessionReport, SessionScript, SurfaceSpec};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr, leaving stdout for reports
/// - RUST_LOG environment variable support (default `info`)
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
