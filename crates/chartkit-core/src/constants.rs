//! Shared numeric constants for hit testing and interaction defaults.

/// Denominator threshold below which a triangle is treated as degenerate.
pub const DEGENERATE_EPSILON: f64 = 1e-10;

/// Squared screen length below which a segment counts as zero-length.
pub const ZERO_LENGTH_EPSILON: f64 = 1e-12;

/// Default pointer proximity tolerance, in screen pixels.
pub const DEFAULT_HIT_TOLERANCE_PX: f64 = 6.0;

/// Default pointer travel before a press turns into a drag, in screen pixels.
pub const DEFAULT_DRAG_THRESHOLD_PX: f64 = 3.0;

/// Default delay before a lost hover is cleared, in milliseconds.
pub const DEFAULT_HOVER_GRACE_MS: u64 = 150;

/// Default number of retained history snapshots.
pub const DEFAULT_HISTORY_DEPTH: usize = 50;

/// Default rendering surface size used before the host reports one.
pub const DEFAULT_SURFACE_WIDTH: f64 = 1200.0;
pub const DEFAULT_SURFACE_HEIGHT: f64 = 800.0;
