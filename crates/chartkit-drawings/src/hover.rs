//! Hovered-component tracking with a grace period.
//!
//! Losing the hover does not clear it immediately: the clear is scheduled
//! `grace_ms` later so the pointer can travel from a shape to a floating
//! control next to it (which calls [`HoverTracker::hold`]) without the
//! control disappearing underneath it. Time comes from event timestamps.

use chartkit_core::constants::DEFAULT_HOVER_GRACE_MS;
use chartkit_core::geometry::ScreenRect;
use serde::Serialize;
use tracing::trace;

/// Lookup key for the annotation under the pointer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoveredComponent {
    pub type_key: String,
    pub index: usize,
    pub bounds: ScreenRect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoverTracker {
    current: Option<HoveredComponent>,
    clear_at: Option<u64>,
    grace_ms: u64,
}

impl Default for HoverTracker {
    fn default() -> Self {
        Self::new(DEFAULT_HOVER_GRACE_MS)
    }
}

impl HoverTracker {
    pub fn new(grace_ms: u64) -> Self {
        Self {
            current: None,
            clear_at: None,
            grace_ms,
        }
    }

    pub fn current(&self) -> Option<&HoveredComponent> {
        self.current.as_ref()
    }

    /// True while a clear is scheduled but has not yet happened.
    pub fn is_clearing(&self) -> bool {
        self.clear_at.is_some()
    }

    /// Reports the latest hit-test result at time `now`.
    pub fn update(&mut self, hit: Option<HoveredComponent>, now: u64) {
        match hit {
            Some(component) => {
                if self.current.as_ref() != Some(&component) {
                    trace!(type_key = %component.type_key, index = component.index, "Hover");
                }
                self.current = Some(component);
                self.clear_at = None;
            }
            None => {
                if self.current.is_some() && self.clear_at.is_none() {
                    self.clear_at = Some(now.saturating_add(self.grace_ms));
                }
                self.tick(now);
            }
        }
    }

    /// Keeps the current component alive, cancelling a scheduled clear.
    pub fn hold(&mut self, now: u64) {
        if self.current.is_some() {
            trace!(now, "Hover held");
            self.clear_at = None;
        }
    }

    /// Performs a scheduled clear once its deadline has passed.
    pub fn tick(&mut self, now: u64) {
        if self.clear_at.is_some_and(|deadline| now >= deadline) {
            self.current = None;
            self.clear_at = None;
        }
    }

    /// Clears immediately.
    pub fn clear(&mut self) {
        self.current = None;
        self.clear_at = None;
    }
}
