//! Staged geometry edits for an in-progress drag.
//!
//! While a drag is staging, the committed collection is left alone and the
//! renderer draws [`DragOverride::resolve`] instead. Releasing the pointer
//! folds the stage into a new item list with [`DragOverride::commit`].

use chartkit_core::error::AnnotationError;
use tracing::{debug, warn};

use crate::model::{Annotation, Geometry, GeometryPatch};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Stage {
    index: usize,
    patch: GeometryPatch,
}

/// Observable state of the drag machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Staging { index: usize },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragOverride {
    stage: Option<Stage>,
}

impl DragOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        match self.stage {
            Some(stage) => DragState::Staging { index: stage.index },
            None => DragState::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        self.stage.is_some()
    }

    /// Index of the item being dragged.
    pub fn index(&self) -> Option<usize> {
        self.stage.map(|s| s.index)
    }

    pub fn patch(&self) -> Option<&GeometryPatch> {
        self.stage.as_ref().map(|s| &s.patch)
    }

    /// Starts staging edits for `index`, discarding any earlier stage.
    pub fn begin(&mut self, index: usize, patch: GeometryPatch) {
        if let Some(prev) = self.stage {
            if prev.index != index {
                debug!(
                    previous = prev.index,
                    index, "Discarding stale drag stage"
                );
            }
        }
        self.stage = Some(Stage { index, patch });
    }

    /// Replaces the staged patch. The previous patch is not merged in.
    pub fn update(&mut self, patch: GeometryPatch) {
        match self.stage.as_mut() {
            Some(stage) => stage.patch = patch,
            None => warn!(err = %AnnotationError::NoActiveDrag, "drag update ignored"),
        }
    }

    /// Geometry to draw for the item at `index`.
    ///
    /// Returns `original` unchanged while idle or when another index is staged.
    pub fn resolve(&self, index: usize, original: &Geometry) -> Geometry {
        match self.stage {
            Some(stage) if stage.index == index => original.apply_patch(&stage.patch),
            _ => *original,
        }
    }

    /// `items` with the staged edit applied, for rendering a frame.
    pub fn resolve_items(&self, items: &[Annotation]) -> Vec<Annotation> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| item.with_geometry(self.resolve(i, &item.geometry)))
            .collect()
    }

    /// Ends the drag and returns the committed item list.
    ///
    /// The dragged item carries the resolved geometry and is the only item
    /// marked selected. Returns `None` while idle or when the staged index no
    /// longer exists; the stage is cleared either way.
    pub fn commit(&mut self, items: &[Annotation]) -> Option<Vec<Annotation>> {
        let Some(stage) = self.stage.take() else {
            warn!(err = %AnnotationError::NoActiveDrag, "drag commit ignored");
            return None;
        };
        if stage.index >= items.len() {
            warn!(
                index = stage.index,
                len = items.len(),
                "drag commit dropped, staged index out of range"
            );
            return None;
        }

        let committed = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if i == stage.index {
                    let mut item = item.with_geometry(item.geometry.apply_patch(&stage.patch));
                    item.selected = true;
                    item
                } else {
                    let mut item = item.clone();
                    item.selected = false;
                    item
                }
            })
            .collect();
        Some(committed)
    }

    /// Drops the stage without producing a commit.
    pub fn cancel(&mut self) -> bool {
        self.stage.take().is_some()
    }
}
