//! Annotation registry.
//!
//! Every annotation type registers one collection under its type key. The
//! registry then implements selection, deletion, draw completion and
//! history restore once for all of them, through the
//! [`AnnotationCollection`] capability set instead of per-type code.
//!
//! # Selection model
//!
//! - At most one collection holds a selection at a time: selecting in one
//!   collection clears every other collection.
//! - Each item's `selected` flag mirrors its collection's selection set after
//!   every registry mutation.
//!
//! # Failure semantics
//!
//! Addressing an unregistered type key logs a warning and does nothing. UI
//! call sites may run before registration finishes, so none of these paths
//! return errors.

use std::collections::BTreeMap;

use chartkit_core::error::AnnotationError;
use chartkit_core::geometry::DataPoint;
use tracing::{debug, warn};

use crate::model::{Annotation, ShapeKind};
use crate::scene::Scene;

/// The capability set a collection exposes to the registry.
pub trait AnnotationCollection {
    /// Items in creation (z) order.
    fn items(&self) -> &[Annotation];
    /// Selected item indices.
    fn selection(&self) -> &[usize];
    fn replace_items(&mut self, items: Vec<Annotation>);
    fn replace_selection(&mut self, selection: Vec<usize>);
}

/// In-memory collection backed by two vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VecCollection {
    items: Vec<Annotation>,
    selection: Vec<usize>,
}

impl VecCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<Annotation>) -> Self {
        let selection = selected_indices(&items);
        Self { items, selection }
    }
}

impl AnnotationCollection for VecCollection {
    fn items(&self) -> &[Annotation] {
        &self.items
    }

    fn selection(&self) -> &[usize] {
        &self.selection
    }

    fn replace_items(&mut self, items: Vec<Annotation>) {
        self.items = items;
    }

    fn replace_selection(&mut self, selection: Vec<usize>) {
        self.selection = selection;
    }
}

/// One entry of a `select` call's hit list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionHit {
    /// Explicit item index, when the caller already knows it.
    pub index: Option<usize>,
    /// Pointer position of the hit, for matchers that resolve by geometry.
    pub point: Option<DataPoint>,
}

impl SelectionHit {
    pub fn index(index: usize) -> Self {
        Self {
            index: Some(index),
            point: None,
        }
    }

    pub fn at(point: DataPoint) -> Self {
        Self {
            index: None,
            point: Some(point),
        }
    }

    /// A hit with no locating information; resolves to the newest item.
    pub fn latest() -> Self {
        Self::default()
    }
}

/// Type-specific resolver from a hit to an item index.
pub type HitMatcher = Box<dyn Fn(&SelectionHit, &[Annotation]) -> Option<usize>>;

/// Result of [`AnnotationRegistry::delete`].
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOutcome {
    pub deletion_occurred: bool,
    /// The updated scene, present only when something was deleted.
    pub scene: Option<Scene>,
}

struct Entry {
    type_key: String,
    collection: Box<dyn AnnotationCollection>,
    matcher: Option<HitMatcher>,
}

impl Entry {
    /// Sets the selection and brings item flags in line with it.
    fn set_selection(&mut self, selection: Vec<usize>) {
        let items: Vec<Annotation> = self
            .collection
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let mut item = item.clone();
                item.selected = selection.contains(&i);
                item
            })
            .collect();
        self.collection.replace_items(items);
        self.collection.replace_selection(selection);
    }

    /// Selected indices: the selection set, or the flagged items when the
    /// set is empty.
    fn selected(&self) -> Vec<usize> {
        match self.collection.selection() {
            [] => selected_indices(self.collection.items()),
            selection => selection.to_vec(),
        }
    }

    fn has_selection(&self) -> bool {
        !self.selected().is_empty()
    }
}

fn selected_indices(items: &[Annotation]) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.selected)
        .map(|(i, _)| i)
        .collect()
}

/// Table of annotation collections keyed by type, in registration order.
#[derive(Default)]
pub struct AnnotationRegistry {
    entries: Vec<Entry>,
}

impl std::fmt::Debug for AnnotationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationRegistry")
            .field("types", &self.type_keys().collect::<Vec<_>>())
            .field("selections", &self.selections())
            .finish()
    }
}

impl AnnotationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with an empty in-memory collection for every shape kind.
    pub fn with_shape_kinds() -> Self {
        let mut registry = Self::new();
        for kind in ShapeKind::all() {
            registry.register(kind.type_key(), VecCollection::new());
        }
        registry
    }

    /// Registers or replaces the collection for `type_key`.
    ///
    /// Re-registering keeps the original registration position and drops
    /// any matcher attached earlier.
    pub fn register(&mut self, type_key: &str, collection: impl AnnotationCollection + 'static) {
        self.upsert(type_key, Box::new(collection), None);
    }

    /// Registers a collection together with a type-specific hit matcher.
    pub fn register_with_matcher(
        &mut self,
        type_key: &str,
        collection: impl AnnotationCollection + 'static,
        matcher: HitMatcher,
    ) {
        self.upsert(type_key, Box::new(collection), Some(matcher));
    }

    fn upsert(
        &mut self,
        type_key: &str,
        collection: Box<dyn AnnotationCollection>,
        matcher: Option<HitMatcher>,
    ) {
        match self.entries.iter_mut().find(|e| e.type_key == type_key) {
            Some(entry) => {
                debug!(type_key, "Re-registering annotation collection");
                entry.collection = collection;
                entry.matcher = matcher;
            }
            None => {
                debug!(type_key, "Registering annotation collection");
                self.entries.push(Entry {
                    type_key: type_key.to_string(),
                    collection,
                    matcher,
                });
            }
        }
    }

    pub fn is_registered(&self, type_key: &str) -> bool {
        self.entries.iter().any(|e| e.type_key == type_key)
    }

    /// Registered type keys in registration order.
    pub fn type_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.type_key.as_str())
    }

    /// Every collection's items, in registration order.
    pub fn collections(&self) -> impl DoubleEndedIterator<Item = (&str, &[Annotation])> {
        self.entries
            .iter()
            .map(|e| (e.type_key.as_str(), e.collection.items()))
    }

    pub fn items(&self, type_key: &str) -> Option<&[Annotation]> {
        self.entry(type_key).ok().map(|e| e.collection.items())
    }

    /// Selected indices of one collection; empty for an unregistered type.
    pub fn selection(&self, type_key: &str) -> &[usize] {
        self.entry(type_key)
            .map(|e| e.collection.selection())
            .unwrap_or(&[])
    }

    /// The first selected item across all collections, in registration order.
    pub fn selected(&self) -> Option<(&str, usize)> {
        self.entries.iter().find_map(|e| {
            e.selected()
                .first()
                .map(|&i| (e.type_key.as_str(), i))
        })
    }

    fn entry(&self, type_key: &str) -> Result<&Entry, AnnotationError> {
        self.entries
            .iter()
            .find(|e| e.type_key == type_key)
            .ok_or_else(|| AnnotationError::UnregisteredType {
                type_key: type_key.to_string(),
            })
    }

    fn entry_mut(&mut self, type_key: &str) -> Result<&mut Entry, AnnotationError> {
        self.entries
            .iter_mut()
            .find(|e| e.type_key == type_key)
            .ok_or_else(|| AnnotationError::UnregisteredType {
                type_key: type_key.to_string(),
            })
    }

    /// Selects the items named by `hits` in `type_key` and clears every other
    /// collection.
    ///
    /// Each hit resolves through the collection's matcher, then its explicit
    /// index, then the newest item. Hits are resolved against `scene` when it
    /// carries this type, otherwise against the live collection. Returns the
    /// resolved indices; an empty hit list is a no-op.
    pub fn select(&mut self, type_key: &str, hits: &[SelectionHit], scene: &Scene) -> Vec<usize> {
        let entry = match self.entry_mut(type_key) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(%err, "select ignored");
                return Vec::new();
            }
        };
        if hits.is_empty() {
            return Vec::new();
        }

        let items = if scene.contains(type_key) {
            scene.get(type_key)
        } else {
            entry.collection.items()
        };
        let len = items.len().min(entry.collection.items().len());

        let mut resolved = Vec::with_capacity(hits.len());
        for hit in hits {
            let index = entry
                .matcher
                .as_ref()
                .and_then(|matcher| matcher(hit, items))
                .or(hit.index)
                .or_else(|| len.checked_sub(1));
            match index {
                Some(i) if i < len => {
                    if !resolved.contains(&i) {
                        resolved.push(i);
                    }
                }
                Some(i) => {
                    let err = AnnotationError::IndexOutOfRange {
                        type_key: type_key.to_string(),
                        index: i,
                        len,
                    };
                    warn!(%err, "select hit skipped");
                }
                None => debug!(type_key, "select hit did not resolve to an item"),
            }
        }
        if resolved.is_empty() {
            return resolved;
        }

        entry.set_selection(resolved.clone());
        self.deselect_others(type_key);
        resolved
    }

    /// Clears the selection of every collection except `type_key`.
    pub fn deselect_others(&mut self, type_key: &str) {
        if let Err(err) = self.entry(type_key) {
            warn!(%err, "deselect_others ignored");
            return;
        }
        for entry in self.entries.iter_mut() {
            if entry.type_key != type_key && entry.has_selection() {
                entry.set_selection(Vec::new());
            }
        }
    }

    /// Clears the selection of every collection.
    pub fn deselect_all(&mut self) {
        for entry in self.entries.iter_mut() {
            if entry.has_selection() {
                entry.set_selection(Vec::new());
            }
        }
    }

    /// Deletes the selected items of the first collection that has a selection.
    ///
    /// Only that one collection changes; the returned scene is `scene` with
    /// its items replaced.
    pub fn delete(&mut self, scene: &Scene) -> DeleteOutcome {
        let Some(entry) = self.entries.iter_mut().find(|e| e.has_selection()) else {
            return DeleteOutcome {
                deletion_occurred: false,
                scene: None,
            };
        };

        let selection = entry.selected();
        let remaining: Vec<Annotation> = entry
            .collection
            .items()
            .iter()
            .enumerate()
            .filter(|(i, _)| !selection.contains(i))
            .map(|(_, item)| {
                let mut item = item.clone();
                item.selected = false;
                item
            })
            .collect();

        debug!(
            type_key = %entry.type_key,
            removed = selection.len(),
            remaining = remaining.len(),
            "Deleted selected annotations"
        );
        let next = scene.with_items(&entry.type_key, remaining.clone());
        entry.collection.replace_items(remaining);
        entry.collection.replace_selection(Vec::new());

        DeleteOutcome {
            deletion_occurred: true,
            scene: Some(next),
        }
    }

    /// Commits a new item list for `type_key` after a draw.
    ///
    /// Items flagged `selected` become the selection. When the list grew,
    /// `on_snapshot` receives the new scene. Returns the new scene, or a copy
    /// of `scene` when the type is not registered.
    pub fn complete<F>(
        &mut self,
        type_key: &str,
        items: Vec<Annotation>,
        scene: &Scene,
        on_snapshot: F,
    ) -> Scene
    where
        F: FnOnce(&Scene),
    {
        match self.commit_items(type_key, items, scene) {
            Ok((next, grew)) => {
                if grew {
                    on_snapshot(&next);
                }
                next
            }
            Err(err) => {
                warn!(%err, "complete ignored");
                scene.clone()
            }
        }
    }

    /// Replaces the items of `type_key` in place of existing ones, as after a
    /// drag. Never snapshots.
    pub fn replace_items(&mut self, type_key: &str, items: Vec<Annotation>, scene: &Scene) -> Scene {
        match self.commit_items(type_key, items, scene) {
            Ok((next, _)) => next,
            Err(err) => {
                warn!(%err, "replace_items ignored");
                scene.clone()
            }
        }
    }

    fn commit_items(
        &mut self,
        type_key: &str,
        items: Vec<Annotation>,
        scene: &Scene,
    ) -> Result<(Scene, bool), AnnotationError> {
        let entry = self.entry_mut(type_key)?;
        let grew = items.len() > entry.collection.items().len();
        let selection = selected_indices(&items);
        let next = scene.with_items(type_key, items.clone());
        entry.collection.replace_items(items);
        entry.collection.replace_selection(selection.clone());
        if !selection.is_empty() {
            self.deselect_others(type_key);
        }
        Ok((next, grew))
    }

    /// Loads every collection from `scene` and clears all selections.
    ///
    /// Collections missing from the scene become empty.
    pub fn restore(&mut self, scene: &Scene) {
        for entry in self.entries.iter_mut() {
            let items = scene
                .get(&entry.type_key)
                .iter()
                .map(|item| {
                    let mut item = item.clone();
                    item.selected = false;
                    item
                })
                .collect();
            entry.collection.replace_items(items);
            entry.collection.replace_selection(Vec::new());
        }
        debug!(items = scene.item_count(), "Restored scene");
    }

    /// Non-empty selections keyed by type.
    pub fn selections(&self) -> BTreeMap<String, Vec<usize>> {
        self.entries
            .iter()
            .filter(|e| !e.collection.selection().is_empty())
            .map(|e| (e.type_key.clone(), e.collection.selection().to_vec()))
            .collect()
    }

    /// The committed items of every registered collection.
    pub fn scene(&self) -> Scene {
        self.entries
            .iter()
            .map(|e| (e.type_key.clone(), e.collection.items().to_vec()))
            .collect()
    }
}
