use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::geometry::Geometry;

/// Style record carried by every annotation.
///
/// The drawing layer never interprets these values; they travel with the
/// item through selection, drags, snapshots and restores.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Appearance {
    #[serde(flatten)]
    pub properties: BTreeMap<String, Value>,
}

impl Appearance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// A user-drawn shape instance owned by exactly one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub geometry: Geometry,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub appearance: Appearance,
}

impl Annotation {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            selected: false,
            appearance: Appearance::default(),
        }
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    /// Same item with a different geometry; flags and style are kept.
    pub fn with_geometry(&self, geometry: Geometry) -> Self {
        Self {
            geometry,
            selected: self.selected,
            appearance: self.appearance.clone(),
        }
    }
}
