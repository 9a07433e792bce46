//! Full-scene value: every annotation collection keyed by type.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::Annotation;

/// A map from annotation type key to that collection's items.
///
/// Keys keep the order they were first inserted in, so a scene taken from
/// the registry lists collections in registration order. Serializes as a
/// plain JSON object.
///
/// Scenes are plain values. The registry hands out fresh scenes after each
/// mutation and the history stack stores them, so nothing here aliases a
/// live collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene(Vec<(String, Vec<Annotation>)>);

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, type_key: &str) -> Option<usize> {
        self.0.iter().position(|(key, _)| key == type_key)
    }

    /// Items of one type; an absent key reads as empty.
    pub fn get(&self, type_key: &str) -> &[Annotation] {
        self.position(type_key)
            .map(|i| self.0[i].1.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, type_key: &str) -> bool {
        self.position(type_key).is_some()
    }

    /// Replaces the items of `type_key` in place, or appends a new entry.
    pub fn insert(&mut self, type_key: impl Into<String>, items: Vec<Annotation>) {
        let type_key = type_key.into();
        match self.position(&type_key) {
            Some(i) => self.0[i].1 = items,
            None => self.0.push((type_key, items)),
        }
    }

    /// Copy of this scene with one collection replaced.
    pub fn with_items(&self, type_key: &str, items: Vec<Annotation>) -> Self {
        let mut next = self.clone();
        next.insert(type_key, items);
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Annotation])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn type_keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// Number of items across every collection.
    pub fn item_count(&self) -> usize {
        self.0.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Copy with every `selected` flag cleared.
    pub fn without_selection(&self) -> Self {
        let mut next = self.clone();
        for (_, items) in next.0.iter_mut() {
            for item in items.iter_mut() {
                item.selected = false;
            }
        }
        next
    }
}

impl FromIterator<(String, Vec<Annotation>)> for Scene {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Annotation>)>>(iter: I) -> Self {
        let mut scene = Self::new();
        for (type_key, items) in iter {
            scene.insert(type_key, items);
        }
        scene
    }
}

impl Serialize for Scene {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (type_key, items) in &self.0 {
            map.serialize_entry(type_key, items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Scene {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SceneVisitor;

        impl<'de> Visitor<'de> for SceneVisitor {
            type Value = Scene;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map from annotation type to items")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Scene, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut scene = Scene::new();
                while let Some((type_key, items)) =
                    access.next_entry::<String, Vec<Annotation>>()?
                {
                    scene.insert(type_key, items);
                }
                Ok(scene)
            }
        }

        deserializer.deserialize_map(SceneVisitor)
    }
}
