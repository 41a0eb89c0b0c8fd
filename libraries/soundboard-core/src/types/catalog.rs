//! Sound catalog
//!
//! An ordered mapping from display name to [`Sound`]. Order follows the JSON
//! document the backend sent, so the grid renders in the same order every time.

use crate::error::Result;
use crate::types::Sound;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Catalog of sounds for one community, keyed by display name
///
/// Replaced wholesale on every successful fetch; never patched in place by the
/// front end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoundCatalog {
    entries: Vec<(String, Sound)>,
}

impl SoundCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from its JSON object form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Insert a sound under `key`
    ///
    /// A key that already exists keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, sound: Sound) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = sound,
            None => self.entries.push((key, sound)),
        }
    }

    /// Look up a sound by its exact display name
    pub fn get(&self, key: &str) -> Option<&Sound> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, sound)| sound)
    }

    /// Number of sounds
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no sounds
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Sound)> {
        self.entries.iter().map(|(key, sound)| (key.as_str(), sound))
    }

    /// Display names in catalog order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl FromIterator<(String, Sound)> for SoundCatalog {
    fn from_iter<I: IntoIterator<Item = (String, Sound)>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for (key, sound) in iter {
            catalog.insert(key, sound);
        }
        catalog
    }
}

impl Serialize for SoundCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, sound) in &self.entries {
            map.serialize_entry(key, sound)?;
        }
        map.end()
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = SoundCatalog;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of sound names to sound records")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<Self::Value, A::Error> {
        let mut catalog = SoundCatalog {
            entries: Vec::with_capacity(access.size_hint().unwrap_or(0)),
        };
        while let Some((key, sound)) = access.next_entry::<String, Sound>()? {
            catalog.insert(key, sound);
        }
        Ok(catalog)
    }
}

impl<'de> Deserialize<'de> for SoundCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// Body of the catalog endpoint: `{ "soundList": { ... } }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    /// The community's sounds
    #[serde(default)]
    pub sound_list: SoundCatalog,
}
