//! Open-ended property maps for levels, transitions, and species.
//!
//! Loaders attach arbitrary metadata (parity, half-life, data-source
//! annotations) under string or tuple-shaped keys. The key shapes are an
//! explicit sum type rather than stringly-typed tuples, so lookups cannot
//! collide across shapes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Property name under which loaders flag a level or transition as not
/// physically resolved (e.g. ambiguous spin/parity assignment).
pub const PROP_USABLE: &str = "usable";

/// A property key: a plain name, or a name qualified by one or two extra
/// components.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PropertyKey {
    Simple(String),
    Pair(String, String),
    Triple(String, String, String),
}

impl From<&str> for PropertyKey {
    fn from(key: &str) -> Self {
        PropertyKey::Simple(key.to_string())
    }
}

impl From<(&str, &str)> for PropertyKey {
    fn from((a, b): (&str, &str)) -> Self {
        PropertyKey::Pair(a.to_string(), b.to_string())
    }
}

impl From<(&str, &str, &str)> for PropertyKey {
    fn from((a, b, c): (&str, &str, &str)) -> Self {
        PropertyKey::Triple(a.to_string(), b.to_string(), c.to_string())
    }
}

/// An ordered map of [`PropertyKey`] to string values.
///
/// Serialized as a sequence of key/value pairs, since structured keys do
/// not fit map-based formats like JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    entries: BTreeMap<PropertyKey, String>,
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<(PropertyKey, String)>::deserialize(deserializer)?;
        Ok(Self {
            entries: entries.into_iter().collect(),
        })
    }
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, replacing any previous value under the same key.
    pub fn set(&mut self, key: impl Into<PropertyKey>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: impl Into<PropertyKey>) -> Option<&str> {
        self.entries.get(&key.into()).map(String::as_str)
    }

    pub fn remove(&mut self, key: impl Into<PropertyKey>) -> Option<String> {
        self.entries.remove(&key.into())
    }

    pub fn contains(&self, key: impl Into<PropertyKey>) -> bool {
        self.entries.contains_key(&key.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PropertyKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the owner is flagged usable.
    ///
    /// Anything other than an explicit `"no"` or `"false"` under
    /// [`PROP_USABLE`] counts as usable; an absent flag does too.
    pub fn usable(&self) -> bool {
        !matches!(self.get(PROP_USABLE), Some("no") | Some("false"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_shapes_do_not_collide() {
        let mut props = Properties::new();
        props.set("parity", "+");
        props.set(("parity", "source"), "ENSDF");
        props.set(("parity", "source", "revision"), "2024");

        assert_eq!(props.get("parity"), Some("+"));
        assert_eq!(props.get(("parity", "source")), Some("ENSDF"));
        assert_eq!(props.get(("parity", "source", "revision")), Some("2024"));
        assert_eq!(props.len(), 3);
    }

    #[test]
    fn set_replaces() {
        let mut props = Properties::new();
        props.set("half-life", "1.2e3");
        props.set("half-life", "1.3e3");
        assert_eq!(props.get("half-life"), Some("1.3e3"));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn remove_returns_value() {
        let mut props = Properties::new();
        props.set("j", "2");
        assert_eq!(props.remove("j"), Some("2".to_string()));
        assert!(props.is_empty());
        assert_eq!(props.remove("j"), None);
    }

    #[test]
    fn serde_round_trip() {
        let mut props = Properties::new();
        props.set("parity", "+");
        props.set(("B", "E2"), "0.049");

        let json = serde_json::to_string(&props).expect("serializable");
        let back: Properties = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, props);
    }

    #[test]
    fn usable_flag_convention() {
        let mut props = Properties::new();
        assert!(props.usable());
        props.set(PROP_USABLE, "no");
        assert!(!props.usable());
        props.set(PROP_USABLE, "false");
        assert!(!props.usable());
        props.set(PROP_USABLE, "yes");
        assert!(props.usable());
    }
}
