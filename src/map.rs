//! The flat, string-keyed side of a conversion.
//!
//! [`FlatMap`] wraps an [`IndexMap`] so entries come out in the order the
//! record declares its fields, which keeps fixed-width layouts and test
//! output deterministic. Lookups do not depend on that order.
//!
//! ```rust
//! use serde_flatmap::FlatMap;
//!
//! let mut map = FlatMap::new();
//! map.insert("id", "0000000010");
//! map.insert("name", "ACME");
//!
//! let keys: Vec<_> = map.keys().map(String::as_str).collect();
//! assert_eq!(keys, ["id", "name"]);
//! assert_eq!(map.get("name"), Some("ACME"));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An ordered map of field names to their string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatMap(IndexMap<String, String>);

impl FlatMap {
    #[must_use]
    pub fn new() -> Self {
        FlatMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        FlatMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts an entry, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, String> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, String> {
        self.0.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.0.iter()
    }
}

impl From<HashMap<String, String>> for FlatMap {
    fn from(map: HashMap<String, String>) -> Self {
        FlatMap(map.into_iter().collect())
    }
}

impl From<FlatMap> for HashMap<String, String> {
    fn from(map: FlatMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for FlatMap {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FlatMap {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlatMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        FlatMap(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
