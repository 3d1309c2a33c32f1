//! The per-field tag mini-language.
//!
//! A tag is a comma-separated list of options. Each option is either a bare
//! flag (`padleft`) or a `key=value` pair split on the first `=`:
//!
//! ```text
//! padleft=0,len=10
//! padright,start=11,end=30
//! padleft=*,len=8,currency=EUR
//! ```
//!
//! | key | value | consumed by |
//! |-----|-------|-------------|
//! | `padleft` | flag or a one-byte pad unit | formatter |
//! | `padright` | flag or a one-byte pad unit | formatter |
//! | `len` | field width | formatter |
//! | `start`, `end` | inclusive column range; width is `end - start + 1` | formatter |
//! | anything else | free-form | hooks |
//!
//! Flags are stored with the value [`FLAG`]. Keys are not validated: empty
//! options produce an empty key, and later duplicates overwrite earlier ones.
//!
//! ```rust
//! use serde_flatmap::tag;
//!
//! let spec = tag::parse("padleft=0,len=10,padleft");
//! assert_eq!(spec.get("padleft"), Some("true"));
//! assert_eq!(spec.get("len"), Some("10"));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value stored for an option written without `=`.
pub const FLAG: &str = "true";
pub const PAD_LEFT: &str = "padleft";
pub const PAD_RIGHT: &str = "padright";
pub const LEN: &str = "len";
pub const START: &str = "start";
pub const END: &str = "end";

/// Parsed options of one field's tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSpec(IndexMap<String, String>);

/// Tag specs of a record, keyed by field name.
pub type TagTable = IndexMap<String, TagSpec>;

impl TagSpec {
    #[must_use]
    pub fn new() -> Self {
        TagSpec(IndexMap::new())
    }

    /// Parses a tag string. Never fails.
    ///
    /// ```rust
    /// use serde_flatmap::TagSpec;
    ///
    /// let spec = TagSpec::parse("a=1,b=2");
    /// assert_eq!(spec.get("a"), Some("1"));
    /// assert_eq!(spec.get("b"), Some("2"));
    /// ```
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        let mut spec = TagSpec::new();
        for part in tag.split(',') {
            match part.split_once('=') {
                Some((key, value)) => spec.insert(key, value),
                None => spec.insert(part, FLAG),
            };
        }
        spec
    }

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

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.0.iter()
    }
}

/// Parses a tag string into a [`TagSpec`].
#[must_use]
pub fn parse(tag: &str) -> TagSpec {
    TagSpec::parse(tag)
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagSpec {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        TagSpec(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a TagSpec {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
