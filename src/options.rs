//! Per-call configuration for marshalling.
//!
//! - [`MapOptions`]: which tag group to read and an optional [`Hook`]
//! - [`Hook`]: a caller-supplied coercion override, invoked once per field
//!
//! ## Examples
//!
//! ```rust
//! use serde_flatmap::{MapOptions, TagSpec, Value};
//!
//! // Upper-case every string value on its way into the map.
//! let upper = |from: &Value, _to: &Value, _tags: &TagSpec| -> serde_flatmap::Result<Value> {
//!     Ok(match from {
//!         Value::String(s) => Value::String(s.to_uppercase()),
//!         other => other.clone(),
//!     })
//! };
//! let options = MapOptions::new("fixed").with_hook(upper);
//! assert_eq!(options.tag, "fixed");
//! assert!(options.hook.is_some());
//! ```

use crate::{Result, TagSpec, Value};
use std::fmt;
use std::sync::Arc;

/// A coercion override.
///
/// `from` is the source value, `to` is the destination's current value (a
/// placeholder empty string when building a map) and `tags` is the field's
/// parsed tag. The returned value replaces the source.
///
/// Any `Fn(&Value, &Value, &TagSpec) -> Result<Value>` closure is a hook.
pub trait Hook: Send + Sync {
    fn call(&self, from: &Value, to: &Value, tags: &TagSpec) -> Result<Value>;
}

impl<F> Hook for F
where
    F: Fn(&Value, &Value, &TagSpec) -> Result<Value> + Send + Sync,
{
    fn call(&self, from: &Value, to: &Value, tags: &TagSpec) -> Result<Value> {
        self(from, to, tags)
    }
}

/// Configuration for a single `to_map` / `from_map` call.
///
/// The default reads the empty tag group (so no field has tags) and
/// installs no hook.
#[derive(Clone, Default)]
pub struct MapOptions {
    /// Name of the tag group whose annotations drive formatting.
    pub tag: String,
    pub hook: Option<Arc<dyn Hook>>,
}

impl MapOptions {
    /// Creates options reading the given tag group.
    ///
    /// ```rust
    /// use serde_flatmap::MapOptions;
    ///
    /// let options = MapOptions::new("fixed");
    /// assert_eq!(options.tag, "fixed");
    /// assert!(options.hook.is_none());
    /// ```
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        MapOptions {
            tag: tag.into(),
            hook: None,
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Installs a hook, replacing any previous one.
    #[must_use]
    pub fn with_hook<H>(mut self, hook: H) -> Self
    where
        H: Hook + 'static,
    {
        self.hook = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for MapOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapOptions")
            .field("tag", &self.tag)
            .field("hook", &self.hook.as_ref().map(|_| "<hook>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_tag_or_hook() {
        let options = MapOptions::default();
        assert!(options.tag.is_empty());
        assert!(options.hook.is_none());
    }

    #[test]
    fn test_closure_hook() {
        let prefixed = |from: &Value, _: &Value, tags: &TagSpec| -> Result<Value> {
            let prefix = tags.get("prefix").unwrap_or("");
            Ok(Value::String(format!("{}{}", prefix, from)))
        };
        let options = MapOptions::new("csv").with_hook(prefixed);
        let hook = options.hook.as_ref().unwrap();
        let tags = TagSpec::parse("prefix=#");
        let out = hook.call(&Value::from(5), &Value::Null, &tags).unwrap();
        assert_eq!(out, Value::from("#5"));
    }

    #[test]
    fn test_debug_hides_hook() {
        let identity = |f: &Value, _: &Value, _: &TagSpec| -> Result<Value> { Ok(f.clone()) };
        let options = MapOptions::new("fixed").with_hook(identity);
        let debug = format!("{:?}", options);
        assert!(debug.contains("fixed"));
        assert!(debug.contains("<hook>"));
    }
}
