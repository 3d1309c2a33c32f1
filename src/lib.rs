//! # serde_flatmap
//!
//! Converts typed records into flat `String → String` maps and back, the shape
//! fixed-width flat files are read and written in.
//!
//! ## Key Features
//!
//! - **Derived records**: `#[derive(Record)]` registers the public fields of a
//!   struct together with their `#[tag(...)]` annotations
//! - **Tag-driven padding**: `padleft`/`padright` with `len` or `start`/`end`
//!   pad a field to its column width
//! - **Scalar coercion**: booleans, integers of every width, floats, strings,
//!   optionals and [`Value`] fields convert to and from their string form by
//!   a fixed rule table (see [`coerce`])
//! - **Hooks**: a caller-supplied [`Hook`] can rewrite each field on its way
//!   through
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_flatmap::{from_map, to_map, Record};
//!
//! #[derive(Record, Debug, Default, PartialEq)]
//! pub struct Payment {
//!     #[tag(fixed = "padleft=0,len=8")]
//!     pub amount: u64,
//!     #[tag(fixed = "padright,start=9,end=20")]
//!     pub payee: String,
//!     pub urgent: bool,
//! }
//!
//! let payment = Payment { amount: 1250, payee: "ACME".to_string(), urgent: true };
//!
//! let map = to_map(&payment, "fixed").unwrap();
//! assert_eq!(map.get("amount"), Some("00001250"));
//! assert_eq!(map.get("payee"), Some("ACME        "));
//! assert_eq!(map.get("urgent"), Some("1"));
//!
//! let mut back = Payment::default();
//! from_map(&map, &mut back, "fixed").unwrap();
//! assert_eq!(back.amount, 0o1250);
//! assert_eq!(back.payee, "ACME        ");
//! assert!(back.urgent);
//! ```
//!
//! Zero-padded numbers read back as octal, the way prefixed integer literals
//! always do. Strip the padding in a hook when that is not wanted.
//!
//! ## Hooks
//!
//! ```rust
//! use serde_flatmap::{from_map_with_options, flatmap, MapOptions, Record, TagSpec, Value};
//!
//! #[derive(Record, Default)]
//! pub struct Entry {
//!     #[tag(fixed = "padleft=0,len=6")]
//!     pub count: i32,
//! }
//!
//! let strip = |from: &Value, _to: &Value, tags: &TagSpec| -> serde_flatmap::Result<Value> {
//!     let s = from.as_str().unwrap_or_default();
//!     let trimmed = if tags.contains_key("padleft") { s.trim_start_matches('0') } else { s };
//!     Ok(Value::Int(trimmed.parse().unwrap_or(0)))
//! };
//!
//! let mut entry = Entry::default();
//! let options = MapOptions::new("fixed").with_hook(strip);
//! from_map_with_options(&flatmap! { "count" => "000042" }, &mut entry, &options).unwrap();
//! assert_eq!(entry.count, 42);
//! ```
//!
//! ## Errors
//!
//! Field errors abort the call and name the field. Annotation mistakes, such as
//! a padding tag with no width, are reported as fatal errors (see
//! [`Error::is_fatal`]) and should not be retried.
//!
//! ## Logging
//!
//! The crate emits `tracing` events: `debug` per call and on abort, `trace`
//! per field. Install a subscriber to see them.

extern crate self as serde_flatmap;

pub mod coerce;
pub mod de;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod marshal;
pub mod options;
pub mod record;
pub mod ser;
pub mod tag;
pub mod value;

pub use de::ValueDeserializer;
pub use error::{Error, Result};
pub use map::FlatMap;
pub use marshal::{fill_map, fill_record};
pub use options::{Hook, MapOptions};
pub use record::{FieldDef, FieldDescriptor, Record, Scalar, Slot};
pub use ser::ValueSerializer;
pub use serde_flatmap_derive::Record;
pub use tag::{TagSpec, TagTable};
pub use value::{FloatWidth, IntWidth, Kind, Value};

/// Projects `record` into a new flat map, reading tags from `tag`.
///
/// # Examples
///
/// ```rust
/// use serde_flatmap::{to_map, Record};
///
/// #[derive(Record)]
/// pub struct Point { pub x: i32, pub y: i32 }
///
/// let map = to_map(&Point { x: 1, y: -2 }, "").unwrap();
/// assert_eq!(map.get("y"), Some("-2"));
/// ```
///
/// # Errors
///
/// Returns the first field error. Empty optional fields have no string form
/// and fail unless a hook replaces them.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_map<T: Record>(record: &T, tag: &str) -> Result<FlatMap> {
    to_map_with_options(record, &MapOptions::new(tag))
}

/// Projects `record` into a new flat map with custom options.
///
/// # Errors
///
/// Returns the first field error or hook error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_map_with_options<T: Record>(record: &T, options: &MapOptions) -> Result<FlatMap> {
    let mut map = FlatMap::with_capacity(T::FIELDS.len());
    fill_map(Some(record), &mut map, options)?;
    Ok(map)
}

/// Assigns the fields of `record` present in `map`, reading tags from `tag`.
///
/// # Examples
///
/// ```rust
/// use serde_flatmap::{flatmap, from_map, Record};
///
/// #[derive(Record, Default)]
/// pub struct Point { pub x: i32, pub y: i32 }
///
/// let mut point = Point { x: 5, y: 5 };
/// from_map(&flatmap! { "y" => "0x10" }, &mut point, "").unwrap();
/// assert_eq!((point.x, point.y), (5, 16));
/// ```
///
/// # Errors
///
/// Returns the first field error. Fields assigned before it keep their new
/// values.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_map<T: Record>(map: &FlatMap, record: &mut T, tag: &str) -> Result<()> {
    fill_record(map, record, &MapOptions::new(tag))
}

/// Assigns the fields of `record` present in `map` with custom options.
///
/// # Errors
///
/// Returns the first field error or hook error, or [`Error::TypeMismatch`]
/// when a hook returns a value the field cannot hold.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_map_with_options<T: Record>(
    map: &FlatMap,
    record: &mut T,
    options: &MapOptions,
) -> Result<()> {
    fill_record(map, record, options)
}

/// Parsed tags of `T` under `tag`, for the fields that have one.
#[must_use]
pub fn tags_of<T: Record>(tag: &str) -> TagTable {
    record::tags::<T>(tag)
}

/// All participating fields of `T`, with their kinds and tags under `tag`.
#[must_use]
pub fn fields_of<T: Record>(tag: &str) -> Vec<FieldDescriptor> {
    record::fields::<T>(tag)
}
