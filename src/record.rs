//! Records and their fields.
//!
//! A [`Record`] is a struct whose public fields take part in marshalling. It
//! is normally implemented with `#[derive(Record)]`, which also collects the
//! `#[tag(...)]` annotations of each field:
//!
//! ```rust
//! use serde_flatmap::{fields_of, IntWidth, Kind, Record};
//!
//! #[derive(Record, Default)]
//! pub struct Account {
//!     #[tag(fixed = "padleft=0,len=10")]
//!     pub id: u32,
//!     #[tag(fixed = "padright,start=11,end=30", csv = "quoted")]
//!     pub name: String,
//!     pub note: Option<String>,
//!     cache: Vec<u8>,
//! }
//!
//! let fields = fields_of::<Account>("fixed");
//! let names: Vec<_> = fields.iter().map(|f| f.name).collect();
//! assert_eq!(names, ["id", "name", "note"]);
//! assert_eq!(fields[0].kind, Kind::Int(IntWidth::U32));
//! assert_eq!(fields[1].tags.get("end"), Some("30"));
//! assert!(fields[2].tags.is_empty());
//! ```
//!
//! Field values are read and written through [`Slot`], which every
//! scalar-shaped serde type implements.

use crate::de::{trace_kind, ValueDeserializer};
use crate::ser::ValueSerializer;
use crate::tag::{TagSpec, TagTable};
use crate::{Kind, Result, Value};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Static registration entry for one participating field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    /// Computes the field type's [`Kind`].
    pub kind: fn() -> Kind,
    /// `(tag group, raw tag)` pairs, in declaration order.
    pub annotations: &'static [(&'static str, &'static str)],
}

impl FieldDef {
    /// The raw tag registered under `group`, if any.
    #[must_use]
    pub fn annotation(&self, group: &str) -> Option<&'static str> {
        self.annotations
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, tag)| *tag)
    }
}

/// A field as seen by one marshalling call.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: Kind,
    pub tags: TagSpec,
}

/// A struct with named, externally visible fields.
///
/// `FIELDS` lists the participating fields in declaration order, and
/// `field`/`field_mut` must return a slot for every name listed there.
pub trait Record {
    const NAME: &'static str;
    const FIELDS: &'static [FieldDef];

    fn field(&self, name: &str) -> Option<&dyn Slot>;
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Slot>;
}

/// A type that can be stored in a record field.
///
/// Implemented for every `Serialize + DeserializeOwned` type. Whether a
/// particular type is actually usable shows in its [`Kind`].
pub trait Scalar: Sized {
    fn kind() -> Kind;
    fn to_value(&self) -> Result<Value>;
    fn from_value(value: Value) -> Result<Self>;
}

impl<T> Scalar for T
where
    T: Serialize + DeserializeOwned,
{
    fn kind() -> Kind {
        trace_kind::<T>()
    }

    fn to_value(&self) -> Result<Value> {
        self.serialize(ValueSerializer)
    }

    fn from_value(value: Value) -> Result<Self> {
        T::deserialize(ValueDeserializer::new(value))
    }
}

/// Object-safe access to a field's value.
pub trait Slot {
    fn kind(&self) -> Kind;
    /// Reads the current value.
    fn load(&self) -> Result<Value>;
    /// Replaces the value. On error the field is left unchanged.
    fn store(&mut self, value: Value) -> Result<()>;
}

impl<T: Scalar> Slot for T {
    fn kind(&self) -> Kind {
        <T as Scalar>::kind()
    }

    fn load(&self) -> Result<Value> {
        self.to_value()
    }

    fn store(&mut self, value: Value) -> Result<()> {
        *self = T::from_value(value)?;
        Ok(())
    }
}

/// Describes the fields of `R` with their tags under `group`, in declaration
/// order. Fields with no annotation in the group get an empty [`TagSpec`].
#[must_use]
pub fn fields<R: Record>(group: &str) -> Vec<FieldDescriptor> {
    R::FIELDS
        .iter()
        .map(|def| FieldDescriptor {
            name: def.name,
            kind: (def.kind)(),
            tags: def
                .annotation(group)
                .filter(|tag| !tag.is_empty())
                .map(TagSpec::parse)
                .unwrap_or_default(),
        })
        .collect()
}

/// Parsed tags of `R` under `group`, keyed by field name. Fields without an
/// annotation in the group are left out.
#[must_use]
pub fn tags<R: Record>(group: &str) -> TagTable {
    R::FIELDS
        .iter()
        .filter_map(|def| {
            def.annotation(group)
                .filter(|tag| !tag.is_empty())
                .map(|tag| (def.name.to_string(), TagSpec::parse(tag)))
        })
        .collect()
}
