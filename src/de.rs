//! Writing a [`Value`] into a field, and discovering a field type's [`Kind`].
//!
//! Two deserializers live here:
//!
//! - [`ValueDeserializer`] feeds an already-coerced [`Value`] to a type's
//!   `Deserialize` impl. `Null` becomes `None` for optional fields; every
//!   other value is handed over as-is, so the target type's own visitor does
//!   the final width check.
//! - [`trace_kind`] drives a type's `Deserialize` impl with a deserializer
//!   that answers every request with a dummy value and records which request
//!   was made. The request is the type's declared kind.
//!
//! ```rust
//! use serde_flatmap::{de::trace_kind, FloatWidth, IntWidth, Kind, Value};
//!
//! assert_eq!(trace_kind::<u16>(), Kind::Int(IntWidth::U16));
//! assert_eq!(
//!     trace_kind::<Option<f32>>(),
//!     Kind::Optional(Box::new(Kind::Float(FloatWidth::F32)))
//! );
//! assert_eq!(trace_kind::<Value>(), Kind::Any);
//! assert_eq!(trace_kind::<Vec<String>>(), Kind::Unsupported("sequence"));
//! ```

use crate::value::{FloatWidth, IntWidth};
use crate::{Error, Kind, Result, Value};
use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Deserializer over a single scalar [`Value`].
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Int(i) => visitor.visit_i64(i),
            Value::Uint(u) => visitor.visit_u64(u),
            Value::Float(f) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

/// Returns the declared kind of `T`.
///
/// Types whose `Deserialize` impl asks for anything other than a scalar, an
/// option or a self-describing value come back as [`Kind::Unsupported`].
#[must_use]
pub fn trace_kind<T: DeserializeOwned>() -> Kind {
    let mut kind = Kind::Unsupported("unknown");
    // Only the request matters; the dummy value (or the error a validating
    // type raises for it) is dropped.
    let _ = T::deserialize(KindTracer { kind: &mut kind });
    kind
}

struct KindTracer<'a> {
    kind: &'a mut Kind,
}

impl KindTracer<'_> {
    fn record(self, kind: Kind) {
        *self.kind = kind;
    }
}

impl<'de> de::Deserializer<'de> for KindTracer<'_> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Any);
        visitor.visit_unit()
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Bool);
        visitor.visit_bool(false)
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Int(IntWidth::I8));
        visitor.visit_i8(0)
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Int(IntWidth::I16));
        visitor.visit_i16(0)
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Int(IntWidth::I32));
        visitor.visit_i32(0)
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Int(IntWidth::I64));
        visitor.visit_i64(0)
    }

    fn deserialize_i128<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Unsupported("i128"));
        visitor.visit_i128(0)
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Int(IntWidth::U8));
        visitor.visit_u8(0)
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Int(IntWidth::U16));
        visitor.visit_u16(0)
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Int(IntWidth::U32));
        visitor.visit_u32(0)
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Int(IntWidth::U64));
        visitor.visit_u64(0)
    }

    fn deserialize_u128<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Unsupported("u128"));
        visitor.visit_u128(0)
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Float(FloatWidth::F32));
        visitor.visit_f32(0.0)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Float(FloatWidth::F64));
        visitor.visit_f64(0.0)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Unsupported("char"));
        visitor.visit_char('\0')
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::String);
        visitor.visit_str("")
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::String);
        visitor.visit_string(String::new())
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Unsupported("bytes"));
        visitor.visit_bytes(&[])
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Unsupported("bytes"));
        visitor.visit_byte_buf(Vec::new())
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let mut inner = Kind::Unsupported("unknown");
        let result = visitor.visit_some(KindTracer { kind: &mut inner });
        self.record(Kind::Optional(Box::new(inner)));
        result
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Unsupported("unit"));
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Unsupported("sequence"));
        let empty: Vec<()> = Vec::new();
        visitor.visit_seq(empty.into_deserializer())
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Unsupported("map"));
        Err(Error::unsupported("", "map"))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Unsupported("struct"));
        Err(Error::unsupported("", "struct"))
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.record(Kind::Unsupported("enum"));
        Err(Error::unsupported("", "enum"))
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_any(visitor)
    }
}
