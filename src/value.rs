//! Dynamic scalar values and the kinds they are coerced between.
//!
//! - [`Value`]: a single scalar read from, or written to, a record field
//! - [`Kind`]: the declared kind of a field, driving coercion dispatch
//! - [`IntWidth`] / [`FloatWidth`]: concrete bit widths kept for range checks
//!   and rounding at the point of assignment
//!
//! ## Examples
//!
//! ```rust
//! use serde_flatmap::{IntWidth, Kind, Value};
//!
//! let value = Value::from(42i16);
//! assert_eq!(value.kind(), Some(Kind::Int(IntWidth::I64)));
//! assert_eq!(value.as_i64(), Some(42));
//!
//! let kind = Kind::Optional(Box::new(Kind::Int(IntWidth::U8)));
//! assert_eq!(kind.to_string(), "Option<u8>");
//! assert!(kind.accepts(&Value::Null));
//! assert!(!kind.accepts(&Value::from(300)));
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed scalar.
///
/// `Null` stands for the absent side of an optional field. Integers keep
/// their signedness so unsigned fields round-trip without loss.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as `i64` if it is an integer that fits.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Uint(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    /// Returns the value as `u64` if it is a non-negative integer.
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Int(i) => u64::try_from(*i).ok(),
            Value::Uint(u) => Some(*u),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The kind this value holds concretely, or `None` for `Null`.
    ///
    /// Integers report the widest width of their signedness.
    #[must_use]
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(Kind::Bool),
            Value::Int(_) => Some(Kind::Int(IntWidth::I64)),
            Value::Uint(_) => Some(Kind::Int(IntWidth::U64)),
            Value::Float(_) => Some(Kind::Float(FloatWidth::F64)),
            Value::String(_) => Some(Kind::String),
        }
    }

    /// Short type name used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "i64",
            Value::Uint(_) => "u64",
            Value::Float(_) => "f64",
            Value::String(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Uint(u) => write!(f, "{}", u),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

/// Bit width and signedness of an integer field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

impl IntWidth {
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            IntWidth::I8 | IntWidth::U8 => 8,
            IntWidth::I16 | IntWidth::U16 => 16,
            IntWidth::I32 | IntWidth::U32 => 32,
            IntWidth::I64 | IntWidth::U64 => 64,
        }
    }

    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            IntWidth::I8 | IntWidth::I16 | IntWidth::I32 | IntWidth::I64
        )
    }

    /// Largest magnitude representable, as `u64`. For signed widths this is
    /// the positive maximum; the negative minimum is one more.
    #[must_use]
    pub const fn max_magnitude(self) -> u64 {
        if self.is_signed() {
            (1u64 << (self.bits() - 1)) - 1
        } else if self.bits() == 64 {
            u64::MAX
        } else {
            (1u64 << self.bits()) - 1
        }
    }

    /// Truncates a signed integer to this width, two's-complement style.
    #[must_use]
    pub fn wrap_i64(self, v: i64) -> Value {
        match self {
            IntWidth::I8 => Value::Int(v as i8 as i64),
            IntWidth::I16 => Value::Int(v as i16 as i64),
            IntWidth::I32 => Value::Int(v as i32 as i64),
            IntWidth::I64 => Value::Int(v),
            IntWidth::U8 => Value::Uint(v as u8 as u64),
            IntWidth::U16 => Value::Uint(v as u16 as u64),
            IntWidth::U32 => Value::Uint(v as u32 as u64),
            IntWidth::U64 => Value::Uint(v as u64),
        }
    }

    /// Truncates an unsigned integer to this width.
    #[must_use]
    pub fn wrap_u64(self, v: u64) -> Value {
        self.wrap_i64(v as i64)
    }

    /// Whether `value` is an integer inside this width's range.
    #[must_use]
    pub fn contains(self, value: &Value) -> bool {
        let max = self.max_magnitude();
        match (value, self.is_signed()) {
            (Value::Int(i), true) => {
                let min = -(max as i128) - 1;
                (*i as i128) >= min && (*i as i128) <= max as i128
            }
            (Value::Int(i), false) => *i >= 0 && (*i as u64) <= max,
            (Value::Uint(u), _) => *u <= max,
            _ => false,
        }
    }
}

impl fmt::Display for IntWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_signed() { 'i' } else { 'u' };
        write!(f, "{}{}", sign, self.bits())
    }
}

/// Bit width of a floating point field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    F32,
    F64,
}

impl FloatWidth {
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            FloatWidth::F32 => 32,
            FloatWidth::F64 => 64,
        }
    }

    /// Rounds `v` to the precision of this width.
    #[must_use]
    pub fn round(self, v: f64) -> f64 {
        match self {
            FloatWidth::F32 => v as f32 as f64,
            FloatWidth::F64 => v,
        }
    }

    /// Whether `v` can be held at this width. Finite values must stay finite
    /// once rounded; infinities and NaN always fit.
    #[must_use]
    pub fn contains(self, v: f64) -> bool {
        !v.is_finite() || self.round(v).is_finite()
    }
}

impl fmt::Display for FloatWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.bits())
    }
}

/// The declared kind of a record field.
///
/// Coercion dispatches on the variant alone; integer and float widths only
/// matter when the converted value is finally assigned.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    String,
    Int(IntWidth),
    Float(FloatWidth),
    /// An optional field wrapping a kind.
    Optional(Box<Kind>),
    /// A field holding any [`Value`].
    Any,
    /// A field type outside the scalar set (sequences, maps, nested structs...).
    Unsupported(&'static str),
}

impl Kind {
    /// The zero value a freshly allocated slot of this kind holds.
    #[must_use]
    pub fn zero(&self) -> Value {
        match self {
            Kind::Bool => Value::Bool(false),
            Kind::String => Value::String(String::new()),
            Kind::Int(width) if width.is_signed() => Value::Int(0),
            Kind::Int(_) => Value::Uint(0),
            Kind::Float(_) => Value::Float(0.0),
            Kind::Optional(_) | Kind::Any | Kind::Unsupported(_) => Value::Null,
        }
    }

    /// Whether `value` can be stored into a field of this kind without any
    /// conversion.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Kind::Bool, Value::Bool(_)) => true,
            (Kind::String, Value::String(_)) => true,
            (Kind::Int(width), v) => width.contains(v),
            (Kind::Float(width), Value::Float(f)) => width.contains(*f),
            (Kind::Optional(_), Value::Null) => true,
            (Kind::Optional(inner), v) => inner.accepts(v),
            (Kind::Any, _) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Bool => write!(f, "bool"),
            Kind::String => write!(f, "string"),
            Kind::Int(width) => write!(f, "{}", width),
            Kind::Float(width) => write!(f, "{}", width),
            Kind::Optional(inner) => write!(f, "Option<{}>", inner),
            Kind::Any => write!(f, "any"),
            Kind::Unsupported(name) => write!(f, "{}", name),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Uint(u) => serializer.serialize_u64(*u),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a scalar value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Int(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Value::Uint(value))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, _seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                Err(de::Error::custom("sequences cannot be held by a scalar value"))
            }

            fn visit_map<A>(self, _map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                Err(de::Error::custom("maps cannot be held by a scalar value"))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Uint(value as u64)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Uint(value as u64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Uint(value as u64)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Uint(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_width_wrap() {
        assert_eq!(IntWidth::I8.wrap_i64(300), Value::Int(44));
        assert_eq!(IntWidth::I8.wrap_i64(-129), Value::Int(127));
        assert_eq!(IntWidth::U8.wrap_i64(-1), Value::Uint(255));
        assert_eq!(IntWidth::I64.wrap_u64(u64::MAX), Value::Int(-1));
        assert_eq!(IntWidth::U64.wrap_u64(u64::MAX), Value::Uint(u64::MAX));
    }

    #[test]
    fn test_int_width_contains() {
        assert!(IntWidth::I8.contains(&Value::Int(-128)));
        assert!(!IntWidth::I8.contains(&Value::Int(128)));
        assert!(IntWidth::U16.contains(&Value::Uint(65535)));
        assert!(!IntWidth::U16.contains(&Value::Int(-1)));
        assert!(IntWidth::I64.contains(&Value::Uint(i64::MAX as u64)));
        assert!(!IntWidth::I64.contains(&Value::Uint(u64::MAX)));
        assert!(!IntWidth::I32.contains(&Value::Float(1.0)));
    }

    #[test]
    fn test_kind_zero_and_display() {
        assert_eq!(Kind::Int(IntWidth::U32).zero(), Value::Uint(0));
        assert_eq!(Kind::Float(FloatWidth::F32).zero(), Value::Float(0.0));
        assert_eq!(Kind::Optional(Box::new(Kind::Bool)).zero(), Value::Null);
        assert_eq!(Kind::Int(IntWidth::I16).to_string(), "i16");
        assert_eq!(Kind::Float(FloatWidth::F32).to_string(), "f32");
        assert_eq!(
            Kind::Optional(Box::new(Kind::String)).to_string(),
            "Option<string>"
        );
    }

    #[test]
    fn test_kind_accepts() {
        assert!(Kind::Any.accepts(&Value::Null));
        assert!(Kind::String.accepts(&Value::from("x")));
        assert!(!Kind::String.accepts(&Value::from(1)));
        assert!(!Kind::Float(FloatWidth::F64).accepts(&Value::from(1)));
        assert!(!Kind::Unsupported("sequence").accepts(&Value::Null));
    }

    #[test]
    fn test_float_width_contains() {
        assert!(FloatWidth::F32.contains(f64::from(f32::MAX)));
        assert!(!FloatWidth::F32.contains(1e300));
        assert!(FloatWidth::F32.contains(f64::INFINITY));
        assert!(FloatWidth::F32.contains(f64::NAN));
        assert!(FloatWidth::F64.contains(1e300));
        assert!(!Kind::Float(FloatWidth::F32).accepts(&Value::Float(-1e39)));
        assert!(Kind::Float(FloatWidth::F32).accepts(&Value::Float(0.1)));
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(Value::Null.kind(), None);
        assert_eq!(Value::from(1u8).kind(), Some(Kind::Int(IntWidth::U64)));
        assert_eq!(Value::from(1.5f32).as_f64(), Some(1.5));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::String("a".to_string()));
    }

    #[test]
    fn test_value_json_roundtrip() {
        let json = serde_json::to_string(&Value::Uint(7)).unwrap();
        assert_eq!(json, "7");
        let back: Value = serde_json::from_str("null").unwrap();
        assert_eq!(back, Value::Null);
        assert!(serde_json::from_str::<Value>("[1]").is_err());
    }
}
