//! Reading a field into a [`Value`].
//!
//! [`ValueSerializer`] turns any scalar-shaped `Serialize` type into a
//! [`Value`]. Optional fields flatten (`Some(x)` reads as `x`, `None` as
//! [`Value::Null`]) and newtype wrappers are transparent. Compound shapes
//! are rejected with [`Error::Unsupported`], leaving the field name to the
//! caller.
//!
//! ```rust
//! use serde::Serialize;
//! use serde_flatmap::{ValueSerializer, Value};
//!
//! #[derive(Serialize)]
//! struct Cents(u32);
//!
//! # fn load<T: Serialize>(value: T) -> Value { value.serialize(ValueSerializer).unwrap() }
//! assert_eq!(load(Cents(250)), Value::Uint(250));
//! assert_eq!(load(Some(1.5f32)), Value::Float(1.5));
//! assert!(vec![1, 2].serialize(ValueSerializer).is_err());
//! ```

use crate::{Error, Result, Value};
use serde::ser::{self, Impossible};
use serde::Serialize;

/// Serializer producing a scalar [`Value`].
pub struct ValueSerializer;

fn unsupported<T>(kind: &str) -> Result<T> {
    Err(Error::unsupported("", kind))
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = Impossible<Value, Error>;
    type SerializeTuple = Impossible<Value, Error>;
    type SerializeTupleStruct = Impossible<Value, Error>;
    type SerializeTupleVariant = Impossible<Value, Error>;
    type SerializeMap = Impossible<Value, Error>;
    type SerializeStruct = Impossible<Value, Error>;
    type SerializeStructVariant = Impossible<Value, Error>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Uint(v as u64))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Uint(v as u64))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Uint(v as u64))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Uint(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Float(v as f64))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, _v: char) -> Result<Value> {
        unsupported("char")
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Value> {
        unsupported("bytes")
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Value> {
        unsupported("enum")
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        unsupported("enum")
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        unsupported("sequence")
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        unsupported("sequence")
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        unsupported("sequence")
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        unsupported("enum")
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        unsupported("map")
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        unsupported("struct")
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        unsupported("enum")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn load<T: Serialize>(value: T) -> Value {
        value.serialize(ValueSerializer).unwrap()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(load(true), Value::Bool(true));
        assert_eq!(load(-3i8), Value::Int(-3));
        assert_eq!(load(u64::MAX), Value::Uint(u64::MAX));
        assert_eq!(load("x"), Value::from("x"));
    }

    #[test]
    fn test_optional_flattens() {
        assert_eq!(load(None::<i32>), Value::Null);
        assert_eq!(load(Some(7i32)), Value::Int(7));
        assert_eq!(load(Box::new(2u8)), Value::Uint(2));
    }

    #[test]
    fn test_compound_shapes_rejected() {
        let err = vec!["a"].serialize(ValueSerializer).unwrap_err();
        assert_eq!(err, Error::unsupported("", "sequence"));

        let err = BTreeMap::<String, i32>::new()
            .serialize(ValueSerializer)
            .unwrap_err();
        assert_eq!(err, Error::unsupported("", "map"));

        assert!('c'.serialize(ValueSerializer).is_err());
    }

    #[test]
    fn test_value_serializes_to_itself() {
        let value = Value::Uint(9);
        assert_eq!(load(value.clone()), value);
        assert_eq!(load(Value::Null), Value::Null);
    }
}
