//! Record ↔ flat map projection.
//!
//! [`fill_map`] reads every field of a record, lets the hook rewrite it,
//! pads it and stores its string form under the field's name.
//! [`fill_record`] goes the other way, assigning only the fields whose name
//! is present in the map.
//!
//! Both stop at the first failing field. Work already done is kept: a
//! failed [`fill_map`] leaves earlier entries in the map, and a failed
//! [`fill_record`] leaves earlier fields assigned.

use crate::coerce::{decode, stringify};
use crate::format::format;
use crate::record::{fields, FieldDescriptor, Record};
use crate::{Error, FlatMap, Kind, MapOptions, Result, Value};
use tracing::{debug, trace};

/// Writes the fields of `record` into `map`. `None` leaves the map alone.
pub fn fill_map<R: Record>(
    record: Option<&R>,
    map: &mut FlatMap,
    options: &MapOptions,
) -> Result<()> {
    let record = match record {
        Some(record) => record,
        None => return Ok(()),
    };

    let fields = fields::<R>(&options.tag);
    debug!(record = R::NAME, tag = %options.tag, fields = fields.len(), "filling map");

    for field in &fields {
        if let Err(err) = write_entry(record, field, map, options) {
            debug!(record = R::NAME, field = field.name, error = %err, "map fill aborted");
            return Err(err);
        }
    }
    Ok(())
}

fn write_entry<R: Record>(
    record: &R,
    field: &FieldDescriptor,
    map: &mut FlatMap,
    options: &MapOptions,
) -> Result<()> {
    let name = field.name;
    let slot = record
        .field(name)
        .ok_or_else(|| missing_accessor::<R>(name))?;
    let mut value = slot.load().map_err(|err| err.in_field(name))?;

    if let Some(hook) = &options.hook {
        trace!(field = name, "calling hook");
        value = hook
            .call(&value, &Value::String(String::new()), &field.tags)
            .map_err(|err| err.in_field(name))?;
    }

    let value = format(name, &value, &field.tags)?;
    map.insert(name, stringify(name, &value)?);
    Ok(())
}

/// Assigns the fields of `record` found in `map`. Fields whose name is not a
/// key of the map keep their value.
///
/// A string field takes the map value as is. Otherwise the hook, when
/// present, produces the new value, which must already fit the field;
/// without a hook the map value is coerced into the field's kind.
pub fn fill_record<R: Record>(map: &FlatMap, record: &mut R, options: &MapOptions) -> Result<()> {
    let fields = fields::<R>(&options.tag);
    debug!(record = R::NAME, tag = %options.tag, fields = fields.len(), "filling record");

    for field in &fields {
        let input = match map.get(field.name) {
            Some(input) => input,
            None => {
                trace!(field = field.name, "no map entry, skipping");
                continue;
            }
        };
        if let Err(err) = assign(record, field, input, options) {
            debug!(record = R::NAME, field = field.name, error = %err, "record fill aborted");
            return Err(err);
        }
    }
    Ok(())
}

fn assign<R: Record>(
    record: &mut R,
    field: &FieldDescriptor,
    input: &str,
    options: &MapOptions,
) -> Result<()> {
    let name = field.name;
    let slot = record
        .field_mut(name)
        .ok_or_else(|| missing_accessor::<R>(name))?;
    let from = Value::String(input.to_string());

    match &field.kind {
        Kind::String => {
            trace!(field = name, "string field, assigning directly");
            return slot.store(from).map_err(|err| err.in_field(name));
        }
        Kind::Unsupported(kind) => return Err(Error::unsupported(name, kind)),
        _ => {}
    }

    let mut current = slot.load().map_err(|err| err.in_field(name))?;

    if let Some(hook) = &options.hook {
        trace!(field = name, "calling hook");
        let out = hook
            .call(&from, &current, &field.tags)
            .map_err(|err| err.in_field(name))?;
        if !field.kind.accepts(&out) {
            return Err(Error::type_mismatch(name, &field.kind, out.type_name()));
        }
        return slot.store(out).map_err(|err| err.in_field(name));
    }

    decode(name, &from, &field.kind, &mut current)?;
    slot.store(current).map_err(|err| err.in_field(name))
}

fn missing_accessor<R: Record>(name: &str) -> Error {
    Error::precondition(format!("{} has no accessor for field '{}'", R::NAME, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FieldDef, Slot};
    use crate::{Record, TagSpec};

    #[derive(Record, Debug, Default, PartialEq)]
    pub struct Line {
        #[tag(fixed = "padleft=0,len=5")]
        pub id: u32,
        #[tag(fixed = "padright,len=6")]
        pub name: String,
        pub active: bool,
        pub score: Option<f64>,
    }

    fn fixed() -> MapOptions {
        MapOptions::new("fixed")
    }

    #[test]
    fn test_fill_map_pads_tagged_fields() {
        let line = Line {
            id: 42,
            name: "ab".to_string(),
            active: true,
            score: Some(1.5),
        };
        let mut map = FlatMap::new();
        fill_map(Some(&line), &mut map, &fixed()).unwrap();

        assert_eq!(map.get("id"), Some("00042"));
        assert_eq!(map.get("name"), Some("ab    "));
        assert_eq!(map.get("active"), Some("1"));
        assert_eq!(map.get("score"), Some("1.5"));
    }

    #[test]
    fn test_fill_map_none_is_noop() {
        let mut map = FlatMap::new();
        map.insert("keep", "me");
        fill_map::<Line>(None, &mut map, &fixed()).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_empty_optional_without_hook_fails() {
        let line = Line::default();
        let mut map = FlatMap::new();
        let err = fill_map(Some(&line), &mut map, &fixed()).unwrap_err();
        assert_eq!(err.field(), Some("score"));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_fill_record_coerces() {
        let map: FlatMap = [
            ("id", "00042"),
            ("name", "ab"),
            ("active", "t"),
            ("score", ""),
        ]
        .into_iter()
        .collect();
        let mut line = Line::default();
        fill_record(&map, &mut line, &fixed()).unwrap();

        // leading zero reads as octal
        assert_eq!(line.id, 34);
        assert_eq!(line.name, "ab");
        assert!(line.active);
        assert_eq!(line.score, Some(0.0));
    }

    #[test]
    fn test_fill_record_hook_output_must_fit() {
        let options = fixed().with_hook(|_: &Value, _: &Value, _: &TagSpec| -> Result<Value> {
            Ok(Value::from("nope"))
        });
        let map: FlatMap = [("active", "1")].into_iter().collect();
        let mut line = Line::default();
        let err = fill_record(&map, &mut line, &options).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert!(!line.active);
    }

    struct Broken {
        value: i32,
    }

    impl Record for Broken {
        const NAME: &'static str = "Broken";
        const FIELDS: &'static [FieldDef] = &[FieldDef {
            name: "value",
            kind: <i32 as crate::Scalar>::kind,
            annotations: &[],
        }];

        fn field(&self, _name: &str) -> Option<&dyn Slot> {
            None
        }

        fn field_mut(&mut self, _name: &str) -> Option<&mut dyn Slot> {
            None
        }
    }

    #[test]
    fn test_missing_accessor_is_fatal() {
        let mut broken = Broken { value: 1 };
        let map: FlatMap = [("value", "2")].into_iter().collect();
        let err = fill_record(&map, &mut broken, &MapOptions::default()).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(broken.value, 1);

        let err = fill_map(Some(&broken), &mut FlatMap::new(), &MapOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }
}
