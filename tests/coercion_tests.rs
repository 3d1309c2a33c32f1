//! Conformance tests for the coercion table, checked both directly and
//! through record fields of every supported width.

use serde_flatmap::coerce::{decode, format_float, parse_bool, stringify};
use serde_flatmap::{flatmap, from_map, to_map, Error, FloatWidth, IntWidth, Kind, Record, Value};

#[derive(Record, Debug, Default, PartialEq)]
pub struct Widths {
    pub i8_: i8,
    pub i16_: i16,
    pub i32_: i32,
    pub i64_: i64,
    pub u8_: u8,
    pub u16_: u16,
    pub u32_: u32,
    pub u64_: u64,
    pub f32_: f32,
    pub f64_: f64,
}

fn decode_fresh(from: Value, kind: &Kind) -> serde_flatmap::Result<Value> {
    let mut to = kind.zero();
    decode("field", &from, kind, &mut to)?;
    Ok(to)
}

fn decoded(from: impl Into<Value>, kind: &Kind) -> Value {
    decode_fresh(from.into(), kind).unwrap()
}

#[test]
fn test_bool_literals() {
    for s in ["1", "t", "T", "TRUE", "true", "True"] {
        assert_eq!(parse_bool(s), Some(true), "{}", s);
    }
    for s in ["0", "f", "F", "FALSE", "false", "False"] {
        assert_eq!(parse_bool(s), Some(false), "{}", s);
    }
    for s in ["", "yes", "tRUE", " true", "2"] {
        assert_eq!(parse_bool(s), None, "{}", s);
    }
}

#[test]
fn test_bool_target() {
    assert_eq!(decoded("", &Kind::Bool), Value::Bool(false));
    assert_eq!(decoded("true", &Kind::Bool), Value::Bool(true));
    assert_eq!(decoded("1", &Kind::Bool), Value::Bool(true));
    assert_eq!(decoded(Value::Int(2), &Kind::Bool), Value::Bool(true));
    assert_eq!(decoded(Value::Int(0), &Kind::Bool), Value::Bool(false));

    let err = decode_fresh(Value::from("nope"), &Kind::Bool).unwrap_err();
    assert!(matches!(err, Error::Parse { kind: "bool", .. }));
    assert_eq!(err.field(), Some("field"));
}

#[test]
fn test_int_target_by_width() {
    let cases = [
        (IntWidth::I8, "-128", Value::Int(-128)),
        (IntWidth::I16, "0x7fff", Value::Int(i16::MAX as i64)),
        (IntWidth::I32, "-0b11", Value::Int(-3)),
        (IntWidth::I64, "0o777", Value::Int(511)),
        (IntWidth::U8, "255", Value::Uint(255)),
        (IntWidth::U16, "0XFFFF", Value::Uint(65535)),
        (IntWidth::U32, "4_294_967_295", Value::Uint(u32::MAX as u64)),
        (IntWidth::U64, "", Value::Uint(0)),
    ];
    for (width, input, expected) in cases {
        let got = decode_fresh(Value::from(input), &Kind::Int(width)).unwrap();
        assert_eq!(got, expected, "{} {:?}", width, input);
    }

    let overflows = [
        (IntWidth::I8, "128"),
        (IntWidth::U16, "65536"),
        (IntWidth::I32, "0x80000000"),
    ];
    for (width, input) in overflows {
        let err = decode_fresh(Value::from(input), &Kind::Int(width)).unwrap_err();
        assert!(err.to_string().ends_with("value out of range"), "{}", err);
    }
}

#[test]
fn test_int_copies_truncate() {
    assert_eq!(
        decode_fresh(Value::Int(0x1_0000_0001), &Kind::Int(IntWidth::I32)).unwrap(),
        Value::Int(1)
    );
    assert_eq!(
        decode_fresh(Value::Bool(true), &Kind::Int(IntWidth::U8)).unwrap(),
        Value::Uint(1)
    );
}

#[test]
fn test_float_target() {
    let f32k = Kind::Float(FloatWidth::F32);
    let f64k = Kind::Float(FloatWidth::F64);
    assert_eq!(decoded("", &f64k), Value::Float(0.0));
    assert_eq!(decoded("1e3", &f64k), Value::Float(1000.0));
    assert_eq!(decoded(".5", &f64k), Value::Float(0.5));
    assert_eq!(decoded(Value::Int(3), &f64k), Value::Float(3.0));
    assert_eq!(decoded(Value::Bool(false), &f64k), Value::Float(0.0));

    let err = decode_fresh(Value::from("3.4028236e38"), &f32k).unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot parse 'field' as float: parsing \"3.4028236e38\": value out of range"
    );
    match decoded("nan", &f64k) {
        Value::Float(f) => assert!(f.is_nan()),
        other => panic!("expected float, got {:?}", other),
    }
    assert!(decode_fresh(Value::from("0x1p-2"), &f64k).is_err());
}

#[test]
fn test_string_target() {
    assert_eq!(stringify("f", &Value::Bool(true)).unwrap(), "1");
    let min = stringify("f", &Value::Int(i64::MIN)).unwrap();
    assert_eq!(min, "-9223372036854775808");
    assert_eq!(format_float(0.1), "0.1");
    assert_eq!(format_float(-0.0), "-0");
    assert_eq!(format_float(123456789.125), "123456789.125");
    assert_eq!(format_float(f64::NEG_INFINITY), "-Inf");

    let err = decode_fresh(Value::Null, &Kind::String).unwrap_err();
    assert_eq!(
        err.to_string(),
        "'field' expected type 'string', got unconvertible type 'null', value: 'null'"
    );
}

#[test]
fn test_unconvertible_pairs() {
    let pairs = [
        (Value::Float(1.0), Kind::Bool),
        (Value::Null, Kind::Bool),
        (Value::Float(1.0), Kind::Int(IntWidth::I64)),
        (Value::Null, Kind::Float(FloatWidth::F32)),
    ];
    for (from, kind) in pairs {
        let err = decode_fresh(from.clone(), &kind).unwrap_err();
        let unconvertible = matches!(err, Error::Unconvertible { .. });
        assert!(unconvertible, "{:?} -> {}", from, kind);
    }
}

#[test]
fn test_optional_target_keeps_inner_rules() {
    let kind = Kind::Optional(Box::new(Kind::Bool));
    assert_eq!(decoded("", &kind), Value::Bool(false));
    assert_eq!(decoded(Value::Null, &kind), Value::Null);
    assert!(decode_fresh(Value::from("x"), &kind).is_err());
}

#[test]
fn test_record_widths_round_trip() {
    let record = Widths {
        i8_: i8::MIN,
        i16_: i16::MAX,
        i32_: -70000,
        i64_: i64::MAX,
        u8_: u8::MAX,
        u16_: 1,
        u32_: u32::MAX,
        u64_: u64::MAX,
        f32_: 0.1,
        f64_: -2.5e-8,
    };
    let map = to_map(&record, "").unwrap();
    assert_eq!(map.get("f32_"), Some("0.10000000149011612"));
    assert_eq!(map.get("f64_"), Some("-0.000000025"));

    let mut back = Widths::default();
    from_map(&map, &mut back, "").unwrap();
    assert_eq!(back, record);
}

#[test]
fn test_record_empty_strings_are_zero() {
    let mut record = Widths {
        i8_: 1,
        f64_: 1.0,
        ..Widths::default()
    };
    from_map(&flatmap! { "i8_" => "", "f64_" => "" }, &mut record, "").unwrap();
    assert_eq!(record.i8_, 0);
    assert_eq!(record.f64_, 0.0);
}

#[test]
fn test_record_range_errors_keep_field() {
    let mut record = Widths {
        u8_: 7,
        ..Widths::default()
    };
    let err = from_map(&flatmap! { "u8_" => "-1" }, &mut record, "").unwrap_err();
    assert_eq!(err.field(), Some("u8_"));
    assert_eq!(record.u8_, 7);
}
