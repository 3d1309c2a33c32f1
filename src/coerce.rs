//! Scalar coercion.
//!
//! [`decode`] converts a source [`Value`] into the value a field of a given
//! [`Kind`] should hold, writing into `to`. Dispatch happens once per target
//! kind:
//!
//! | target | accepted sources | rule |
//! |---|---|---|
//! | bool | bool, int, string | copy; `!= 0`; boolean literal, `""` is `false` |
//! | int | int, bool, string | truncate to width; `1`/`0`; `""` is `0`, prefixed literal |
//! | float | float, int, bool, string | round to width; widen; `1.0`/`0.0`; `""` is `0` |
//! | string | string, bool, int, float | copy; `"1"`/`"0"`; decimal; shortest decimal |
//! | `Option<K>` | anything | null clears, otherwise decodes into the inner value |
//! | any | anything | decodes by the held value's kind, or takes the source when empty |
//!
//! Every other pair is an error, and `to` is only written on success.
//!
//! ```rust
//! use serde_flatmap::coerce::decode;
//! use serde_flatmap::{IntWidth, Kind, Value};
//!
//! let mut to = Value::Int(0);
//! decode("count", &Value::from("0x1F"), &Kind::Int(IntWidth::I32), &mut to).unwrap();
//! assert_eq!(to, Value::Int(31));
//!
//! let mut flag = Value::Bool(true);
//! decode("flag", &Value::from(""), &Kind::Bool, &mut flag).unwrap();
//! assert_eq!(flag, Value::Bool(false));
//! ```

use crate::value::{FloatWidth, IntWidth};
use crate::{Error, Kind, Result, Value};
use std::fmt;

const INVALID_SYNTAX: &str = "invalid syntax";
const OUT_OF_RANGE: &str = "value out of range";

/// Converts `from` into a value of `kind`, storing it in `to`.
///
/// `to` holds the destination's current value; optional and any kinds
/// decode into it rather than replacing it outright.
pub fn decode(name: &str, from: &Value, kind: &Kind, to: &mut Value) -> Result<()> {
    match kind {
        Kind::Bool => decode_bool(name, from, to),
        Kind::Any => decode_any(name, from, to),
        Kind::String => decode_string(name, from, to),
        Kind::Int(width) => decode_int(name, from, *width, to),
        Kind::Float(width) => decode_float(name, from, *width, to),
        Kind::Optional(inner) => decode_optional(name, from, inner, to),
        Kind::Unsupported(kind) => Err(Error::unsupported(name, kind)),
    }
}

fn unconvertible(name: &str, expected: impl fmt::Display, from: &Value) -> Error {
    Error::unconvertible(name, expected, from.type_name(), from)
}

fn decode_bool(name: &str, from: &Value, to: &mut Value) -> Result<()> {
    let b = match from {
        Value::Bool(b) => *b,
        Value::Int(i) => *i != 0,
        Value::Uint(u) => *u != 0,
        Value::String(s) => match parse_bool(s) {
            Some(b) => b,
            None if s.is_empty() => false,
            None => return Err(Error::parse(name, "bool", s, INVALID_SYNTAX)),
        },
        other => return Err(unconvertible(name, Kind::Bool, other)),
    };
    *to = Value::Bool(b);
    Ok(())
}

fn decode_string(name: &str, from: &Value, to: &mut Value) -> Result<()> {
    *to = Value::String(stringify(name, from)?);
    Ok(())
}

fn decode_int(name: &str, from: &Value, width: IntWidth, to: &mut Value) -> Result<()> {
    *to = match from {
        Value::Int(i) => width.wrap_i64(*i),
        Value::Uint(u) => width.wrap_u64(*u),
        Value::Bool(b) => width.wrap_i64(i64::from(*b)),
        Value::String(s) if s.is_empty() => parse_int(name, "0", width)?,
        Value::String(s) => parse_int(name, s, width)?,
        other => return Err(unconvertible(name, width, other)),
    };
    Ok(())
}

fn decode_float(name: &str, from: &Value, width: FloatWidth, to: &mut Value) -> Result<()> {
    *to = match from {
        Value::Float(f) => Value::Float(width.round(*f)),
        Value::Int(i) => Value::Float(width.round(*i as f64)),
        Value::Uint(u) => Value::Float(width.round(*u as f64)),
        Value::Bool(b) => Value::Float(if *b { 1.0 } else { 0.0 }),
        Value::String(s) if s.is_empty() => parse_float(name, "0", width)?,
        Value::String(s) => parse_float(name, s, width)?,
        other => return Err(unconvertible(name, width, other)),
    };
    Ok(())
}

fn decode_optional(name: &str, from: &Value, inner: &Kind, to: &mut Value) -> Result<()> {
    if from.is_null() {
        *to = Value::Null;
        return Ok(());
    }
    let mut slot = if to.is_null() {
        inner.zero()
    } else {
        to.clone()
    };
    decode(name, from, inner, &mut slot)?;
    *to = slot;
    Ok(())
}

fn decode_any(name: &str, from: &Value, to: &mut Value) -> Result<()> {
    match to.kind() {
        Some(held) => {
            let mut copy = to.clone();
            decode(name, from, &held, &mut copy)?;
            *to = copy;
        }
        None => *to = from.clone(),
    }
    Ok(())
}

/// The string form of a scalar, as produced by the string rule of [`decode`].
///
/// ```rust
/// use serde_flatmap::coerce::stringify;
/// use serde_flatmap::Value;
///
/// assert_eq!(stringify("f", &Value::Bool(true)).unwrap(), "1");
/// assert_eq!(stringify("f", &Value::Float(0.5)).unwrap(), "0.5");
/// assert!(stringify("f", &Value::Null).is_err());
/// ```
pub fn stringify(name: &str, from: &Value) -> Result<String> {
    match from {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(true) => Ok("1".to_string()),
        Value::Bool(false) => Ok("0".to_string()),
        Value::Int(i) => Ok(i.to_string()),
        Value::Uint(u) => Ok(u.to_string()),
        Value::Float(f) => Ok(format_float(*f)),
        other => Err(unconvertible(name, Kind::String, other)),
    }
}

/// Shortest decimal digits that read back as `f`, never in exponent form.
#[must_use]
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f == f64::INFINITY {
        "+Inf".to_string()
    } else if f == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        f.to_string()
    }
}

/// Parses a boolean literal: `1 t T TRUE true True` or `0 f F FALSE false False`.
#[must_use]
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Parses an integer literal into the given width.
///
/// Accepts an optional sign (signed widths only), a `0x`, `0o` or `0b`
/// prefix, a bare leading `0` for octal, and `_` between digits.
///
/// ```rust
/// use serde_flatmap::coerce::parse_int;
/// use serde_flatmap::{IntWidth, Value};
///
/// assert_eq!(parse_int("n", "-0x10", IntWidth::I16).unwrap(), Value::Int(-16));
/// assert_eq!(parse_int("n", "017", IntWidth::U8).unwrap(), Value::Uint(15));
/// assert!(parse_int("n", "256", IntWidth::U8).is_err());
/// ```
pub fn parse_int(name: &str, input: &str, width: IntWidth) -> Result<Value> {
    let syntax = || Error::parse(name, "int", input, INVALID_SYNTAX);
    let range = || Error::parse(name, "int", input, OUT_OF_RANGE);

    let (negative, unsigned) = match input.as_bytes().first() {
        Some(b'+') => (false, &input[1..]),
        Some(b'-') => (true, &input[1..]),
        _ => (false, input),
    };
    if unsigned.len() != input.len() && !width.is_signed() {
        return Err(syntax());
    }

    let (radix, digits, prefixed) = split_radix(unsigned);
    if digits.is_empty() {
        return Err(syntax());
    }

    let mut magnitude: u64 = 0;
    for c in digits.chars().filter(|c| *c != '_') {
        let digit = c.to_digit(radix).ok_or_else(syntax)?;
        magnitude = magnitude
            .checked_mul(u64::from(radix))
            .and_then(|m| m.checked_add(u64::from(digit)))
            .ok_or_else(range)?;
    }
    if !underscores_ok(digits, prefixed, radix == 16) {
        return Err(syntax());
    }

    let max = width.max_magnitude();
    match (width.is_signed(), negative) {
        (true, true) if magnitude <= max + 1 => Ok(Value::Int((-(magnitude as i128)) as i64)),
        (true, false) if magnitude <= max => Ok(Value::Int(magnitude as i64)),
        (false, _) if magnitude <= max => Ok(Value::Uint(magnitude)),
        _ => Err(range()),
    }
}

/// Splits a base prefix off an unsigned literal: `(radix, digits, prefixed)`.
fn split_radix(s: &str) -> (u32, &str, bool) {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return (10, s, false);
    }
    match bytes[1] {
        b'x' | b'X' => (16, &s[2..], true),
        b'o' | b'O' => (8, &s[2..], true),
        b'b' | b'B' => (2, &s[2..], true),
        _ => (8, &s[1..], true),
    }
}

/// Underscores may only sit between digits, or right after a base prefix.
fn underscores_ok(s: &str, prefixed: bool, hex: bool) -> bool {
    // '0': last was a digit or prefix, '_': an underscore, '!': anything else
    let mut saw = if prefixed { '0' } else { '^' };
    for c in s.chars() {
        if c.is_ascii_digit() || (hex && c.is_ascii_hexdigit()) {
            saw = '0';
        } else if c == '_' {
            if saw != '0' {
                return false;
            }
            saw = '_';
        } else {
            if saw == '_' {
                return false;
            }
            saw = '!';
        }
    }
    saw != '_'
}

/// Parses a decimal float literal at the given width.
///
/// `inf`, `infinity` and `nan` are accepted in any case. A finite literal
/// that overflows the width is out of range. Hexadecimal mantissas such as
/// `0x1p-2` are rejected as invalid syntax.
pub fn parse_float(name: &str, input: &str, width: FloatWidth) -> Result<Value> {
    let syntax = || Error::parse(name, "float", input, INVALID_SYNTAX);

    let body = strip_sign(input);
    if input.contains('_') && !underscores_ok(body, false, false) {
        return Err(syntax());
    }
    let cleaned = input.replace('_', "");

    let parsed = match width {
        FloatWidth::F32 => cleaned.parse::<f32>().map(f64::from),
        FloatWidth::F64 => cleaned.parse::<f64>(),
    }
    .map_err(|_| syntax())?;

    if parsed.is_infinite() && !is_inf_literal(strip_sign(&cleaned)) {
        return Err(Error::parse(name, "float", input, OUT_OF_RANGE));
    }
    Ok(Value::Float(parsed))
}

fn strip_sign(s: &str) -> &str {
    s.strip_prefix(|c| c == '+' || c == '-').unwrap_or(s)
}

fn is_inf_literal(s: &str) -> bool {
    s.eq_ignore_ascii_case("inf") || s.eq_ignore_ascii_case("infinity")
}
