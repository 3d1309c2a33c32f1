//! Fixed-width padding driven by field tags.
//!
//! A field tagged `padleft` or `padright` is converted to its string form
//! and padded to the width given by `len`, or by the inclusive `start`/`end`
//! range. The tag value picks the pad character; a flag or anything that is
//! not exactly one byte long pads with spaces.
//!
//! ```rust
//! use serde_flatmap::format::format;
//! use serde_flatmap::{TagSpec, Value};
//!
//! let tags = TagSpec::parse("padleft=0,len=10");
//! let out = format("id", &Value::Int(10), &tags).unwrap();
//! assert_eq!(out, Value::from("0000000010"));
//!
//! let tags = TagSpec::parse("padright,start=5,end=9");
//! let out = format("code", &Value::from("ab"), &tags).unwrap();
//! assert_eq!(out, Value::from("ab   "));
//! ```

use crate::coerce::stringify;
use crate::tag::{END, FLAG, LEN, PAD_LEFT, PAD_RIGHT, START};
use crate::{Error, Result, TagSpec, Value};
use tracing::trace;

/// Pads `from` according to `tags`.
///
/// Values without a padding tag, and values with no string form, are
/// returned unchanged. A padding tag without a usable width is a fatal
/// [`Error::Config`].
pub fn format(name: &str, from: &Value, tags: &TagSpec) -> Result<Value> {
    let s = match stringify(name, from) {
        Ok(s) => s,
        Err(err) => {
            trace!(field = name, error = %err, "value has no string form, skipping format");
            return Ok(from.clone());
        }
    };

    if let Some(pad) = tags.get(PAD_LEFT) {
        let padding = fill(&s, pad, field_len(name, tags)?);
        Ok(Value::String(padding + &s))
    } else if let Some(pad) = tags.get(PAD_RIGHT) {
        let padding = fill(&s, pad, field_len(name, tags)?);
        Ok(Value::String(s + &padding))
    } else {
        Ok(from.clone())
    }
}

fn fill(s: &str, pad: &str, len: usize) -> String {
    pad_unit(pad).repeat(len.saturating_sub(s.len()))
}

/// The pad character named by a tag value.
fn pad_unit(value: &str) -> &str {
    if value == FLAG || value.len() != 1 {
        " "
    } else {
        value
    }
}

/// Target width from `len`, or from the inclusive `start`..`end` range.
/// Negative widths pad nothing.
fn field_len(name: &str, tags: &TagSpec) -> Result<usize> {
    let len = if let Some(len) = tags.get(LEN) {
        parse_width(name, LEN, len)?
    } else {
        match (tags.get(START), tags.get(END)) {
            (Some(start), Some(end)) => {
                let start = parse_width(name, START, start)?;
                let end = parse_width(name, END, end)?;
                end.saturating_sub(start).saturating_add(1)
            }
            _ => return Err(Error::config(name, "missing 'start' and 'end' OR 'len' tag")),
        }
    };
    Ok(usize::try_from(len).unwrap_or(0))
}

fn parse_width(name: &str, key: &str, value: &str) -> Result<i64> {
    value
        .parse::<i64>()
        .map_err(|err| Error::config(name, format!("invalid '{}' tag {:?}: {}", key, value, err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(value: impl Into<Value>, tags: &str) -> Result<Value> {
        format("f", &value.into(), &TagSpec::parse(tags))
    }

    fn pad(value: impl Into<Value>, tags: &str) -> Value {
        padded(value, tags).unwrap()
    }

    #[test]
    fn test_padleft_with_spaces() {
        let out = padded("abc", "padleft,len=10").unwrap();
        assert_eq!(out, Value::from("       abc"));
    }

    #[test]
    fn test_pad_characters() {
        assert_eq!(pad("abc", "padleft=0,len=5"), Value::from("00abc"));
        assert_eq!(pad("abc", "padright=*,len=5"), Value::from("abc**"));
        assert_eq!(pad("abc", "padright=ab,len=5"), Value::from("abc  "));
        assert_eq!(pad("abc", "padright=,len=5"), Value::from("abc  "));
    }

    #[test]
    fn test_padleft_wins() {
        let out = padded("x", "padright=-,padleft=0,len=3").unwrap();
        assert_eq!(out, Value::from("00x"));
    }

    #[test]
    fn test_numbers_are_stringified() {
        assert_eq!(pad(10, "padleft=0,len=10"), Value::from("0000000010"));
        assert_eq!(pad(true, "padleft=0,len=3"), Value::from("001"));
        assert_eq!(pad(1.5, "padright=0,len=4"), Value::from("1.50"));
    }

    #[test]
    fn test_start_end_range() {
        assert_eq!(pad("ab", "padright,start=1,end=4"), Value::from("ab  "));
        assert_eq!(pad("ab", "padleft,start=4,end=1"), Value::from("ab"));
    }

    #[test]
    fn test_long_values_are_not_truncated() {
        assert_eq!(pad("abcdef", "padleft,len=3"), Value::from("abcdef"));
    }

    #[test]
    fn test_no_pad_tag_is_passthrough() {
        assert_eq!(pad(7, "len=10"), Value::Int(7));
        assert_eq!(pad(Value::Null, "padleft,len=3"), Value::Null);
    }

    #[test]
    fn test_missing_width_is_fatal() {
        let err = padded("abc", "padleft").unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(
            err.to_string(),
            "cannot format field f: missing 'start' and 'end' OR 'len' tag"
        );
        assert!(padded("abc", "padright,start=1").unwrap_err().is_fatal());
        assert!(padded("abc", "padright,len=ten").unwrap_err().is_fatal());
    }
}
