//! Writing and reading a fixed-width flat file.
//!
//! Each record becomes one line: its fields are padded to their column width
//! and concatenated in declaration order. Reading slices the columns back out
//! and strips the padding in a hook before the built-in coercion would see it.
//!
//! Run with: cargo run --example fixed_width

use serde_flatmap::{
    fields_of, from_map_with_options, to_map, FlatMap, MapOptions, Record, TagSpec, Value,
};
use std::error::Error;

#[derive(Debug, Default, PartialEq, Record)]
pub struct Payment {
    #[tag(fixed = "padleft=0,start=1,end=6")]
    pub id: u32,
    #[tag(fixed = "padright,start=7,end=22")]
    pub payee: String,
    #[tag(fixed = "padleft,start=23,end=32")]
    pub amount: f64,
    #[tag(fixed = "padleft,len=1")]
    pub urgent: bool,
}

/// Joins the padded columns of a record into one line.
fn write_line(payment: &Payment) -> serde_flatmap::Result<String> {
    let map = to_map(payment, "fixed")?;
    Ok(map.values().map(String::as_str).collect())
}

/// Cuts a line back into columns using each field's width.
fn split_line(line: &str) -> FlatMap {
    let mut map = FlatMap::new();
    let mut offset = 0;
    for field in fields_of::<Payment>("fixed") {
        let width = match (
            field.tags.get("len"),
            field.tags.get("start"),
            field.tags.get("end"),
        ) {
            (Some(len), _, _) => len.parse().unwrap_or(0),
            (None, Some(start), Some(end)) => {
                let start: usize = start.parse().unwrap_or(0);
                let end: usize = end.parse().unwrap_or(0);
                end + 1 - start
            }
            _ => 0,
        };
        let end = (offset + width).min(line.len());
        map.insert(field.name, &line[offset..end]);
        offset = end;
    }
    map
}

/// Strips column padding and parses decimal, so zero-padded ids stay decimal.
fn unpad(from: &Value, to: &Value, tags: &TagSpec) -> serde_flatmap::Result<Value> {
    let raw = from.as_str().unwrap_or_default();
    let trimmed = match tags.get("padleft") {
        Some("0") => raw.trim_start_matches('0'),
        Some(_) => raw.trim_start(),
        None => raw.trim_end(),
    };
    let bad = |e: &dyn std::fmt::Display| serde_flatmap::Error::custom(format!("{:?}: {}", raw, e));
    Ok(match to {
        Value::Uint(_) if trimmed.is_empty() => Value::Uint(0),
        Value::Uint(_) => Value::Uint(trimmed.parse().map_err(|e| bad(&e))?),
        Value::Float(_) => Value::Float(trimmed.parse().map_err(|e| bad(&e))?),
        Value::Bool(_) => Value::Bool(trimmed == "1"),
        _ => Value::from(trimmed),
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    let payments = vec![
        Payment {
            id: 1207,
            payee: "ACME Corp".to_string(),
            amount: 1520.75,
            urgent: false,
        },
        Payment {
            id: 88,
            payee: "Globex".to_string(),
            amount: 99.5,
            urgent: true,
        },
    ];

    let lines = payments
        .iter()
        .map(write_line)
        .collect::<Result<Vec<_>, _>>()?;
    println!("Flat file:");
    for line in &lines {
        println!("|{}|", line);
    }

    let options = MapOptions::new("fixed").with_hook(unpad);
    let mut parsed = Vec::new();
    for line in &lines {
        let mut payment = Payment::default();
        from_map_with_options(&split_line(line), &mut payment, &options)?;
        parsed.push(payment);
    }

    // String columns take the fast path and keep their padding.
    for payment in &mut parsed {
        payment.payee = payment.payee.trim_end().to_string();
    }
    assert_eq!(parsed, payments);
    println!("\n✓ Read back {} records", parsed.len());

    Ok(())
}
