//! Duplicate detection over arrays of primitive values
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::SchemaError;
use crate::value::Value;
use std::collections::HashMap;

/// Hashable identity of a primitive value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum PrimitiveKey<'a> {
    Null,
    Bool(bool),
    Number(u64),
    String(&'a str),
}

impl<'a> PrimitiveKey<'a> {
    fn of(value: &'a Value) -> Option<Self> {
        match value {
            Value::Null => Some(PrimitiveKey::Null),
            Value::Bool(b) => Some(PrimitiveKey::Bool(*b)),
            Value::Number(n) => Some(PrimitiveKey::Number(number_bits(*n))),
            Value::String(s) => Some(PrimitiveKey::String(s)),
            _ => None,
        }
    }
}

/// `-0` collapses onto `0` and every NaN onto one canonical NaN
fn number_bits(n: f64) -> u64 {
    if n == 0.0 {
        0.0f64.to_bits()
    } else if n.is_nan() {
        f64::NAN.to_bits()
    } else {
        n.to_bits()
    }
}

/// Values occurring more than once in `items`, each listed once in order of first occurrence
///
/// A duplicate is reported in the form it first appeared in. Only primitives
/// can be compared; any other element is a schema error.
pub(crate) fn find_duplicates<'a>(items: &'a [Value], path: &str) -> Result<Vec<&'a Value>, SchemaError> {
    let mut counts: HashMap<PrimitiveKey<'a>, usize> = HashMap::with_capacity(items.len());
    let mut first_seen = Vec::new();

    for item in items {
        let key = PrimitiveKey::of(item).ok_or_else(|| SchemaError::NonPrimitiveDuplicate {
            path: path.to_string(),
            found: item.kind(),
        })?;

        let count = counts.entry(key).or_insert(0);
        if *count == 0 {
            first_seen.push((key, item));
        }
        *count += 1;
    }

    Ok(first_seen
        .into_iter()
        .filter(|(key, _)| counts.get(key).is_some_and(|&count| count > 1))
        .map(|(_, item)| item)
        .collect())
}

/// Comma-joined display form used in finding messages
pub(crate) fn render(duplicates: &[&Value]) -> String {
    duplicates
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
