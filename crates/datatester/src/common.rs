//! Reusable schema fragments
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::value::{Map, Value};
use std::sync::LazyLock;

/// `{type: "number", min: 0}`
pub static POSITIVE_NUMBER: LazyLock<Value> = LazyLock::new(positive_number);

/// `{type: "string", fn: <non-empty after trimming>}`
pub static NOT_EMPTY_STRING: LazyLock<Value> = LazyLock::new(not_empty_string);

/// A fresh copy of [`POSITIVE_NUMBER`]
pub fn positive_number() -> Value {
    Map::new().with("type", "number").with("min", 0).into()
}

/// A fresh copy of [`NOT_EMPTY_STRING`]; the predicate is a new function each call
pub fn not_empty_string() -> Value {
    Map::new()
        .with("type", "string")
        .with(
            "fn",
            Value::predicate(|data| {
                data.and_then(Value::as_str)
                    .is_some_and(|s| !s.trim().is_empty())
            }),
        )
        .into()
}

/// Look up a fragment by its schema-facing name
pub fn get(name: &str) -> Option<&'static Value> {
    match name {
        "positiveNumber" => Some(&*POSITIVE_NUMBER),
        "notEmptyString" => Some(&*NOT_EMPTY_STRING),
        _ => None,
    }
}
