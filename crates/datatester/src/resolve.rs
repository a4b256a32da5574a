//! Resolution of literal-or-computed schema fields
//!
//! Every descriptor field may be written either as a literal value or as a
//! function of the data particle being tested. All rules read their fields
//! through [`resolve`] or [`resolve_or`] so that call sites never special-case
//! computed fields.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::value::Value;
use std::borrow::Cow;

/// Resolve a schema field against a data particle
///
/// A function field is invoked with `data` and its result returned as-is,
/// including an absent result. Any other field is returned borrowed.
pub fn resolve<'a>(field: Option<&'a Value>, data: Option<&Value>) -> Option<Cow<'a, Value>> {
    match field {
        Some(Value::Function(f)) => f.call(data).map(Cow::Owned),
        literal => literal.map(Cow::Borrowed),
    }
}

/// Like [`resolve`], but an absent field yields `default`
///
/// The default only replaces a missing field; a function that returns
/// nothing still resolves to `None`.
pub fn resolve_or<'a>(
    field: Option<&'a Value>,
    data: Option<&Value>,
    default: Value,
) -> Option<Cow<'a, Value>> {
    match field {
        None => Some(Cow::Owned(default)),
        present => resolve(present, data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_is_borrowed() {
        let field = Value::from(10);
        let resolved = resolve(Some(&field), None);
        assert!(matches!(resolved, Some(Cow::Borrowed(_))));
        assert_eq!(resolved.as_deref(), Some(&Value::from(10)));
    }

    #[test]
    fn test_function_receives_data() {
        let field = Value::computed(|data| {
            data.and_then(|d| d.get("limit")).cloned().unwrap_or(Value::Null)
        });
        let data = Value::from(serde_json::json!({"limit": 3}));
        assert_eq!(resolve(Some(&field), Some(&data)).as_deref(), Some(&Value::from(3)));
    }

    #[test]
    fn test_default_only_for_missing_field() {
        assert_eq!(resolve_or(None, None, Value::Bool(true)).as_deref(), Some(&Value::Bool(true)));

        let absent = Value::function(|_| None);
        assert_eq!(resolve_or(Some(&absent), None, Value::Bool(true)), None);

        let literal = Value::Bool(false);
        assert_eq!(
            resolve_or(Some(&literal), None, Value::Bool(true)).as_deref(),
            Some(&Value::Bool(false))
        );
    }

    #[test]
    fn test_missing_field_without_default() {
        assert_eq!(resolve(None, Some(&Value::Null)), None);
    }
}
