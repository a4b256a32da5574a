//! Kind-specific rule groups
//!
//! Each group reads its descriptor fields through the resolver, checks the
//! field types and records at most one finding per rule. Array and object
//! groups recurse back into the engine for elements and properties.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::SchemaError;
use crate::resolve::{resolve, resolve_or};
use crate::validation::context::ValidationContext;
use crate::validation::duplicates::{find_duplicates, render};
use crate::validation::engine::Engine;
use crate::value::{classify, Kind, Map, Value};

/// Rules for one data kind
pub(crate) type RuleGroup =
    fn(&mut Engine<'_>, &Value, &Map, &ValidationContext) -> Result<(), SchemaError>;

/// The rule group applied to data of `kind`, if any
pub(crate) fn rule_group(kind: Kind) -> Option<RuleGroup> {
    match kind {
        Kind::Boolean => Some(test_boolean as RuleGroup),
        Kind::Number => Some(test_number as RuleGroup),
        Kind::String => Some(test_string as RuleGroup),
        Kind::Array => Some(test_array as RuleGroup),
        Kind::Object => Some(test_object as RuleGroup),
        Kind::Undefined | Kind::Null | Kind::Regex | Kind::Function | Kind::Unrecognized => None,
    }
}

fn number_field(ctx: &ValidationContext, field: &str, resolved: Option<&Value>) -> Result<Option<f64>, SchemaError> {
    match resolved {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(*n)),
        other => Err(SchemaError::invalid_field(&ctx.path, field, "number", other)),
    }
}

fn test_boolean(
    engine: &mut Engine<'_>,
    data: &Value,
    descriptor: &Map,
    ctx: &ValidationContext,
) -> Result<(), SchemaError> {
    let Value::Bool(actual) = data else {
        return Ok(());
    };
    let value = resolve(descriptor.get("value"), Some(data));

    match value.as_deref() {
        None => {}
        Some(Value::Bool(expected)) => {
            if actual != expected {
                engine.record(ctx, "Value validation failed", Some(data), Value::Bool(*expected));
            }
        }
        other => return Err(SchemaError::invalid_field(&ctx.path, "value", "boolean", other)),
    }
    Ok(())
}

fn test_number(
    engine: &mut Engine<'_>,
    data: &Value,
    descriptor: &Map,
    ctx: &ValidationContext,
) -> Result<(), SchemaError> {
    let Value::Number(actual) = data else {
        return Ok(());
    };
    let min = resolve(descriptor.get("min"), Some(data));
    let max = resolve(descriptor.get("max"), Some(data));
    let value = resolve(descriptor.get("value"), Some(data));

    if let Some(min) = number_field(ctx, "min", min.as_deref())? {
        if *actual < min {
            engine.record(ctx, "Min value validation failed", Some(data), Value::Number(min));
        }
    }

    if let Some(max) = number_field(ctx, "max", max.as_deref())? {
        if *actual > max {
            engine.record(ctx, "Max value validation failed", Some(data), Value::Number(max));
        }
    }

    if let Some(expected) = number_field(ctx, "value", value.as_deref())? {
        if *actual != expected {
            engine.record(ctx, "Value validation failed", Some(data), Value::Number(expected));
        }
    }
    Ok(())
}

fn test_string(
    engine: &mut Engine<'_>,
    data: &Value,
    descriptor: &Map,
    ctx: &ValidationContext,
) -> Result<(), SchemaError> {
    let Value::String(actual) = data else {
        return Ok(());
    };
    let pattern = resolve(descriptor.get("pattern"), Some(data));
    let value = resolve(descriptor.get("value"), Some(data));

    match pattern.as_deref() {
        None => {}
        Some(Value::Regex(re)) => {
            if !re.is_match(actual) {
                engine.record(ctx, "Pattern validation failed", Some(data), Value::Regex(re.clone()));
            }
        }
        other => return Err(SchemaError::invalid_field(&ctx.path, "pattern", "regex", other)),
    }

    match value.as_deref() {
        None => {}
        Some(Value::String(expected)) => {
            if actual != expected {
                engine.record(ctx, "Value validation failed", Some(data), Value::String(expected.clone()));
            }
        }
        other => return Err(SchemaError::invalid_field(&ctx.path, "value", "string", other)),
    }
    Ok(())
}

fn test_array(
    engine: &mut Engine<'_>,
    data: &Value,
    descriptor: &Map,
    ctx: &ValidationContext,
) -> Result<(), SchemaError> {
    let Value::Array(items) = data else {
        return Ok(());
    };
    let min_length = resolve(descriptor.get("minLength"), Some(data));
    let max_length = resolve(descriptor.get("maxLength"), Some(data));
    let allow_duplicates = resolve_or(descriptor.get("allowDuplicates"), Some(data), Value::Bool(true));
    let elements = resolve(descriptor.get("elements"), Some(data));
    let length = items.len() as f64;

    if let Some(min) = number_field(ctx, "minLength", min_length.as_deref())? {
        if length < min {
            engine.record(ctx, "Minimum length validation failed", Some(data), Value::Number(min));
        }
    }

    if let Some(max) = number_field(ctx, "maxLength", max_length.as_deref())? {
        if length > max {
            engine.record(ctx, "Maximum length validation failed", Some(data), Value::Number(max));
        }
    }

    test_duplicates(engine, data, items, allow_duplicates.as_deref(), ctx)?;

    if let Some(schema) = elements.as_deref() {
        for (index, item) in items.iter().enumerate() {
            engine.recursive_test(Some(item), schema, &ctx.child_index(index))?;
        }
    }
    Ok(())
}

/// The three `allowDuplicates` modes
///
/// `false` scans the data itself, an array scans the supplied values, and an
/// object maps names to projections of the data whose results are scanned.
/// The recorded `value` differs per mode: the data, the supplied array, or the
/// projection function.
fn test_duplicates(
    engine: &mut Engine<'_>,
    data: &Value,
    items: &[Value],
    setting: Option<&Value>,
    ctx: &ValidationContext,
) -> Result<(), SchemaError> {
    let Some(setting) = setting else {
        return Err(SchemaError::invalid_field(&ctx.path, "allowDuplicates", "boolean, array or object", None));
    };

    match setting {
        Value::Bool(true) => {}
        Value::Bool(false) => {
            let duplicates = find_duplicates(items, &ctx.path)?;
            if !duplicates.is_empty() {
                let message = format!("Duplicate values validation failed. Duplicates: [{}]", render(&duplicates));
                engine.record(ctx, message, Some(data), Value::Bool(false));
            }
        }
        Value::Array(supplied) => {
            let duplicates = find_duplicates(supplied, &ctx.path)?;
            if !duplicates.is_empty() {
                let message = format!("Duplicate values validation failed. Duplicates: [{}]", render(&duplicates));
                engine.record(ctx, message, Some(setting), Value::Bool(false));
            }
        }
        Value::Object(projections) => {
            for (key, projection) in projections.iter() {
                let Value::Function(f) = projection else {
                    return Err(SchemaError::invalid_field(
                        &ctx.path,
                        format!("allowDuplicates.{}", key),
                        "function",
                        Some(projection),
                    ));
                };
                let projected = f.call(Some(data));
                let Some(Value::Array(projected_items)) = &projected else {
                    return Err(SchemaError::InvalidDuplicateProjection {
                        path: ctx.path.clone(),
                        key: key.to_string(),
                        found: classify(projected.as_ref()),
                    });
                };

                let duplicates = find_duplicates(projected_items, &ctx.path)?;
                if !duplicates.is_empty() {
                    let message = format!(
                        "Duplicate values validation failed. Duplicates for \"{}\": [{}]",
                        key,
                        render(&duplicates)
                    );
                    engine.record(ctx, message, Some(projection), Value::Bool(false));
                }
            }
        }
        other => {
            return Err(SchemaError::invalid_field(
                &ctx.path,
                "allowDuplicates",
                "boolean, array or object",
                Some(other),
            ))
        }
    }
    Ok(())
}

fn test_object(
    engine: &mut Engine<'_>,
    data: &Value,
    descriptor: &Map,
    ctx: &ValidationContext,
) -> Result<(), SchemaError> {
    let Value::Object(object) = data else {
        return Ok(());
    };
    let strict_keys = resolve(descriptor.get("strictKeys"), Some(data));
    let properties = resolve(descriptor.get("data"), Some(data));

    if let Some(strict) = strict_keys.as_deref() {
        let Value::Array(expected_keys) = strict else {
            return Err(SchemaError::invalid_field(&ctx.path, "strictKeys", "array", Some(strict)));
        };
        let keys = expected_keys
            .iter()
            .map(|key| {
                key.as_str()
                    .ok_or_else(|| SchemaError::invalid_field(&ctx.path, "strictKeys", "array of strings", Some(key)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let exact = object.len() == keys.len() && keys.iter().all(|key| object.contains_key(key));
        if !exact {
            let actual = Value::Array(object.keys().map(Value::from).collect());
            engine.record(
                ctx,
                "Strict keys validation failed. Missing or additional keys were found",
                Some(&actual),
                strict.clone(),
            );
        }
    }

    if let Some(properties) = properties.as_deref() {
        let Value::Object(schemas) = properties else {
            return Err(SchemaError::invalid_field(&ctx.path, "data", "object", Some(properties)));
        };
        for (key, schema) in schemas.iter() {
            engine.recursive_test(object.get(key), schema, &ctx.child(key))?;
        }
    }
    Ok(())
}
