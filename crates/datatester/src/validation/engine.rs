//! Recursive validation driver and the rules common to every descriptor
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::config::TesterOptions;
use crate::error::SchemaError;
use crate::resolve::{resolve, resolve_or};
use crate::validation::context::ValidationContext;
use crate::validation::report::{ValidationError, ValidationErrors};
use crate::validation::rules;
use crate::value::{classify, Kind, Map, Value};
use log::trace;

/// One validation pass over a (data, schema) pair
pub(crate) struct Engine<'a> {
    errors: &'a mut ValidationErrors,
    options: &'a TesterOptions,
}

impl<'a> Engine<'a> {
    pub(crate) fn new(errors: &'a mut ValidationErrors, options: &'a TesterOptions) -> Self {
        Self { errors, options }
    }

    /// Validate `data` against a schema node
    ///
    /// A descriptor object is applied directly. A generator function is invoked
    /// once with `data` and must produce a descriptor.
    pub(crate) fn recursive_test(
        &mut self,
        data: Option<&Value>,
        schema: &Value,
        ctx: &ValidationContext,
    ) -> Result<(), SchemaError> {
        match schema {
            Value::Object(descriptor) => self.test_descriptor(data, descriptor, ctx),
            Value::Function(generator) => {
                trace!("resolving generator schema at {}", ctx.path);
                match generator.call(data) {
                    Some(Value::Object(descriptor)) => self.test_descriptor(data, &descriptor, ctx),
                    other => Err(SchemaError::InvalidSchemaNode {
                        path: ctx.path.clone(),
                        found: classify(other.as_ref()),
                    }),
                }
            }
            other => Err(SchemaError::InvalidSchemaNode {
                path: ctx.path.clone(),
                found: other.kind(),
            }),
        }
    }

    fn test_descriptor(
        &mut self,
        data: Option<&Value>,
        descriptor: &Map,
        ctx: &ValidationContext,
    ) -> Result<(), SchemaError> {
        if !self.test_common(data, descriptor, ctx)? {
            return Ok(());
        }

        let Some(value) = data else {
            return Ok(());
        };

        match rules::rule_group(value.kind()) {
            Some(group) => group(self, value, descriptor, ctx),
            None => Ok(()),
        }
    }

    /// `required`, `type`, `canBeNull` and `fn`
    ///
    /// Returns `false` when the particle is absent and not required, in which
    /// case nothing else at this node is checked.
    fn test_common(
        &mut self,
        data: Option<&Value>,
        descriptor: &Map,
        ctx: &ValidationContext,
    ) -> Result<bool, SchemaError> {
        let ty = resolve(descriptor.get("type"), data);
        let can_be_null = resolve_or(descriptor.get("canBeNull"), data, Value::Bool(false));
        let required = resolve_or(descriptor.get("required"), data, Value::Bool(true));

        let required = match required.as_deref() {
            Some(Value::Bool(required)) => *required,
            None => false,
            other => return Err(SchemaError::invalid_field(&ctx.path, "required", "boolean", other)),
        };
        let can_be_null = match can_be_null.as_deref() {
            Some(Value::Bool(can_be_null)) => Some(*can_be_null),
            None => None,
            other => return Err(SchemaError::invalid_field(&ctx.path, "canBeNull", "boolean", other)),
        };

        if data.is_none() {
            if !required {
                return Ok(false);
            }
            let expected = ty.as_deref().cloned().unwrap_or_else(|| Value::from("not undefined"));
            self.record(ctx, "Required validation failed", data, expected);
        }

        if let Some(ty) = ty.as_deref() {
            self.test_type(ty, can_be_null, data, ctx)?;
        }

        if can_be_null == Some(false) && matches!(data, Some(Value::Null)) {
            let expected = ty.as_deref().cloned().unwrap_or_else(|| Value::from("not null"));
            self.record(ctx, "Value cannot be null", data, expected);
        }

        // `fn` is the predicate itself, so it is not resolved
        if let Some(predicate) = descriptor.get("fn") {
            let Value::Function(f) = predicate else {
                return Err(SchemaError::invalid_field(&ctx.path, "fn", "function", Some(predicate)));
            };
            if f.call(data) == Some(Value::Bool(false)) {
                self.record(ctx, "fn() validation failed", data, predicate.clone());
            }
        }

        Ok(true)
    }

    fn test_type(
        &mut self,
        ty: &Value,
        can_be_null: Option<bool>,
        data: Option<&Value>,
        ctx: &ValidationContext,
    ) -> Result<(), SchemaError> {
        let names: Vec<&str> = match ty {
            Value::String(name) => vec![name.as_str()],
            Value::Array(names) => names
                .iter()
                .map(|name| {
                    name.as_str().ok_or_else(|| {
                        SchemaError::invalid_field(&ctx.path, "type", "array of strings", Some(name))
                    })
                })
                .collect::<Result<_, _>>()?,
            other => {
                return Err(SchemaError::invalid_field(&ctx.path, "type", "string or array", Some(other)))
            }
        };

        let kind = classify(data);
        let valid = (can_be_null == Some(true) && kind == Kind::Null)
            || names.iter().any(|name| *name == kind.name());

        if !valid {
            self.record(ctx, "Type validation failed", data, ty.clone());
        }
        Ok(())
    }

    /// Append a finding for the particle at `ctx`
    pub(crate) fn record(
        &mut self,
        ctx: &ValidationContext,
        error: impl Into<String>,
        value: Option<&Value>,
        expected: Value,
    ) {
        let error = error.into();
        if self.options.break_on_error && !self.errors.is_empty() {
            trace!("dropping finding at {} ({}): break_on_error is set", ctx.path, error);
            return;
        }
        trace!("finding at {}: {}", ctx.path, error);
        self.errors
            .push(ValidationError::new(ctx.path.clone(), error, value.cloned(), expected));
    }
}
