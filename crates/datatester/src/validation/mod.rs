//! Schema-driven validation of data trees
//!
//! A [`DataTester`] owns one schema and the findings of its most recent pass.
//! Each call to [`DataTester::test`] walks the data and the schema together,
//! depth first, and records every failed rule rather than stopping at the
//! first one. Malformed schemas abort the pass with a [`SchemaError`].
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod context;
mod duplicates;
mod engine;
pub mod report;
mod rules;

pub use context::{ValidationContext, ROOT_PATH};
pub use report::{ValidationError, ValidationErrors};

use crate::common;
use crate::config::TesterOptions;
use crate::diff::{self, DiffResult};
use crate::error::{DiffError, SchemaError};
use crate::value::{classify, Value};
use engine::Engine;
use log::debug;

/// Validator bound to a single schema
///
/// # Examples
///
/// ```rust
/// use datatester::{DataTester, Value};
/// use serde_json::json;
///
/// let mut tester = DataTester::new(json!({"type": "number", "min": 0, "max": 10}));
/// let errors = tester.test(&Value::from(15)).unwrap();
///
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.as_slice()[0].error, "Max value validation failed");
/// ```
#[derive(Debug, Clone)]
pub struct DataTester {
    schema: Value,
    options: TesterOptions,
    errors: ValidationErrors,
}

impl DataTester {
    /// Create a validator with default options
    pub fn new(schema: impl Into<Value>) -> Self {
        Self::with_options(schema, TesterOptions::default())
    }

    /// Create a validator with explicit options
    pub fn with_options(schema: impl Into<Value>, options: TesterOptions) -> Self {
        Self {
            schema: schema.into(),
            options,
            errors: ValidationErrors::new(),
        }
    }

    /// Validate a present data value
    ///
    /// Findings from the previous pass are discarded first. On success the
    /// findings of this pass are returned (empty when the data is valid).
    pub fn test(&mut self, data: &Value) -> Result<&ValidationErrors, SchemaError> {
        self.test_optional(Some(data))
    }

    /// Validate a possibly absent data value
    ///
    /// On a schema error the accumulator keeps whatever was recorded before
    /// the pass was aborted.
    pub fn test_optional(&mut self, data: Option<&Value>) -> Result<&ValidationErrors, SchemaError> {
        self.errors.clear();
        debug!("validating {} data", classify(data));

        let context = ValidationContext::root();
        Engine::new(&mut self.errors, &self.options).recursive_test(data, &self.schema, &context)?;

        debug!("validation finished with {} finding(s)", self.errors.len());
        Ok(&self.errors)
    }

    /// Findings of the most recent pass
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// True if the most recent pass recorded no findings
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn options(&self) -> &TesterOptions {
        &self.options
    }

    /// Shared schema fragment by name, see [`common`]
    pub fn common(name: &str) -> Option<&'static Value> {
        common::get(name)
    }

    /// Deep diff of two values, see [`diff::diff`]
    pub fn diff(left: &Value, right: &Value) -> Result<DiffResult, DiffError> {
        diff::diff(left, right)
    }
}
