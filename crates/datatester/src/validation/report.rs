//! Validation findings and their per-pass accumulator
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::value::Value;
use serde::Serialize;
use std::fmt;

/// One recorded validation finding
///
/// Serializes to the four-field record `{path, error, value, expected}`;
/// `value` is omitted when the offending particle was absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Dot/bracket path of the offending particle
    pub path: String,
    /// Human-readable description of the failed rule
    pub error: String,
    /// The offending particle, or a summary of it for some rules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// The constraint that failed
    pub expected: Value,
}

impl ValidationError {
    pub fn new<P, E>(path: P, error: E, value: Option<Value>, expected: Value) -> Self
    where
        P: Into<String>,
        E: Into<String>,
    {
        Self {
            path: path.into(),
            error: error.into(),
            value,
            expected,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error at '{}': {}", self.path, self.error)?;
        match &self.value {
            Some(value) => write!(f, " (value: {}, expected: {})", value, self.expected),
            None => write!(f, " (value: undefined, expected: {})", self.expected),
        }
    }
}

/// Ordered findings of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Append a finding
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Drop every finding; called at the start of each pass
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// Ok if no findings were recorded
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
