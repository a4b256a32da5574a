//! Error types for schema and diff failures
//!
//! Validation findings are not errors: they are collected into
//! [`ValidationErrors`](crate::validation::ValidationErrors). The types here
//! describe malformed schemas and unsupported diff inputs, which abort the
//! current call.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::value::{classify, Kind, Value};
use thiserror::Error;

/// A malformed schema, raised immediately and never recorded as a finding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A schema node that is neither a descriptor object nor a generator
    #[error("schema error at '{path}': schema is of invalid type; expected object or function, got {found}")]
    InvalidSchemaNode { path: String, found: Kind },

    /// A descriptor field resolved to a value of the wrong kind
    #[error("schema error at '{path}': {expected} expected for \"{field}\" value, got {found}")]
    InvalidField {
        path: String,
        field: String,
        expected: &'static str,
        found: Kind,
    },

    /// Duplicate detection was asked to compare composite values
    #[error("schema error at '{path}': can only test for duplicates on arrays containing only primitive values, found {found}; use a projection function to provide compatible values")]
    NonPrimitiveDuplicate { path: String, found: Kind },

    /// An `allowDuplicates` projection did not produce an array
    #[error("schema error at '{path}': projection \"{key}\" of \"allowDuplicates\" must return an array, got {found}")]
    InvalidDuplicateProjection {
        path: String,
        key: String,
        found: Kind,
    },
}

impl SchemaError {
    /// Build an [`SchemaError::InvalidField`] from the offending resolved value
    pub(crate) fn invalid_field<F: Into<String>>(
        path: &str,
        field: F,
        expected: &'static str,
        found: Option<&Value>,
    ) -> Self {
        SchemaError::InvalidField {
            path: path.to_string(),
            field: field.into(),
            expected,
            found: classify(found),
        }
    }
}

/// Inputs the deep diff cannot recurse into
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    #[error("only arrays and plain objects are allowed, got two {kind} values")]
    UnsupportedContainer { kind: Kind },
}

/// Unknown kind name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown value kind '{0}'")]
pub struct ParseKindError(pub String);

/// Crate-level error for callers mixing validation and diffing
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Diff(#[from] DiffError),
}

/// Result alias over [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
