//! Datatester - schema-driven validation and deep diffing for JSON-like data
//!
//! This crate checks already-decoded data against loosely-typed, optionally
//! dynamic schema descriptions and reports every mismatch in one pass:
//!
//! - **Validation**: [`DataTester`] walks the data and its schema together and
//!   collects findings with dot/bracket paths (`DATA.items[2].name`)
//! - **Dynamic schemas**: any descriptor field may be a function of the data
//!   particle, and a whole schema node may be a generator that picks the
//!   descriptor from the data
//! - **Deep diff**: [`diff`] partitions two values into left-only, right-only
//!   and common parts
//!
//! ## Quick Start
//!
//! ```rust
//! use datatester::{DataTester, Map, Value};
//! use serde_json::json;
//!
//! let schema: Value = Map::new()
//!     .with("type", "object")
//!     .with("data", Value::from(json!({
//!         "id": {"type": "number"},
//!         "name": {"type": "string"}
//!     })))
//!     .into();
//!
//! let mut tester = DataTester::new(schema);
//! let errors = tester.test(&json!({"id": 1, "name": 42}).into()).unwrap();
//!
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors.as_slice()[0].path, "DATA.name");
//! assert_eq!(errors.as_slice()[0].error, "Type validation failed");
//! ```
//!
//! ## Schema descriptors
//!
//! Common fields, checked for every node: `required` (default `true`),
//! `type` (kind name or list of names), `canBeNull` (default `false`) and
//! `fn` (predicate; fails only when it returns exactly `false`).
//!
//! Kind fields: `value` for booleans, numbers and strings; `min`/`max` for
//! numbers; `pattern` for strings; `minLength`/`maxLength`, `allowDuplicates`
//! and `elements` for arrays; `strictKeys` and `data` for objects.
//!
//! A malformed schema is reported as a [`SchemaError`], never as a finding.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod common;
pub mod config;
pub mod diff;
pub mod error;
pub mod resolve;
pub mod validation;
pub mod value;

// Re-export commonly used types for convenience
pub use config::TesterOptions;
pub use diff::{diff, DiffResult, Fragment};
pub use error::{DiffError, Error, ParseKindError, Result, SchemaError};
pub use resolve::{resolve, resolve_or};
pub use validation::{DataTester, ValidationContext, ValidationError, ValidationErrors};
pub use value::{classify, Callable, Kind, Map, Value};
