//! Validator options
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};

/// Options accepted when constructing a [`DataTester`](crate::DataTester)
///
/// The options object can be built in code or deserialized from JSON
/// (`{"breakOnError": true}`); unknown and missing fields fall back to the
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TesterOptions {
    /// Keep only the first finding of a pass. Traversal is not shortened:
    /// schema errors further down the tree are still raised.
    pub break_on_error: bool,
}

impl TesterOptions {
    /// Default options: every finding of a pass is collected
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable stop-on-first-finding reporting
    pub fn with_break_on_error(mut self) -> Self {
        self.break_on_error = true;
        self
    }
}
