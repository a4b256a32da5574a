//! Path tracking for findings
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

/// Path of the root data particle
pub const ROOT_PATH: &str = "DATA";

/// Traversal context carrying the dot/bracket path of the current particle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationContext {
    /// Current path, e.g. `DATA.items[2].name`
    pub path: String,
}

impl ValidationContext {
    /// Context for the root particle
    pub fn root() -> Self {
        Self {
            path: ROOT_PATH.to_string(),
        }
    }

    /// Child context for an object property
    pub fn child<P: AsRef<str>>(&self, key: P) -> Self {
        Self {
            path: format!("{}.{}", self.path, key.as_ref()),
        }
    }

    /// Child context for an array element
    pub fn child_index(&self, index: usize) -> Self {
        Self {
            path: format!("{}[{}]", self.path, index),
        }
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::root()
    }
}
