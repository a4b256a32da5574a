//! Deep diff of two values
//!
//! [`diff`] partitions two objects (or two arrays) into the parts only the
//! left side has, the parts only the right side has, and the parts both share.
//! Each part mirrors the container shape of the inputs. Array parts keep the
//! original indices, so an index that belongs to another part is left as a
//! hole.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::DiffError;
use crate::value::{Map, Value};
use log::trace;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;

/// A part of a diff: a whole value, or a container holding sub-parts
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Value(Value),
    Object(Vec<(String, Fragment)>),
    /// Index-preserving; `None` marks an index not present in this part
    Array(Vec<Option<Fragment>>),
}

impl Fragment {
    /// Property of an object fragment
    pub fn get(&self, key: &str) -> Option<&Fragment> {
        match self {
            Fragment::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Element of an array fragment; `None` for holes and out-of-range indices
    pub fn index(&self, index: usize) -> Option<&Fragment> {
        match self {
            Fragment::Array(items) => items.get(index).and_then(Option::as_ref),
            _ => None,
        }
    }

    /// True if no array fragment in this tree has holes
    pub fn is_dense(&self) -> bool {
        match self {
            Fragment::Value(_) => true,
            Fragment::Object(entries) => entries.iter().all(|(_, v)| v.is_dense()),
            Fragment::Array(items) => items.iter().all(|item| item.as_ref().is_some_and(Fragment::is_dense)),
        }
    }

    /// The equivalent [`Value`], if the fragment is dense
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Fragment::Value(value) => Some(value.clone()),
            Fragment::Object(entries) => entries
                .iter()
                .map(|(k, v)| v.to_value().map(|v| (k.clone(), v)))
                .collect::<Option<Map>>()
                .map(Value::Object),
            Fragment::Array(items) => items
                .iter()
                .map(|item| item.as_ref().and_then(Fragment::to_value))
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
        }
    }
}

impl Serialize for Fragment {
    /// Holes serialize as `null`
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Fragment::Value(value) => value.serialize(serializer),
            Fragment::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Fragment::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Result of [`diff`]; each part is `None` when it would be empty
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    pub left_diff: Option<Fragment>,
    pub right_diff: Option<Fragment>,
    pub common: Option<Fragment>,
}

impl DiffResult {
    /// Both sides are identical
    pub fn is_equal(&self) -> bool {
        self.left_diff.is_none() && self.right_diff.is_none()
    }
}

/// Compare two values
///
/// Two objects or two arrays are compared entry by entry. Two regular
/// expressions or two functions cannot be taken apart and are rejected. Any
/// other pair, including two primitives, is reported whole on both sides.
///
/// # Examples
///
/// ```rust
/// use datatester::{diff, Value};
/// use serde_json::json;
///
/// let result = diff(&json!({"a": 1, "b": 2}).into(), &json!({"a": 1, "b": 3}).into()).unwrap();
/// assert_eq!(result.left_diff.and_then(|f| f.to_value()), Some(Value::from(json!({"b": 2}))));
/// assert_eq!(result.right_diff.and_then(|f| f.to_value()), Some(Value::from(json!({"b": 3}))));
/// assert_eq!(result.common.and_then(|f| f.to_value()), Some(Value::from(json!({"a": 1}))));
/// ```
pub fn diff(left: &Value, right: &Value) -> Result<DiffResult, DiffError> {
    match (left, right) {
        (Value::Object(l), Value::Object(r)) => Ok(diff_objects(l, r)),
        (Value::Array(l), Value::Array(r)) => Ok(diff_arrays(l, r)),
        (Value::Regex(_), Value::Regex(_)) | (Value::Function(_), Value::Function(_)) => {
            Err(DiffError::UnsupportedContainer { kind: left.kind() })
        }
        _ => Ok(DiffResult {
            left_diff: Some(Fragment::Value(left.clone())),
            right_diff: Some(Fragment::Value(right.clone())),
            common: None,
        }),
    }
}

#[derive(Debug, Clone, Copy)]
enum Shape {
    Object,
    Array,
}

#[derive(Debug, Clone, Copy)]
enum Key<'a> {
    Name(&'a str),
    Index(usize),
}

/// The three parts under construction for one container level
struct Parts {
    shape: Shape,
    left: Option<Fragment>,
    right: Option<Fragment>,
    common: Option<Fragment>,
}

impl Parts {
    fn new(shape: Shape) -> Self {
        Self {
            shape,
            left: None,
            right: None,
            common: None,
        }
    }

    fn put(shape: Shape, part: &mut Option<Fragment>, key: Key<'_>, fragment: Fragment) {
        let container = part.get_or_insert_with(|| match shape {
            Shape::Object => Fragment::Object(Vec::new()),
            Shape::Array => Fragment::Array(Vec::new()),
        });
        match (container, key) {
            (Fragment::Object(entries), Key::Name(name)) => entries.push((name.to_string(), fragment)),
            (Fragment::Array(items), Key::Index(index)) => {
                if items.len() <= index {
                    items.resize(index + 1, None);
                }
                items[index] = Some(fragment);
            }
            (Fragment::Object(entries), Key::Index(index)) => entries.push((index.to_string(), fragment)),
            (Fragment::Array(_), Key::Name(_)) | (Fragment::Value(_), _) => {}
        }
    }

    fn left(&mut self, key: Key<'_>, value: &Value) {
        Self::put(self.shape, &mut self.left, key, Fragment::Value(value.clone()));
    }

    fn right(&mut self, key: Key<'_>, value: &Value) {
        Self::put(self.shape, &mut self.right, key, Fragment::Value(value.clone()));
    }

    /// Compare an entry present on both sides
    fn both(&mut self, key: Key<'_>, left: &Value, right: &Value) {
        let nested = match (left, right) {
            (Value::Object(l), Value::Object(r)) => diff_objects(l, r),
            (Value::Array(l), Value::Array(r)) => diff_arrays(l, r),
            _ if left == right => {
                Self::put(self.shape, &mut self.common, key, Fragment::Value(left.clone()));
                return;
            }
            _ => {
                self.left(key, left);
                self.right(key, right);
                return;
            }
        };

        if let Some(fragment) = nested.left_diff {
            Self::put(self.shape, &mut self.left, key, fragment);
        }
        if let Some(fragment) = nested.right_diff {
            Self::put(self.shape, &mut self.right, key, fragment);
        }
        if let Some(fragment) = nested.common {
            Self::put(self.shape, &mut self.common, key, fragment);
        }
    }

    fn finish(self) -> DiffResult {
        DiffResult {
            left_diff: self.left,
            right_diff: self.right,
            common: self.common,
        }
    }
}

fn diff_objects(left: &Map, right: &Map) -> DiffResult {
    trace!("diffing objects with {} and {} keys", left.len(), right.len());
    let mut parts = Parts::new(Shape::Object);

    for (key, value) in left.iter() {
        match right.get(key) {
            Some(other) => parts.both(Key::Name(key), value, other),
            None => parts.left(Key::Name(key), value),
        }
    }
    for (key, value) in right.iter() {
        if !left.contains_key(key) {
            parts.right(Key::Name(key), value);
        }
    }

    parts.finish()
}

fn diff_arrays(left: &[Value], right: &[Value]) -> DiffResult {
    trace!("diffing arrays of length {} and {}", left.len(), right.len());
    let mut parts = Parts::new(Shape::Array);

    for (index, value) in left.iter().enumerate() {
        match right.get(index) {
            Some(other) => parts.both(Key::Index(index), value, other),
            None => parts.left(Key::Index(index), value),
        }
    }
    for (index, value) in right.iter().enumerate().skip(left.len()) {
        parts.right(Key::Index(index), value);
    }

    parts.finish()
}
