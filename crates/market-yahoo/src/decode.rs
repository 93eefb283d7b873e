//! Schema-directed traversal over a parsed JSON document.
//!
//! A [`Node`] is a cursor that may point at nothing. Reading a member that does
//! not exist yields a missing node, and every typed read of a missing or null
//! node yields the type's zero value, so mappers can walk a known field layout
//! without checking each step.
//!
//! The service wraps many values as `{"raw": 1.5, "fmt": "1.50"}`. Numeric and
//! boolean reads descend into `raw`; string reads take `fmt`, then `longFmt`.
//!
//! Arrays are never materialized whole. Two windows are supported:
//!
//! - right-aligned: the last `min(len, N)` elements, in order
//! - offset: up to `N` elements starting at a given index

use market_core::types::{STRING_LENGTH, TEXT_LENGTH, bounded};
use serde_json::Value;

/// A value that can be read from a node.
pub trait Scalar: Default {
    /// Reads a bare (non-object) value. Returns `None` on a type mismatch.
    fn from_bare(value: &Value) -> Option<Self>;

    /// Reads from a `{raw, fmt, longFmt}` wrapper object.
    fn from_wrapper(node: Node<'_>) -> Self {
        Self::from_node(node.get("raw"))
    }

    /// Reads a node, applying null handling and wrapper fallback.
    fn from_node(node: Node<'_>) -> Self {
        match node.value() {
            None | Some(Value::Null) => Self::default(),
            Some(Value::Object(_)) => Self::from_wrapper(node),
            Some(value) => Self::from_bare(value).unwrap_or_default(),
        }
    }
}

impl Scalar for bool {
    fn from_bare(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl Scalar for i64 {
    fn from_bare(value: &Value) -> Option<Self> {
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f as Self))
    }
}

impl Scalar for f64 {
    fn from_bare(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl Scalar for String {
    fn from_bare(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn from_wrapper(node: Node<'_>) -> Self {
        let fmt = Self::from_node(node.get("fmt"));
        if fmt.is_empty() {
            Self::from_node(node.get("longFmt"))
        } else {
            fmt
        }
    }
}

/// A cursor into a JSON document. May point at nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Node<'a> {
    value: Option<&'a Value>,
}

impl<'a> Node<'a> {
    /// Creates a cursor at `value`.
    #[must_use]
    pub const fn new(value: &'a Value) -> Self {
        Self { value: Some(value) }
    }

    /// A cursor that points at nothing.
    #[must_use]
    pub const fn missing() -> Self {
        Self { value: None }
    }

    /// The value under the cursor.
    #[must_use]
    pub const fn value(&self) -> Option<&'a Value> {
        self.value
    }

    /// Returns true if the cursor points at nothing or at null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self.value, None | Some(Value::Null))
    }

    /// Returns true if the cursor points at an object.
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self.value, Some(Value::Object(_)))
    }

    /// Returns true if the cursor points at an array.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.value, Some(Value::Array(_)))
    }

    /// Moves to member `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Self {
        Self {
            value: self.value.and_then(|v| v.get(name)),
        }
    }

    /// Moves to array element `index`.
    #[must_use]
    pub fn at(&self, index: usize) -> Self {
        Self {
            value: self.value.and_then(|v| v.get(index)),
        }
    }

    /// Number of array elements (zero if not an array).
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.and_then(Value::as_array).map_or(0, Vec::len)
    }

    /// Returns true if this is not a non-empty array.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates array elements (nothing if not an array).
    pub fn elements(self) -> impl Iterator<Item = Node<'a>> {
        self.value
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(Node::new)
    }

    /// Reads the value under the cursor.
    #[must_use]
    pub fn to<T: Scalar>(&self) -> T {
        T::from_node(*self)
    }

    /// Reads boolean member `name`.
    #[must_use]
    pub fn bool(&self, name: &str) -> bool {
        self.get(name).to()
    }

    /// Reads integer member `name`.
    #[must_use]
    pub fn int(&self, name: &str) -> i64 {
        self.get(name).to()
    }

    /// Reads floating point member `name`.
    #[must_use]
    pub fn float(&self, name: &str) -> f64 {
        self.get(name).to()
    }

    /// Reads short string member `name`, bounded to [`STRING_LENGTH`].
    #[must_use]
    pub fn string(&self, name: &str) -> String {
        bounded(&self.get(name).to::<String>(), STRING_LENGTH)
    }

    /// Reads long text member `name`, bounded to [`TEXT_LENGTH`].
    #[must_use]
    pub fn text(&self, name: &str) -> String {
        bounded(&self.get(name).to::<String>(), TEXT_LENGTH)
    }

    /// Applies `f` to up to `capacity` elements of array member `name`,
    /// starting at `start`. `f` receives the index relative to `start`.
    ///
    /// Returns the number of elements visited.
    pub fn each(
        &self,
        name: &str,
        start: usize,
        capacity: usize,
        mut f: impl FnMut(usize, Node<'a>),
    ) -> usize {
        let array = self.get(name);
        let end = array.len().min(start.saturating_add(capacity));
        let mut visited = 0;
        for i in start..end {
            f(i - start, array.at(i));
            visited += 1;
        }
        visited
    }

    /// Reads up to `capacity` elements of array member `name` starting at
    /// `start`.
    #[must_use]
    pub fn window<T: Scalar>(&self, name: &str, start: usize, capacity: usize) -> Vec<T> {
        let mut out = Vec::with_capacity(capacity.min(self.get(name).len()));
        self.each(name, start, capacity, |_, node| out.push(node.to()));
        out
    }

    /// Reads the last `min(len, capacity)` elements of array member `name`,
    /// in original order.
    #[must_use]
    pub fn right_window<T: Scalar>(&self, name: &str, capacity: usize) -> Vec<T> {
        let len = self.get(name).len();
        self.window(name, len.saturating_sub(capacity), capacity)
    }

    /// Fills `dest` with the offset window of array member `name` starting at
    /// `start`, zeroing the unused tail.
    ///
    /// Returns the number of elements written.
    pub fn fill_window<T: Scalar>(&self, name: &str, start: usize, dest: &mut [T]) -> usize {
        let values = self.window(name, start, dest.len());
        fill(dest, values)
    }

    /// Fills `dest` with the right-aligned window of array member `name`,
    /// zeroing the unused tail.
    ///
    /// Returns the number of elements written.
    pub fn fill_right<T: Scalar>(&self, name: &str, dest: &mut [T]) -> usize {
        let values = self.right_window(name, dest.len());
        fill(dest, values)
    }

    /// Maps up to `dest.len()` record elements of array member `name`,
    /// starting at index zero, into `dest`. Unused slots are reset.
    ///
    /// Returns the number of records written.
    pub fn fill_records<R: Default>(
        &self,
        name: &str,
        dest: &mut [R],
        map: impl Fn(Node<'a>) -> R,
    ) -> usize {
        let n = self.each(name, 0, dest.len(), |i, node| dest[i] = map(node));
        dest[n..].iter_mut().for_each(|slot| *slot = R::default());
        n
    }
}

fn fill<T: Default>(dest: &mut [T], values: Vec<T>) -> usize {
    let n = values.len();
    for (slot, value) in dest.iter_mut().zip(values) {
        *slot = value;
    }
    dest[n..].iter_mut().for_each(|slot| *slot = T::default());
    n
}
