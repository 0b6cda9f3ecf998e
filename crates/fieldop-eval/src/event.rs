//! Mutable event wrapper with dot-notation field access.
//!
//! Wraps the `serde_json::Value` owned by the surrounding engine for the
//! duration of one pipeline pass. Reads support nested access via dot
//! notation with flat-key precedence: `"actor.id"` as a single key takes
//! precedence over `{"actor": {"id": ...}}` traversal. Writes follow the
//! same addressing; `set` creates missing intermediate objects.

use serde_json::{Map, Value};

/// A mutable view of one JSON event during evaluation.
///
/// The event is owned by the caller; this wrapper only borrows it, so a
/// pipeline pass mutates the event in place and never changes its
/// identity.
#[derive(Debug)]
pub struct Event<'a> {
    inner: &'a mut Value,
}

impl<'a> Event<'a> {
    /// Wrap a mutable JSON value as an event.
    pub fn new(value: &'a mut Value) -> Self {
        Event { inner: value }
    }

    /// Get a field value by path, supporting dot-notation for nested
    /// access. A flat key matching the whole path wins over traversal.
    pub fn get(&self, path: &str) -> Option<&Value> {
        if let Some(obj) = self.inner.as_object()
            && let Some(v) = obj.get(path)
        {
            return Some(v);
        }

        if path.contains('.') {
            let mut current = &*self.inner;
            for part in path.split('.') {
                current = current.as_object()?.get(part)?;
            }
            return Some(current);
        }

        None
    }

    /// Get a field's string value, if present and a string.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Whether a field is present at all.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Write a value at the given path, overwriting any existing value.
    ///
    /// If the whole path already exists as a flat key it is overwritten in
    /// place; otherwise the dot segments are traversed, creating missing
    /// intermediate objects and replacing non-object intermediates.
    pub fn set(&mut self, path: &str, value: Value) {
        if !self.inner.is_object() {
            *self.inner = Value::Object(Map::new());
        }
        let Some(root) = self.inner.as_object_mut() else {
            return;
        };

        if root.contains_key(path) || !path.contains('.') {
            root.insert(path.to_string(), value);
            return;
        }

        let mut parts = path.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                current.insert(part.to_string(), value);
                return;
            }
            let slot = current
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            current = next;
        }
    }

    /// Remove a field, returning its value. Absent fields are a no-op.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let root = self.inner.as_object_mut()?;
        if let Some(v) = root.remove(path) {
            return Some(v);
        }

        if path.contains('.') {
            let (parent_path, leaf) = path.rsplit_once('.')?;
            let mut current = root;
            for part in parent_path.split('.') {
                current = current.get_mut(part)?.as_object_mut()?;
            }
            return current.remove(leaf);
        }

        None
    }

    /// Access the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        self.inner
    }
}
