//! A reference-shared, insertion-ordered JSON object.
//!
//! A `JsonObject` is a handle. Cloning it is cheap and the clone observes
//! and mutates the same entries:
//!
//! ```
//! use json_kit::JsonObject;
//!
//! let json = JsonObject::new();
//! let alias = json.clone();
//! alias.put("key1", "abc");
//! assert_eq!(json.string("key1").as_deref(), Some("abc"));
//! assert!(json.ptr_eq(&alias));
//! ```
//!
//! Handles are not thread-safe; share them within one thread only.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::array::JsonArray;
use crate::convert::FromValue;
use crate::cycle::{self, CloneMemo, EqPath};
use crate::iter::{KeyValues, Values};
use crate::value::Value;

pub(crate) type Map = IndexMap<String, Value>;

#[derive(Clone, Default)]
pub struct JsonObject {
    inner: Rc<RefCell<Map>>,
}

impl JsonObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_map(Map::with_capacity(capacity))
    }

    pub(crate) fn from_map(map: Map) -> Self {
        Self {
            inner: Rc::new(RefCell::new(map)),
        }
    }

    /// Creates an empty object stored under `key` in `parent`.
    ///
    /// Returns the child handle for further chained mutation.
    pub fn new_in_object(parent: &JsonObject, key: impl Into<String>) -> Self {
        let child = Self::new();
        parent.put(key, &child);
        child
    }

    /// Creates an empty object appended to `parent`.
    pub fn new_in_array(parent: &JsonArray) -> Self {
        let child = Self::new();
        parent.put(&child);
        child
    }

    pub(crate) fn borrow(&self) -> Ref<'_, Map> {
        self.inner.borrow()
    }

    /// Address of the shared storage, stable for the life of the object.
    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.inner) as *const () as usize
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.borrow().contains_key(key)
    }

    /// `true` if both handles share the same storage.
    pub fn ptr_eq(&self, other: &JsonObject) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// A snapshot of the keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.borrow().keys().cloned().collect()
    }

    pub fn values(&self) -> Values {
        Values::of_object(self.clone())
    }

    pub fn key_values(&self) -> KeyValues {
        KeyValues::new(self.clone())
    }

    /// The entry at insertion position `index`.
    pub(crate) fn entry_at(&self, index: usize) -> Option<(String, Value)> {
        self.inner
            .borrow()
            .get_index(index)
            .map(|(k, v)| (k.clone(), v.clone()))
    }

    pub(crate) fn value_at(&self, index: usize) -> Option<Value> {
        self.inner.borrow().get_index(index).map(|(_, v)| v.clone())
    }

    /// A fully independent copy. See [`Value::deep_clone`].
    pub fn deep_clone(&self) -> JsonObject {
        self.deep_clone_with(&mut CloneMemo::new())
    }

    pub(crate) fn deep_clone_with(&self, memo: &mut CloneMemo) -> JsonObject {
        if let Some(Value::Object(copy)) = memo.get(&self.addr()) {
            return copy.clone();
        }
        let copy = Self::with_capacity(self.len());
        memo.insert(self.addr(), Value::Object(copy.clone()));
        for (key, value) in self.inner.borrow().iter() {
            let value = value.deep_clone_with(memo);
            copy.inner.borrow_mut().insert(key.clone(), value);
        }
        copy
    }

    pub(crate) fn eq_with(&self, other: &JsonObject, path: &mut EqPath) -> bool {
        let pair = (self.addr(), other.addr());
        if self.ptr_eq(other) || path.contains(&pair) {
            return true;
        }
        let a = self.inner.borrow();
        let b = other.inner.borrow();
        if a.len() != b.len() {
            return false;
        }
        path.push(pair);
        let equal = a
            .iter()
            .all(|(key, val_a)| b.get(key).is_some_and(|val_b| val_a.eq_with(val_b, path)));
        path.pop();
        equal
    }
}

// ── Reads ────────────────────────────────────────────────────────────────

impl JsonObject {
    /// The value at `key`; `None` when absent. JSON null is `Some(Value::Null)`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.borrow().get(key).cloned()
    }

    /// The value at `key` read as `T`; `None` when absent, null, or of another type.
    pub fn get_as<T: FromValue>(&self, key: &str) -> Option<T> {
        self.inner.borrow().get(key).and_then(T::from_value)
    }

    /// The value at `key` read as `T`, or `default` when the key is absent,
    /// holds null, or holds a different type.
    pub fn get_or<T: FromValue>(&self, key: &str, default: T) -> T {
        self.get_as(key).unwrap_or(default)
    }

    /// The string at `key`. Numbers are not stringified.
    pub fn string(&self, key: &str) -> Option<String> {
        self.get_as(key)
    }

    /// The number at `key` as a double; booleans read as `1.0`/`0.0`.
    pub fn f64(&self, key: &str) -> Option<f64> {
        self.get_as(key)
    }

    /// The number at `key` as `i64`, truncating a float toward zero.
    pub fn i64(&self, key: &str) -> Option<i64> {
        self.get_as(key)
    }

    /// Like [`JsonObject::i64`], saturating at the `i32` bounds.
    pub fn i32(&self, key: &str) -> Option<i32> {
        self.get_as(key)
    }

    /// The boolean at `key`. `0` and `1` are not booleans.
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get_as(key)
    }

    /// A shared handle to the object at `key`; mutations through it are
    /// visible here.
    pub fn object(&self, key: &str) -> Option<JsonObject> {
        self.get_as(key)
    }

    /// A shared handle to the array at `key`.
    pub fn array(&self, key: &str) -> Option<JsonArray> {
        self.get_as(key)
    }

    /// A copy of the strings if `key` holds an array of strings only.
    pub fn string_array(&self, key: &str) -> Option<Vec<String>> {
        self.get_as(key)
    }

    /// `true` only if `key` is present and holds JSON null.
    pub fn is_null(&self, key: &str) -> bool {
        matches!(self.inner.borrow().get(key), Some(Value::Null))
    }

    /// The string at `key`, or a copy of `default`.
    pub fn string_or(&self, key: &str, default: &str) -> String {
        self.string(key).unwrap_or_else(|| default.to_owned())
    }

    /// [`JsonObject::f64`] with a fallback.
    pub fn f64_or(&self, key: &str, default: f64) -> f64 {
        self.get_or(key, default)
    }

    /// [`JsonObject::i64`] with a fallback.
    pub fn i64_or(&self, key: &str, default: i64) -> i64 {
        self.get_or(key, default)
    }

    /// [`JsonObject::i32`] with a fallback.
    pub fn i32_or(&self, key: &str, default: i32) -> i32 {
        self.get_or(key, default)
    }

    /// [`JsonObject::bool`] with a fallback.
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.get_or(key, default)
    }
}

// ── Mutation ─────────────────────────────────────────────────────────────

impl JsonObject {
    /// Inserts or overwrites `key`. An existing key keeps its position.
    pub fn put(&self, key: impl Into<String>, value: impl Into<Value>) -> &Self {
        let value = value.into();
        let previous = self.inner.borrow_mut().insert(key.into(), value);
        drop(previous);
        self
    }

    /// Like [`put`](Self::put), except that `None` removes `key` instead of
    /// storing anything. Use [`set_null`](Self::set_null) to store null.
    pub fn put_opt<V: Into<Value>>(&self, key: impl Into<String>, value: Option<V>) -> &Self {
        match value {
            Some(v) => self.put(key, v),
            None => {
                let key: String = key.into();
                self.remove(&key);
                self
            }
        }
    }

    /// Stores explicit JSON null at `key`.
    pub fn set_null(&self, key: impl Into<String>) -> &Self {
        self.put(key, Value::Null)
    }

    /// Removes `key`, returning its value. Removing a missing key is a no-op.
    /// Remaining entries keep their relative order.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.inner.borrow_mut().shift_remove(key)
    }

    /// Inserts every pair as a string value.
    pub fn extend_strings<I, K, V>(&self, pairs: I) -> &Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries: Vec<(String, Value)> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), Value::String(v.into())))
            .collect();
        self.inner.borrow_mut().extend(entries);
        self
    }

    pub fn clear(&self) -> &Self {
        let old = std::mem::take(&mut *self.inner.borrow_mut());
        drop(old);
        self
    }
}

// ── Trait impls ──────────────────────────────────────────────────────────

impl PartialEq for JsonObject {
    /// Same keys mapping to equal values; order is not compared.
    fn eq(&self, other: &Self) -> bool {
        self.eq_with(other, &mut EqPath::new())
    }
}

/// A container already being printed further up shows as `<cycle>`.
impl fmt::Debug for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        cycle::debug_container(self.addr(), f, |f| {
            f.debug_map().entries(self.inner.borrow().iter()).finish()
        })
    }
}

impl fmt::Display for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Value::from(self), f)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for JsonObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a JsonObject {
    type Item = (String, Value);
    type IntoIter = KeyValues;

    fn into_iter(self) -> KeyValues {
        self.key_values()
    }
}
