//! A reference-shared JSON array.
//!
//! ```
//! use json_kit::JsonArray;
//!
//! let a = JsonArray::new();
//! a.put(1).put(2).put(3);
//! a.put_at(1, 9).unwrap();
//! assert_eq!(a.to_json_string(false).unwrap(), "[1,9,3]");
//! assert!(a.put_at(3, 4).is_err());
//! ```

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::convert::FromValue;
use crate::cycle::{self, CloneMemo, EqPath};
use crate::error::{JsonError, Result};
use crate::iter::Values;
use crate::object::JsonObject;
use crate::value::Value;

#[derive(Clone, Default)]
pub struct JsonArray {
    inner: Rc<RefCell<Vec<Value>>>,
}

impl JsonArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(Vec::with_capacity(capacity))
    }

    pub(crate) fn from_vec(items: Vec<Value>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(items)),
        }
    }

    /// Creates an empty array stored under `key` in `parent`.
    pub fn new_in_object(parent: &JsonObject, key: impl Into<String>) -> Self {
        let child = Self::new();
        parent.put(key, &child);
        child
    }

    /// Creates an empty array appended to `parent`.
    pub fn new_in_array(parent: &JsonArray) -> Self {
        let child = Self::new();
        parent.put(&child);
        child
    }

    pub(crate) fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.inner.borrow()
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.inner) as *const () as usize
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn ptr_eq(&self, other: &JsonArray) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Forward view over the live elements.
    pub fn values(&self) -> Values {
        Values::of_array(self.clone())
    }

    /// Reverse view over the live elements.
    pub fn reversed(&self) -> std::iter::Rev<Values> {
        self.values().rev()
    }

    /// A snapshot of the elements. Nested containers are still shared.
    pub fn to_vec(&self) -> Vec<Value> {
        self.inner.borrow().clone()
    }

    pub(crate) fn to_string_vec(&self) -> Option<Vec<String>> {
        self.inner
            .borrow()
            .iter()
            .map(|v| v.as_str().map(str::to_owned))
            .collect()
    }

    /// A fully independent copy. See [`Value::deep_clone`].
    pub fn deep_clone(&self) -> JsonArray {
        self.deep_clone_with(&mut CloneMemo::new())
    }

    pub(crate) fn deep_clone_with(&self, memo: &mut CloneMemo) -> JsonArray {
        if let Some(Value::Array(copy)) = memo.get(&self.addr()) {
            return copy.clone();
        }
        let copy = Self::with_capacity(self.len());
        memo.insert(self.addr(), Value::Array(copy.clone()));
        for item in self.inner.borrow().iter() {
            let item = item.deep_clone_with(memo);
            copy.inner.borrow_mut().push(item);
        }
        copy
    }

    pub(crate) fn eq_with(&self, other: &JsonArray, path: &mut EqPath) -> bool {
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
        let equal = a.iter().zip(b.iter()).all(|(x, y)| x.eq_with(y, path));
        path.pop();
        equal
    }
}

// ── Reads ────────────────────────────────────────────────────────────────

impl JsonArray {
    /// The element at `index`; `None` when out of range.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.inner.borrow().get(index).cloned()
    }

    /// The element read as `T`; `None` when out of range, null, or of another type.
    pub fn get_as<T: FromValue>(&self, index: usize) -> Option<T> {
        self.inner.borrow().get(index).and_then(T::from_value)
    }

    /// The element read as `T`, or `default` when the index is out of
    /// range, holds null, or holds a different type.
    pub fn get_or<T: FromValue>(&self, index: usize, default: T) -> T {
        self.get_as(index).unwrap_or(default)
    }

    /// The string at `index`.
    pub fn string(&self, index: usize) -> Option<String> {
        self.get_as(index)
    }

    /// The number at `index` as a double; booleans read as `1.0`/`0.0`.
    pub fn f64(&self, index: usize) -> Option<f64> {
        self.get_as(index)
    }

    /// The number at `index` as `i64`, truncating a float toward zero.
    pub fn i64(&self, index: usize) -> Option<i64> {
        self.get_as(index)
    }

    /// Like [`JsonArray::i64`], saturating at the `i32` bounds.
    pub fn i32(&self, index: usize) -> Option<i32> {
        self.get_as(index)
    }

    /// The boolean at `index`.
    pub fn bool(&self, index: usize) -> Option<bool> {
        self.get_as(index)
    }

    /// A shared handle to the object at `index`.
    pub fn object(&self, index: usize) -> Option<JsonObject> {
        self.get_as(index)
    }

    /// A shared handle to the array at `index`.
    pub fn array(&self, index: usize) -> Option<JsonArray> {
        self.get_as(index)
    }

    /// A copy of the strings if the element is an array of strings only.
    pub fn string_array(&self, index: usize) -> Option<Vec<String>> {
        self.get_as(index)
    }

    /// `true` only if `index` is in range and holds JSON null.
    pub fn is_null(&self, index: usize) -> bool {
        matches!(self.inner.borrow().get(index), Some(Value::Null))
    }

    /// The string at `index`, or a copy of `default`.
    pub fn string_or(&self, index: usize, default: &str) -> String {
        self.string(index).unwrap_or_else(|| default.to_owned())
    }

    /// [`JsonArray::f64`] with a fallback.
    pub fn f64_or(&self, index: usize, default: f64) -> f64 {
        self.get_or(index, default)
    }

    /// [`JsonArray::i64`] with a fallback.
    pub fn i64_or(&self, index: usize, default: i64) -> i64 {
        self.get_or(index, default)
    }

    /// [`JsonArray::i32`] with a fallback.
    pub fn i32_or(&self, index: usize, default: i32) -> i32 {
        self.get_or(index, default)
    }

    /// [`JsonArray::bool`] with a fallback.
    pub fn bool_or(&self, index: usize, default: bool) -> bool {
        self.get_or(index, default)
    }
}

// ── Mutation ─────────────────────────────────────────────────────────────

impl JsonArray {
    /// Appends `value`.
    pub fn put(&self, value: impl Into<Value>) -> &Self {
        let value = value.into();
        self.inner.borrow_mut().push(value);
        self
    }

    /// Appends `value`, or JSON null when `value` is `None`.
    pub fn put_opt<V: Into<Value>>(&self, value: Option<V>) -> &Self {
        self.put(value.map_or(Value::Null, Into::into))
    }

    /// Replaces the element at `index`. Never grows the array.
    ///
    /// # Errors
    ///
    /// [`JsonError::IndexOutOfBound`] when `index >= len()`.
    pub fn put_at(&self, index: usize, value: impl Into<Value>) -> Result<&Self> {
        let value = value.into();
        let previous = {
            let mut items = self.inner.borrow_mut();
            let len = items.len();
            let slot = items
                .get_mut(index)
                .ok_or(JsonError::IndexOutOfBound { index, len })?;
            std::mem::replace(slot, value)
        };
        drop(previous);
        Ok(self)
    }

    /// Like [`put_at`](Self::put_at); `None` stores JSON null.
    pub fn put_opt_at<V: Into<Value>>(&self, index: usize, value: Option<V>) -> Result<&Self> {
        self.put_at(index, value.map_or(Value::Null, Into::into))
    }

    /// Removes and returns the element at `index`, shifting later elements.
    pub fn remove_at(&self, index: usize) -> Result<Value> {
        let mut items = self.inner.borrow_mut();
        if index >= items.len() {
            return Err(JsonError::IndexOutOfBound {
                index,
                len: items.len(),
            });
        }
        Ok(items.remove(index))
    }

    pub fn clear(&self) -> &Self {
        let old = std::mem::take(&mut *self.inner.borrow_mut());
        drop(old);
        self
    }
}

// ── Trait impls ──────────────────────────────────────────────────────────

impl PartialEq for JsonArray {
    fn eq(&self, other: &Self) -> bool {
        self.eq_with(other, &mut EqPath::new())
    }
}

impl fmt::Debug for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        cycle::debug_container(self.addr(), f, |f| {
            f.debug_list().entries(self.inner.borrow().iter()).finish()
        })
    }
}

impl fmt::Display for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Value::from(self), f)
    }
}

impl<T: Into<Value>> From<Vec<T>> for JsonArray {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> FromIterator<T> for JsonArray {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a JsonArray {
    type Item = Value;
    type IntoIter = Values;

    fn into_iter(self) -> Values {
        self.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_at_replaces_in_place() {
        let a = JsonArray::from(vec![1, 2, 3]);
        a.put_at(1, 9).unwrap();
        assert_eq!(a.to_vec(), vec![Value::from(1), Value::from(9), Value::from(3)]);
    }

    #[test]
    fn test_put_at_out_of_bounds() {
        let a = JsonArray::from(vec![1, 2]);
        let err = a.put_at(2, 0).unwrap_err();
        assert!(matches!(err, JsonError::IndexOutOfBound { index: 2, len: 2 }));
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_put_opt_appends_null() {
        let a = JsonArray::new();
        a.put_opt(None::<i32>).put_opt(Some("x"));
        assert_eq!(a.len(), 2);
        assert!(a.is_null(0));
        assert_eq!(a.string(1).as_deref(), Some("x"));
    }

    #[test]
    fn test_remove_at() {
        let a = JsonArray::from(vec!["a", "b", "c"]);
        assert_eq!(a.remove_at(0).unwrap(), "a");
        assert_eq!(a.to_string_vec(), Some(vec!["b".to_string(), "c".to_string()]));
        assert!(a.remove_at(5).unwrap_err().is_index_out_of_bound());
    }

    #[test]
    fn test_deep_clone_of_self_containing_array() {
        let a = JsonArray::new();
        a.put(1).put(&a);
        let copy = a.deep_clone();
        assert!(!copy.ptr_eq(&a));
        assert_eq!(copy.i64(0), Some(1));
        assert!(copy.array(1).is_some_and(|inner| inner.ptr_eq(&copy)));
        a.clear();
        copy.clear();
    }

    #[test]
    fn test_deep_clone_keeps_shared_subtrees_shared() {
        let shared = JsonArray::from(vec![1]);
        let root = JsonArray::new();
        root.put(&shared).put(&shared);
        let copy = root.deep_clone();
        let (first, second) = (copy.array(0).unwrap(), copy.array(1).unwrap());
        assert!(first.ptr_eq(&second));
        assert!(!first.ptr_eq(&shared));
    }

    #[test]
    fn test_equality_of_cyclic_arrays_terminates() {
        let a = JsonArray::new();
        a.put(&a);
        let b = JsonArray::new();
        b.put(&b);
        assert_eq!(a, b);

        let c = JsonArray::new();
        c.put(&c).put(2);
        assert_ne!(a, c);
        for x in [&a, &b, &c] {
            x.clear();
        }
    }

    #[test]
    fn test_debug_marks_cycle() {
        let a = JsonArray::new();
        a.put(1).put(&a);
        assert_eq!(format!("{a:?}"), "[Number(Number(Int(1))), Array(<cycle>)]");
        a.clear();
        assert_eq!(format!("{a:?}"), "[]");
    }

    #[test]
    fn test_reversed() {
        let a = JsonArray::from(vec![1, 2, 9, 5, 6, 0]);
        let first = a.values().next();
        let last = a.reversed().next();
        assert_eq!(first, Some(Value::from(1)));
        assert_eq!(last, Some(Value::from(0)));
    }
}
