//! The JSON value tagged union and its typed accessors.
//!
//! `Value` is a closed sum over the six JSON kinds. Scalars are held by
//! value; `Array` and `Object` hold [`JsonArray`] / [`JsonObject`] handles,
//! so cloning a `Value` that wraps a container aliases the same storage.
//!
//! Accessors never fail. A mismatched tag reads as `None`:
//!
//! ```
//! use json_kit::Value;
//!
//! let v = Value::from(true);
//! assert_eq!(v.as_bool(), Some(true));
//! assert_eq!(v.as_i64(), Some(1));
//! assert_eq!(v.as_str(), None);
//! assert!(!v.is_number());
//! ```

use std::fmt;

use crate::array::JsonArray;
use crate::cycle::{CloneMemo, EqPath};
use crate::number::Number;
use crate::object::JsonObject;

/// The kind of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Object,
    Array,
    String,
    Number,
    Bool,
    Null,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Object => "object",
            ValueKind::Array => "array",
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Bool => "bool",
            ValueKind::Null => "null",
        }
    }

    /// `true` for object and array.
    pub fn is_container(&self) -> bool {
        matches!(self, ValueKind::Object | ValueKind::Array)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One JSON node.
///
/// `==` compares structure (deep equality); use [`Value::identical`] to ask
/// whether two container values share storage.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(JsonArray),
    Object(JsonObject),
}

// ── Kind checks ──────────────────────────────────────────────────────────

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// `true` only for the number tag; booleans are not numbers here even
    /// though the numeric getters accept them.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }
}

// ── Typed getters ────────────────────────────────────────────────────────

impl Value {
    /// `Some(())` for JSON null.
    pub fn as_null(&self) -> Option<()> {
        match self {
            Value::Null => Some(()),
            _ => None,
        }
    }

    /// The stored boolean. Numbers, including 0 and 1, read as `None`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The stored number. Booleans read as `None` here.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Numbers as doubles; `true`/`false` read as `1.0`/`0.0`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Numbers as `i64`, truncating floats; `true`/`false` read as `1`/`0`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(n.as_i64()),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Like [`Value::as_i64`], saturating at the `i32` bounds.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Number(n) => Some(n.as_i32()),
            Value::Bool(b) => Some(i32::from(*b)),
            _ => None,
        }
    }

    /// The stored string, borrowed.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The array handle, borrowed. Clone it for a shared handle.
    pub fn as_array(&self) -> Option<&JsonArray> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// The object handle, borrowed.
    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn into_array(self) -> Option<JsonArray> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn into_object(self) -> Option<JsonObject> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// A copy of the elements if this is an array made only of strings.
    pub fn as_string_array(&self) -> Option<Vec<String>> {
        self.as_array()?.to_string_vec()
    }
}

// ── Navigation ───────────────────────────────────────────────────────────

impl Value {
    /// The value at `key` when this is an object.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.as_object()?.get(key)
    }

    /// The element at `index` when this is an array.
    pub fn at(&self, index: usize) -> Option<Value> {
        self.as_array()?.get(index)
    }

    /// The object at `key` when this is an object.
    pub fn object(&self, key: &str) -> Option<JsonObject> {
        self.as_object()?.object(key)
    }

    /// The array at `key` when this is an object.
    pub fn array(&self, key: &str) -> Option<JsonArray> {
        self.as_object()?.array(key)
    }

    /// The object at `index` when this is an array.
    pub fn object_at(&self, index: usize) -> Option<JsonObject> {
        self.as_array()?.object(index)
    }

    /// The array at `index` when this is an array.
    pub fn array_at(&self, index: usize) -> Option<JsonArray> {
        self.as_array()?.array(index)
    }

    /// `true` when both values are containers sharing the same storage.
    /// Scalars are never identical.
    pub fn identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// A copy that shares no container storage with `self`.
    ///
    /// A container reached twice in the source is copied once, so shared
    /// subtrees stay shared within the copy and a cyclic graph yields a
    /// cyclic copy.
    pub fn deep_clone(&self) -> Value {
        self.deep_clone_with(&mut CloneMemo::new())
    }

    pub(crate) fn deep_clone_with(&self, memo: &mut CloneMemo) -> Value {
        match self {
            Value::Array(a) => Value::Array(a.deep_clone_with(memo)),
            Value::Object(o) => Value::Object(o.deep_clone_with(memo)),
            other => other.clone(),
        }
    }
}

// ── Equality ─────────────────────────────────────────────────────────────

impl Value {
    pub(crate) fn eq_with(&self, other: &Value, path: &mut EqPath) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.eq_with(b, path),
            (Value::Object(a), Value::Object(b)) => a.eq_with(b, path),
            _ => false,
        }
    }
}

/// Deep structural equality. Two cyclic graphs are equal when they unfold
/// to the same infinite tree.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.eq_with(other, &mut EqPath::new())
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Value::Number(n) if *n == Number::from(*other))
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Value::Number(n) if *n == Number::from(*other))
    }
}

// ── Conversions into Value ───────────────────────────────────────────────

macro_rules! from_number {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Number(Number::from(n))
            }
        })*
    };
}

from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<JsonArray> for Value {
    fn from(a: JsonArray) -> Self {
        Value::Array(a)
    }
}

impl From<&JsonArray> for Value {
    fn from(a: &JsonArray) -> Self {
        Value::Array(a.clone())
    }
}

impl From<JsonObject> for Value {
    fn from(o: JsonObject) -> Self {
        Value::Object(o)
    }
}

impl From<&JsonObject> for Value {
    fn from(o: &JsonObject) -> Self {
        Value::Object(o.clone())
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(JsonArray::from(items))
    }
}

impl fmt::Display for Value {
    /// Compact JSON. Trees the encoder rejects print as `<error>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json_string(false) {
            Ok(s) => f.write_str(&s),
            Err(e) => write!(f, "<{e}>"),
        }
    }
}
