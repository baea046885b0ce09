//! Typed extraction used by the generic `get_as` / `get_or` accessors.

use crate::array::JsonArray;
use crate::number::Number;
use crate::object::JsonObject;
use crate::value::Value;

/// Types that can be read out of a [`Value`] without failing.
///
/// `from_value` returns `None` on a tag mismatch and for JSON null, which
/// is what lets `get_or` collapse "absent", "null" and "wrong type" into
/// the caller's default.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_i32()
    }
}

impl FromValue for Number {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_number()
    }
}

impl FromValue for JsonObject {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}

impl FromValue for JsonArray {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_array().cloned()
    }
}

impl FromValue for Vec<String> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_string_array()
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            other => Some(other.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_and_null_are_none() {
        assert_eq!(String::from_value(&Value::from(1)), None);
        assert_eq!(String::from_value(&Value::Null), None);
        assert_eq!(Value::from_value(&Value::Null), None);
        assert_eq!(bool::from_value(&Value::from(0)), None);
    }

    #[test]
    fn test_numeric_targets_accept_bool() {
        assert_eq!(i64::from_value(&Value::from(true)), Some(1));
        assert_eq!(f64::from_value(&Value::from(false)), Some(0.0));
        assert_eq!(Number::from_value(&Value::from(true)), None);
    }

    #[test]
    fn test_string_vec_requires_all_strings() {
        let mixed = Value::from(vec![Value::from("a"), Value::from(1)]);
        assert_eq!(Vec::<String>::from_value(&mixed), None);
        let strings = Value::from(vec!["a", "b"]);
        assert_eq!(
            Vec::<String>::from_value(&strings),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }
}
