//! Conversions between the model and `serde_json::Value`.

use crate::array::JsonArray;
use crate::error::Result;
use crate::number::Number;
use crate::object::JsonObject;
use crate::value::Value;

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(Number::from(&n)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(map.into_iter().collect()),
        }
    }
}

impl Value {
    /// An owned `serde_json` copy of the tree.
    ///
    /// # Errors
    ///
    /// [`JsonError::Encoding`](crate::JsonError::Encoding) if the tree holds
    /// a non-finite number or a cycle.
    pub fn to_serde_json(&self) -> Result<serde_json::Value> {
        self.validate()?;
        Ok(to_serde(self))
    }
}

fn number_to_serde(n: &Number) -> serde_json::Value {
    match n.as_exact_i64() {
        Some(i) => serde_json::Value::Number(i.into()),
        None => serde_json::Number::from_f64(n.as_f64())
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
    }
}

fn array_to_serde(a: &JsonArray) -> serde_json::Value {
    serde_json::Value::Array(a.borrow().iter().map(to_serde).collect())
}

fn object_to_serde(o: &JsonObject) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = o
        .borrow()
        .iter()
        .map(|(k, v)| (k.clone(), to_serde(v)))
        .collect();
    serde_json::Value::Object(map)
}

fn to_serde(v: &Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => number_to_serde(n),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(a) => array_to_serde(a),
        Value::Object(o) => object_to_serde(o),
    }
}
